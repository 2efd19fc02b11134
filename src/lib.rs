//! wine-exec - run Windows executables on any desktop platform
//!
//! On Windows the execution operations delegate straight to the native
//! spawn primitives. On Linux and macOS they transparently route the
//! target through [Wine](https://www.winehq.org/), provided a one-time
//! probe found a working `wine` binary. On any other host, and on
//! Linux/macOS without Wine, every operation refuses with `None`
//! instead of spawning anything.
//!
//! ```no_run
//! use wine_exec::{ExecOptions, WineRunner};
//!
//! let runner = WineRunner::new();
//! match runner.exec_sync("notepad.exe", &ExecOptions::default()) {
//!     None => eprintln!("this host cannot run Windows executables"),
//!     Some(result) => {
//!         let output = result.expect("spawn failed");
//!         println!("exited with {}", output.status);
//!     }
//! }
//! ```

// Enforce strict code quality and reliability
#![deny(unsafe_code, rust_2018_idioms, missing_debug_implementations)]
#![warn(
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::inefficient_to_string,
    clippy::wildcard_imports
)]

pub mod capability;
pub mod exit_codes;
mod invocation;
pub mod runner;
pub mod version;

pub use capability::HostCapability;
pub use runner::{ExecOptions, WineRunner};
