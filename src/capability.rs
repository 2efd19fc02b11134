//! Host capability probing
//!
//! Answers one question, once: can this host execute Windows programs at
//! all? Windows can natively. Linux and macOS can when a `wine` binary
//! answers `wine --version` with a zero exit code. Every other host
//! cannot, and no probe subprocess is spawned for it.

use log::{debug, warn};
use std::process::{Command, Stdio};

/// The Wine binary name, used for both the probe and the real dispatch.
pub(crate) const WINE_BIN: &str = "wine";

/// Operating systems where Wine is expected to be installable.
const WINE_CAPABLE_HOSTS: &[&str] = &["linux", "macos"];

/// The immutable verdict of the one-time host probe.
///
/// Computed by [`HostCapability::probe`], typically via
/// [`WineRunner::new`](crate::WineRunner::new), and never recomputed:
/// there is no re-probe API. Install or repair Wine before probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapability {
    native_windows: bool,
    wine_available: bool,
}

impl HostCapability {
    /// Probes the current host. Blocks while `wine --version` runs on
    /// Linux/macOS; spawns nothing anywhere else.
    ///
    /// Probe failures of any kind (binary missing, spawn error, non-zero
    /// exit) are swallowed and simply deny the capability.
    pub fn probe() -> Self {
        Self::probe_for_os(std::env::consts::OS, wine_responds)
    }

    fn probe_for_os(os: &str, wine_check: impl FnOnce() -> bool) -> Self {
        if os == "windows" {
            debug!("🪟 Native Windows host, Wine not needed");
            return HostCapability {
                native_windows: true,
                wine_available: false,
            };
        }

        if WINE_CAPABLE_HOSTS.contains(&os) {
            let wine_available = wine_check();
            if wine_available {
                debug!("🍷 Wine responded on {os}, Windows executables enabled");
            } else {
                warn!("Wine did not respond on {os}, Windows executables disabled");
            }
            return HostCapability {
                native_windows: false,
                wine_available,
            };
        }

        debug!("⛔ Host OS '{os}' cannot run Windows executables");
        HostCapability {
            native_windows: false,
            wine_available: false,
        }
    }

    #[cfg(test)]
    pub(crate) const fn fixed(native_windows: bool, wine_available: bool) -> Self {
        HostCapability {
            native_windows,
            wine_available,
        }
    }

    /// True when the host OS is Windows itself.
    pub fn native_windows(&self) -> bool {
        self.native_windows
    }

    /// True when the probe found a responding Wine installation.
    pub fn wine_available(&self) -> bool {
        self.wine_available
    }

    /// True when execution is possible at all, natively or through Wine.
    pub fn can_execute(&self) -> bool {
        self.native_windows || self.wine_available
    }
}

/// Runs `wine --version` with all stdio suppressed. Only the exit code
/// matters; a missing binary and a broken one both read as "no Wine".
fn wine_responds() -> bool {
    match Command::new(WINE_BIN)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            debug!("🔍 Wine probe failed to spawn: {e}");
            false
        }
    }
}
