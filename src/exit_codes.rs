//! Standard exit codes for the wine-exec CLI
//!
//! When the target program actually ran, its own exit code is forwarded
//! instead of these.

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Panic or unrecoverable error
pub const EXIT_PANIC: i32 = 101;

/// Host can execute Windows programs neither natively nor through Wine
pub const EXIT_UNAVAILABLE: i32 = 102;

/// Execution error (failed to spawn the target process)
pub const EXIT_EXECUTION_ERROR: i32 = 103;

/// Target ran but was killed by a signal, so it has no exit code
pub const EXIT_NO_STATUS: i32 = 104;
