//! Request rewriting
//!
//! The four dispatcher operations share a single policy, applied here:
//! refuse when the host cannot execute at all, pass the request through
//! untouched on native Windows, or rewrite it so Wine becomes the
//! program that actually gets spawned. The sync/async split happens
//! later, at the spawn site.

use crate::capability::{HostCapability, WINE_BIN};
use crate::runner::ExecOptions;
use log::debug;
use std::ffi::OsString;

/// A per-call execution request, before the dispatch policy is applied.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ShimRequest<'a> {
    /// A full command line, run through the platform shell.
    CommandLine(&'a str),
    /// An executable plus a discrete argument list.
    File {
        file: &'a str,
        args: &'a [String],
    },
}

/// The program and argument vector that will actually be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandPlan {
    pub(crate) program: OsString,
    pub(crate) args: Vec<OsString>,
}

impl CommandPlan {
    /// Wraps a command line in the platform's shell, the native primitive
    /// for running a string with space-separated arguments.
    fn shell(command_line: &str) -> Self {
        if cfg!(windows) {
            CommandPlan {
                program: OsString::from("cmd"),
                args: vec![OsString::from("/C"), OsString::from(command_line)],
            }
        } else {
            CommandPlan {
                program: OsString::from("/bin/sh"),
                args: vec![OsString::from("-c"), OsString::from(command_line)],
            }
        }
    }

    /// Spawns the file directly with its arguments, untouched.
    fn direct(file: &str, args: &[String]) -> Self {
        CommandPlan {
            program: OsString::from(file),
            args: args.iter().map(OsString::from).collect(),
        }
    }
}

/// Applies the shared dispatch policy to one request.
///
/// Returns `None` when the host can execute neither natively nor through
/// Wine; in that case nothing is spawned, ever. Otherwise returns the
/// exact program/argv pair to hand to the spawn primitive.
pub(crate) fn plan(
    capability: HostCapability,
    request: ShimRequest<'_>,
    options: &ExecOptions,
) -> Option<CommandPlan> {
    if !capability.can_execute() {
        debug!("⛔ Execution unavailable on this host, refusing {request:?}");
        return None;
    }

    if capability.native_windows() {
        // Native host: the request goes through unmodified.
        return Some(match request {
            ShimRequest::CommandLine(line) => CommandPlan::shell(line),
            ShimRequest::File { file, args } => CommandPlan::direct(file, args),
        });
    }

    Some(match request {
        ShimRequest::CommandLine(line) => {
            let target = joined_with_cwd(line, options);
            debug!("🍷 Rewriting command line through Wine: {target}");
            CommandPlan::shell(&format!("{WINE_BIN} {target}"))
        }
        ShimRequest::File { file, args } => {
            let target = joined_with_cwd(file, options);
            debug!("🍷 Rewriting file invocation through Wine: {target}");
            let mut argv = Vec::with_capacity(args.len() + 1);
            argv.push(OsString::from(target));
            argv.extend(args.iter().map(OsString::from));
            CommandPlan {
                program: OsString::from(WINE_BIN),
                args: argv,
            }
        }
    })
}

/// The single path translation this layer performs: when the caller set
/// a working directory, join it with the target so Wine resolves the
/// same file the native primitive would have.
fn joined_with_cwd(target: &str, options: &ExecOptions) -> String {
    match &options.cwd {
        Some(dir) => dir.join(target).to_string_lossy().into_owned(),
        None => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandPlan, ShimRequest, plan};
    use crate::capability::HostCapability;
    use crate::runner::ExecOptions;
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    fn native() -> HostCapability {
        HostCapability::fixed(true, false)
    }

    fn wine() -> HostCapability {
        HostCapability::fixed(false, true)
    }

    fn denied() -> HostCapability {
        HostCapability::fixed(false, false)
    }

    /// The command line a shell plan will execute.
    fn shell_line(plan: &CommandPlan) -> &str {
        plan.args
            .last()
            .and_then(|arg| arg.to_str())
            .unwrap_or_default()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_denied_host_yields_no_plan() {
        let options = ExecOptions::default();
        assert!(plan(denied(), ShimRequest::CommandLine("notepad.exe"), &options).is_none());
        let file_args = args(&["/A", "report.txt"]);
        let request = ShimRequest::File {
            file: "notepad.exe",
            args: &file_args,
        };
        assert!(plan(denied(), request, &options).is_none());
    }

    #[test]
    fn test_native_command_line_is_untouched() {
        let options = ExecOptions::default();
        let planned = plan(native(), ShimRequest::CommandLine("notepad.exe /A"), &options)
            .expect("native host must plan");
        assert_eq!(shell_line(&planned), "notepad.exe /A");
        assert_ne!(planned.program, OsString::from("wine"));
    }

    #[test]
    fn test_native_file_is_untouched() {
        let options = ExecOptions {
            // The join only happens on the Wine path; natively the cwd is
            // left to the spawn primitive.
            cwd: Some(PathBuf::from("/opt/app")),
            ..ExecOptions::default()
        };
        let file_args = args(&["/A", "report.txt"]);
        let request = ShimRequest::File {
            file: "notepad.exe",
            args: &file_args,
        };
        let planned = plan(native(), request, &options).expect("native host must plan");
        assert_eq!(planned.program, OsString::from("notepad.exe"));
        assert_eq!(
            planned.args,
            vec![OsString::from("/A"), OsString::from("report.txt")]
        );
    }

    #[test]
    fn test_wine_command_line_gets_prefixed() {
        let options = ExecOptions::default();
        let planned = plan(wine(), ShimRequest::CommandLine("notepad.exe"), &options)
            .expect("wine host must plan");
        assert_eq!(shell_line(&planned), "wine notepad.exe");
    }

    #[test]
    fn test_wine_command_line_joins_cwd() {
        let options = ExecOptions {
            cwd: Some(PathBuf::from("/opt/app")),
            ..ExecOptions::default()
        };
        let planned = plan(wine(), ShimRequest::CommandLine("notepad.exe"), &options)
            .expect("wine host must plan");
        let joined = Path::new("/opt/app").join("notepad.exe");
        assert_eq!(shell_line(&planned), format!("wine {}", joined.display()));
    }

    #[test]
    fn test_wine_file_prepends_target() {
        let options = ExecOptions::default();
        let file_args = args(&["/A", "report.txt"]);
        let request = ShimRequest::File {
            file: "notepad.exe",
            args: &file_args,
        };
        let planned = plan(wine(), request, &options).expect("wine host must plan");
        assert_eq!(planned.program, OsString::from("wine"));
        assert_eq!(
            planned.args,
            vec![
                OsString::from("notepad.exe"),
                OsString::from("/A"),
                OsString::from("report.txt"),
            ]
        );
    }

    #[test]
    fn test_wine_file_joins_cwd() {
        let options = ExecOptions {
            cwd: Some(PathBuf::from("/opt/app")),
            ..ExecOptions::default()
        };
        let file_args = args(&["/A"]);
        let request = ShimRequest::File {
            file: "notepad.exe",
            args: &file_args,
        };
        let planned = plan(wine(), request, &options).expect("wine host must plan");
        let joined = Path::new("/opt/app").join("notepad.exe");
        assert_eq!(planned.program, OsString::from("wine"));
        assert_eq!(
            planned.args,
            vec![OsString::from(joined.as_os_str()), OsString::from("/A")]
        );
    }
}
