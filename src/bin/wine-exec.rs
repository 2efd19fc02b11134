//! wine-exec command-line interface

use clap::{Parser, Subcommand};
use log::error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Output;
use std::{env, panic, process};
use wine_exec::exit_codes::{
    EXIT_EXECUTION_ERROR, EXIT_NO_STATUS, EXIT_PANIC, EXIT_SUCCESS, EXIT_UNAVAILABLE,
};
use wine_exec::{ExecOptions, WineRunner};

const VERSION: &str = wine_exec::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Run Windows executables natively or through Wine")]
struct Args {
    /// Log level (trace, debug, info, warn, error); defaults to WINE_EXEC_LOG or warn
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Report whether this host can execute Windows programs
    Check,
    /// Run a full command line, with space-separated arguments
    Run {
        /// The command line to run
        command: String,

        /// Working directory for the child process
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
    /// Run an executable with a discrete argument list
    RunFile {
        /// The executable to run
        file: String,

        /// Arguments passed to the executable
        args: Vec<String>,

        /// Working directory for the child process
        #[arg(long)]
        cwd: Option<PathBuf>,
    },
}

fn main() {
    // Set up panic handler to return specific exit code
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in wine-exec");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    // Handle --version before clap so build metadata is included
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("wine-exec {}", wine_exec::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    init_logging(args.log_level.as_deref());

    let runner = WineRunner::new();

    match args.command {
        CliCommand::Check => check(&runner),
        CliCommand::Run { command, cwd } => {
            let options = ExecOptions {
                cwd,
                ..ExecOptions::default()
            };
            report(runner.exec_sync(&command, &options))
        }
        CliCommand::RunFile { file, args, cwd } => {
            let options = ExecOptions {
                cwd,
                ..ExecOptions::default()
            };
            report(runner.exec_file_sync(&file, &args, &options))
        }
    }
}

fn init_logging(flag: Option<&str>) {
    let level = flag
        .map(str::to_string)
        .or_else(|| env::var("WINE_EXEC_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());

    env_logger::Builder::new().parse_filters(&level).init();
}

fn check(runner: &WineRunner) -> i32 {
    let capability = runner.capability();
    println!("native windows: {}", capability.native_windows());
    println!("wine available: {}", capability.wine_available());
    println!("can execute:    {}", capability.can_execute());

    if capability.can_execute() {
        EXIT_SUCCESS
    } else {
        EXIT_UNAVAILABLE
    }
}

/// Maps a dispatcher outcome onto an exit code, forwarding the child's
/// captured output and exit code when it actually ran.
fn report(outcome: Option<io::Result<Output>>) -> i32 {
    match outcome {
        None => {
            error!("this host can run Windows executables neither natively nor through Wine");
            EXIT_UNAVAILABLE
        }
        Some(Err(e)) => {
            error!("failed to spawn target: {e}");
            EXIT_EXECUTION_ERROR
        }
        Some(Ok(output)) => {
            let _ = io::stdout().write_all(&output.stdout);
            let _ = io::stderr().write_all(&output.stderr);
            output.status.code().unwrap_or(EXIT_NO_STATUS)
        }
    }
}
