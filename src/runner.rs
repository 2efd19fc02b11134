//! The execution dispatcher
//!
//! Four public operations sharing the policy in [`crate::invocation`]:
//! command line vs file-plus-arguments, each in a synchronous and an
//! asynchronous variant. All four return `None` when the host cannot
//! execute Windows programs at all; otherwise they hand the planned
//! invocation to `std::process` or `tokio::process` and pass the
//! result back with no translation.

use crate::capability::HostCapability;
use crate::invocation::{self, CommandPlan, ShimRequest};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::Output;

/// Per-call options applied to the spawned process.
#[derive(Debug, Default, Clone)]
pub struct ExecOptions {
    /// Working directory for the child. On the Wine path this is also
    /// joined with the command or file path so Wine resolves the same
    /// target the native primitive would have.
    pub cwd: Option<PathBuf>,
    /// Environment variables overlaid onto the child's inherited
    /// environment, passed through to the spawn primitive unmodified.
    pub env: HashMap<String, String>,
}

/// Dispatches execution requests natively or through Wine.
///
/// Owns the immutable [`HostCapability`] it was constructed with; the
/// probe runs at construction and is never repeated. The runner is
/// `Copy`, so handing it around is free and involves no shared state.
#[derive(Debug, Clone, Copy)]
pub struct WineRunner {
    capability: HostCapability,
}

impl WineRunner {
    /// Probes the host and builds a runner.
    ///
    /// Blocks while the probe runs (see [`HostCapability::probe`]).
    /// Construct one runner and reuse it rather than probing per call.
    pub fn new() -> Self {
        Self::with_capability(HostCapability::probe())
    }

    /// Builds a runner around an already-probed capability.
    pub fn with_capability(capability: HostCapability) -> Self {
        WineRunner { capability }
    }

    /// The cached capability verdict. When this is `false`, every
    /// operation on this runner returns `None` without spawning.
    pub fn can_execute(&self) -> bool {
        self.capability.can_execute()
    }

    /// The capability this runner was built with.
    pub fn capability(&self) -> HostCapability {
        self.capability
    }

    /// Runs a command line, through Wine when the host is not Windows.
    ///
    /// The line goes through the platform shell, so space-separated
    /// arguments work the way they do in a terminal. Awaiting the
    /// returned future is the completion channel: it resolves to the
    /// captured [`Output`], or to the spawn error unchanged.
    ///
    /// Returns `None` when the host can run neither natively nor
    /// through Wine; nothing is spawned in that case.
    pub async fn exec(&self, command: &str, options: &ExecOptions) -> Option<io::Result<Output>> {
        let plan = invocation::plan(self.capability, ShimRequest::CommandLine(command), options)?;
        Some(run_async(plan, options).await)
    }

    /// Runs an executable with a discrete argument list, through Wine
    /// when the host is not Windows. No shell is involved natively.
    ///
    /// Returns `None` when the host can run neither natively nor
    /// through Wine; nothing is spawned in that case.
    pub async fn exec_file(
        &self,
        file: &str,
        args: &[String],
        options: &ExecOptions,
    ) -> Option<io::Result<Output>> {
        let request = ShimRequest::File { file, args };
        let plan = invocation::plan(self.capability, request, options)?;
        Some(run_async(plan, options).await)
    }

    /// Synchronous form of [`WineRunner::exec`]: blocks until the child
    /// exits and returns its captured [`Output`].
    pub fn exec_sync(&self, command: &str, options: &ExecOptions) -> Option<io::Result<Output>> {
        let plan = invocation::plan(self.capability, ShimRequest::CommandLine(command), options)?;
        Some(run_sync(plan, options))
    }

    /// Synchronous form of [`WineRunner::exec_file`].
    pub fn exec_file_sync(
        &self,
        file: &str,
        args: &[String],
        options: &ExecOptions,
    ) -> Option<io::Result<Output>> {
        let request = ShimRequest::File { file, args };
        let plan = invocation::plan(self.capability, request, options)?;
        Some(run_sync(plan, options))
    }
}

fn run_sync(plan: CommandPlan, options: &ExecOptions) -> io::Result<Output> {
    let mut command = std::process::Command::new(&plan.program);
    command.args(&plan.args);
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }
    command.envs(&options.env);
    command.output()
}

async fn run_async(plan: CommandPlan, options: &ExecOptions) -> io::Result<Output> {
    let mut command = tokio::process::Command::new(&plan.program);
    command.args(&plan.args);
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }
    command.envs(&options.env);
    command.output().await
}
