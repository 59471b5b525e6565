#![deny(unsafe_code)]

mod errpipe;
mod foreground;
mod io_util;
mod stdio;

use std::{
    fmt,
    io::{self, Write},
    os::unix::process::CommandExt,
    process::Command,
};

use crate::{
    common::{CommandDescriptor, Error},
    log::{dev_info, dev_warn},
    system::{
        _exit, fork,
        interface::ProcessId,
        signal::{consts::SIGINT, SignalHandler, SignalHandlerBehavior, SignalNumber},
        wait::WaitStatus,
        ForkResult,
    },
};

pub(crate) use foreground::wait_foreground;

use self::{errpipe::ErrPipe, stdio::StdioBindings};

/// How a child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Code(i32),
    Signal(SignalNumber),
}

impl ExitReason {
    /// Returns `None` if `status` does not describe a terminated process.
    pub(crate) fn from_status(status: &WaitStatus) -> Option<Self> {
        if let Some(code) = status.exit_status() {
            Some(ExitReason::Code(code))
        } else {
            status.term_signal().map(ExitReason::Signal)
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::Code(code) => write!(f, "exit value {code}"),
            ExitReason::Signal(signal) => write!(f, "terminated by signal {signal}"),
        }
    }
}

/// A freshly forked child.
#[derive(Debug)]
pub(crate) struct Child {
    pub(crate) pid: ProcessId,
    /// Why the child could not replace its image, in which case it exits with status 1.
    pub(crate) exec_error: Option<io::Error>,
}

/// Start `command` in a new process.
///
/// Redirection targets are opened before forking, so a failure there never creates a process.
/// The call returns once the child has either replaced its image or failed to do so; it never
/// waits for the child to terminate.
pub(crate) fn spawn(command: &CommandDescriptor) -> Result<Child, Error> {
    let stdio = StdioBindings::open(command)?;

    let mut process = Command::new(command.program());
    process.args(command.exec_arguments());

    let disposition = if command.is_background() {
        SignalHandlerBehavior::Ignore
    } else {
        SignalHandlerBehavior::Default
    };

    // Use a pipe to get the IO error if `exec` fails.
    let (mut errpipe_tx, mut errpipe_rx) = ErrPipe::pair()?;

    // Whatever is still buffered would otherwise be written by the child as well.
    io::stdout().flush().ok();

    let ForkResult::Parent(pid) = fork().map_err(Error::Fork)? else {
        drop(errpipe_rx);

        let err = match enter_child(&stdio, disposition) {
            Ok(()) => process.exec(),
            Err(err) => err,
        };

        // If `exec` returns, it means that executing the command failed.
        errpipe_tx.send(&err).ok();
        _exit(libc::EXIT_FAILURE);
    };

    // The child holds its own copies of these now.
    drop(stdio);
    drop(errpipe_tx);

    dev_info!("started {} with pid {pid}", command.program());

    let exec_error = match errpipe_rx.recv() {
        Ok(exec_error) => exec_error,
        Err(err) => {
            dev_warn!("cannot read exec status of {pid}: {err}");
            None
        }
    };

    Ok(Child { pid, exec_error })
}

// Runs in the child between `fork` and `exec`.
fn enter_child(stdio: &StdioBindings, disposition: SignalHandlerBehavior) -> io::Result<()> {
    SignalHandler::register(SIGINT, disposition)?.forget();
    stdio.install()
}
