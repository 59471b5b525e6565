use crate::{
    common::Error,
    log::dev_warn,
    system::{
        interface::ProcessId,
        wait::{Wait, WaitError, WaitOptions},
    },
};

use super::{io_util::was_interrupted, ExitReason};

/// Block until the child `pid` terminates and return how it terminated.
///
/// This is the only place where the shell suspends itself.
pub(crate) fn wait_foreground(pid: ProcessId) -> Result<ExitReason, Error> {
    loop {
        match pid.wait(WaitOptions::new()) {
            Err(WaitError::Io(err)) if was_interrupted(&err) => {}
            Err(WaitError::Io(err)) => return Err(Error::Wait(pid, err)),
            // only reported when waiting without blocking
            Err(WaitError::NotReady) => {}
            Ok((_, status)) => match ExitReason::from_status(&status) {
                Some(reason) => return Ok(reason),
                None => dev_warn!("unexpected wait status for {pid}: {status:?}"),
            },
        }
    }
}
