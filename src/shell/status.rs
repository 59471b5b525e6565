use std::fmt;

use crate::{exec::ExitReason, system::signal::SignalNumber};

/// What the `status` built-in reports: the outcome of the most recent foreground command.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunStatus {
    exit_code: i32,
    term_signal: Option<SignalNumber>,
}

impl RunStatus {
    pub(crate) fn record(&mut self, reason: ExitReason) {
        match reason {
            ExitReason::Code(code) => {
                self.exit_code = code;
                self.term_signal = None;
            }
            ExitReason::Signal(signal) => self.term_signal = Some(signal),
        }
    }

    /// Mark the last command as failed without it having run to completion.
    pub(crate) fn fail(&mut self) {
        self.record(ExitReason::Code(libc::EXIT_FAILURE));
    }

    pub(crate) fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub(crate) fn term_signal(&self) -> Option<SignalNumber> {
        self.term_signal.filter(|signal| *signal != 0)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term_signal() {
            Some(signal) => write!(f, "{}", ExitReason::Signal(signal)),
            None => write!(f, "{}", ExitReason::Code(self.exit_code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RunStatus;
    use crate::exec::ExitReason;

    #[test]
    fn starts_successful() {
        let status = RunStatus::default();
        assert_eq!(status.exit_code(), 0);
        assert_eq!(status.term_signal(), None);
        assert_eq!(status.to_string(), "exit value 0");
    }

    #[test]
    fn signal_takes_precedence_until_next_exit() {
        let mut status = RunStatus::default();
        status.record(ExitReason::Code(1));
        status.record(ExitReason::Signal(15));
        assert_eq!(status.to_string(), "terminated by signal 15");
        assert_eq!(status.exit_code(), 1);

        status.record(ExitReason::Code(0));
        assert_eq!(status.to_string(), "exit value 0");
    }

    #[test]
    fn failure_clears_signal() {
        let mut status = RunStatus::default();
        status.record(ExitReason::Signal(9));
        status.fail();
        assert_eq!(status.term_signal(), None);
        assert_eq!(status.to_string(), "exit value 1");
    }

    #[test]
    fn signal_zero_is_not_a_termination() {
        let mut status = RunStatus::default();
        status.record(ExitReason::Signal(0));
        assert_eq!(status.to_string(), "exit value 0");
    }
}
