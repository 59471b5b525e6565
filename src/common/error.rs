use crate::system::{file::NULL_DEVICE, interface::ProcessId};
use std::{fmt, io, path::PathBuf};

use super::Direction;

#[derive(Debug)]
pub enum Error {
    NullDevice(io::Error),
    Redirect {
        direction: Direction,
        path: PathBuf,
        source: io::Error,
    },
    MissingRedirectTarget(Direction),
    TooManyArguments(usize),
    LineTooLong(usize),
    ChangeDirectory(PathBuf),
    NoHomeDirectory,
    Fork(io::Error),
    Wait(ProcessId, io::Error),
    Kill(ProcessId, io::Error),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NullDevice(e) => write!(f, "cannot open {NULL_DEVICE}: {e}"),
            Error::Redirect {
                direction,
                path,
                source,
            } => write!(
                f,
                "File Error: cannot open {} for {direction}: {source}",
                path.display()
            ),
            Error::MissingRedirectTarget(direction) => write!(
                f,
                "syntax error: expected a file name after '{}'",
                direction.token()
            ),
            Error::TooManyArguments(max) => {
                write!(f, "too many arguments: at most {max} are supported")
            }
            Error::LineTooLong(max) => {
                write!(f, "input line too long: at most {max} bytes are supported")
            }
            Error::ChangeDirectory(path) => {
                write!(f, "cd: {}: No such file or directory", path.display())
            }
            Error::NoHomeDirectory => f.write_str("cd: cannot determine home directory"),
            Error::Fork(e) => write!(f, "fork failed: {e}"),
            Error::Wait(pid, e) => write!(f, "wait for {pid} failed: {e}"),
            Error::Kill(pid, e) => write!(f, "kill {pid} failed: {e}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl Error {
    /// Returns `true` for failures of the operating system itself, as opposed to failures caused
    /// by what the user typed.
    ///
    /// System failures are logged on standard error, the others are printed as notices.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(
            self,
            Self::Fork(_) | Self::Wait(..) | Self::Kill(..) | Self::Io(_)
        )
    }
}
