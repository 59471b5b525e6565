//! Reports a failed image replacement from the child back to the shell.
use std::{
    io::{self, Read, Write},
    os::unix::net::UnixStream,
};

use super::io_util::retry_while_interrupted;

const ERRNO_SIZE: usize = std::mem::size_of::<i32>();

/// One end of a socket pair carrying a single `errno` value.
///
/// Both ends are close-on-exec: when the child replaces its image successfully its end is closed
/// without anything being written, and the shell reads end-of-file.
pub(super) struct ErrPipe {
    sock: UnixStream,
}

impl ErrPipe {
    pub(super) fn pair() -> io::Result<(ErrPipe, ErrPipe)> {
        let (tx, rx) = UnixStream::pair()?;
        Ok((ErrPipe { sock: tx }, ErrPipe { sock: rx }))
    }

    /// Send the error that prevented the child from replacing its image.
    pub(super) fn send(&mut self, err: &io::Error) -> io::Result<()> {
        // errors built by the standard library itself (e.g. a NUL byte in the program name) carry
        // no errno
        let code = err.raw_os_error().unwrap_or(libc::EINVAL);
        self.sock.write_all(&code.to_ne_bytes())
    }

    /// Block until the other end either reports an error or is closed.
    pub(super) fn recv(&mut self) -> io::Result<Option<io::Error>> {
        let mut bytes = [0; ERRNO_SIZE];
        match retry_while_interrupted(|| self.sock.read_exact(&mut bytes)) {
            Ok(()) => Ok(Some(io::Error::from_raw_os_error(i32::from_ne_bytes(bytes)))),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err),
        }
    }
}
