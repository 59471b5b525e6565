use std::{
    fs::{File, OpenOptions},
    io::Result,
    os::unix::fs::OpenOptionsExt,
    path::Path,
};

/// The device that discards writes and yields end-of-input on reads.
pub const NULL_DEVICE: &str = "/dev/null";

/// Permissions of a file created by output redirection, before the umask is applied.
const OUTPUT_MODE: u32 = 0o644;

// Files opened through the standard library are close-on-exec, so none of these leak into the
// program image that replaces a child. Only a `dup2`ed copy survives.

/// Open an existing file for reading only.
pub fn open_for_input(path: impl AsRef<Path>) -> Result<File> {
    OpenOptions::new().read(true).open(path)
}

/// Open a file for writing, creating it if missing and truncating it otherwise.
pub fn open_for_output(path: impl AsRef<Path>) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_MODE)
        .open(path)
}

/// Open the null device for writing, without creating or truncating anything.
pub fn open_null_sink() -> Result<File> {
    OpenOptions::new().write(true).open(NULL_DEVICE)
}

/// Check whether the close-on-exec flag is set on the given descriptor.
#[cfg(test)]
pub(crate) fn is_close_on_exec(fd: &impl std::os::fd::AsRawFd) -> Result<bool> {
    let flags = crate::cutils::cerr(unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_GETFD) })?;
    Ok(flags & libc::FD_CLOEXEC != 0)
}
