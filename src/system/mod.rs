use std::{
    io,
    mem::MaybeUninit,
    os::fd::{AsRawFd, RawFd},
    path::PathBuf,
};

use crate::cutils::*;
use interface::{ProcessId, UserId};

use self::signal::SignalNumber;

// generalized traits for when we want to hide implementations
pub mod interface;

pub mod file;

pub mod signal;

pub mod wait;

pub(crate) fn _exit(status: libc::c_int) -> ! {
    unsafe { libc::_exit(status) }
}

pub(crate) enum ForkResult {
    // Parent process branch with the child process' PID.
    Parent(ProcessId),
    // Child process branch.
    Child,
}

/// Create a new process.
///
/// The shell is single threaded, so the child may run arbitrary code until it replaces its image
/// or calls [`_exit`].
pub(crate) fn fork() -> io::Result<ForkResult> {
    let pid = cerr(unsafe { libc::fork() })?;
    if pid == 0 {
        Ok(ForkResult::Child)
    } else {
        Ok(ForkResult::Parent(ProcessId::new(pid)))
    }
}

/// Send a signal to a process with the specified ID.
pub fn kill(pid: ProcessId, signal: SignalNumber) -> io::Result<()> {
    // SAFETY: This function cannot cause UB even if `pid` is not a valid process ID or if
    // `signal` is not a valid signal code.
    cerr(unsafe { libc::kill(pid.get(), signal) }).map(|_| ())
}

/// Duplicate `fd` onto the descriptor slot `target`.
///
/// The duplicate does not carry the close-on-exec flag of the original, so it survives the image
/// replacement while the original does not.
pub fn dup2<F: AsRawFd>(fd: &F, target: RawFd) -> io::Result<()> {
    cerr(unsafe { libc::dup2(fd.as_raw_fd(), target) }).map(|_| ())
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub uid: UserId,
    pub home: PathBuf,
}

impl User {
    pub fn real_uid() -> UserId {
        UserId::new(unsafe { libc::getuid() })
    }

    /// Look up the password database entry of the user that started the shell.
    pub fn real() -> io::Result<Option<User>> {
        Self::from_uid(Self::real_uid())
    }

    pub fn from_uid(uid: UserId) -> io::Result<Option<User>> {
        let max_pw_size = sysconf(libc::_SC_GETPW_R_SIZE_MAX).unwrap_or(16_384);
        let mut buf = vec![0; max_pw_size as usize];
        let mut pwd = MaybeUninit::<libc::passwd>::uninit();
        let mut pwd_ptr = std::ptr::null_mut();
        // getpwuid_r reports failures through its return value instead of errno
        let res = unsafe {
            libc::getpwuid_r(
                uid.get(),
                pwd.as_mut_ptr(),
                buf.as_mut_ptr(),
                buf.len(),
                &mut pwd_ptr,
            )
        };
        if res != 0 {
            return Err(io::Error::from_raw_os_error(res));
        }
        if pwd_ptr.is_null() {
            Ok(None)
        } else {
            let pwd = unsafe { pwd.assume_init() };
            Ok(Some(User {
                uid: UserId::new(pwd.pw_uid),
                home: unsafe { os_string_from_ptr(pwd.pw_dir) }.into(),
            }))
        }
    }
}
