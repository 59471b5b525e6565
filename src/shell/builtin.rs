use std::{env, io::Write, path::PathBuf};

use crate::{
    common::Error,
    log::{dev_info, user_error},
    system::{signal::consts::SIGKILL, User},
};

use super::{Flow, Shell, Tokens};

/// Commands the shell carries out itself instead of starting a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    ChangeDirectory,
    Status,
    Exit,
}

impl Builtin {
    pub(crate) fn lookup(program: &str) -> Option<Self> {
        match program {
            "cd" => Some(Builtin::ChangeDirectory),
            "status" => Some(Builtin::Status),
            "exit" => Some(Builtin::Exit),
            _ => None,
        }
    }
}

/// The directory `cd` moves to when it is given no argument.
fn home_directory() -> Result<PathBuf, Error> {
    if let Some(home) = env::var_os("HOME").filter(|home| !home.is_empty()) {
        return Ok(home.into());
    }

    match User::real() {
        Ok(Some(user)) => Ok(user.home),
        Ok(None) => Err(Error::NoHomeDirectory),
        Err(err) => {
            dev_info!("cannot look up the current user: {err}");
            Err(Error::NoHomeDirectory)
        }
    }
}

/// Change the working directory of the shell, and thereby of every command it starts later on.
pub(crate) fn change_directory(target: Option<&str>) -> Result<PathBuf, Error> {
    let path = match target {
        Some(target) => PathBuf::from(target),
        None => home_directory()?,
    };

    match env::set_current_dir(&path) {
        Ok(()) => Ok(path),
        Err(err) => {
            dev_info!("chdir to {} failed: {err}", path.display());
            Err(Error::ChangeDirectory(path))
        }
    }
}

impl<W: Write> Shell<W> {
    /// Carry out a built-in. Control tokens on the line are ordinary arguments to a built-in,
    /// and built-ins never run in the background.
    pub(super) fn run_builtin(&mut self, builtin: Builtin, tokens: &Tokens) -> Flow {
        match builtin {
            Builtin::ChangeDirectory => {
                if let Err(err) = change_directory(tokens.argument(1)) {
                    notice!(self.out, "{err}");
                    self.status.fail();
                }
                Flow::Continue
            }
            Builtin::Status => {
                notice!(self.out, "{}", self.status);
                Flow::Continue
            }
            Builtin::Exit => {
                for err in self.jobs.signal_all(SIGKILL) {
                    user_error!("{err}");
                }
                Flow::Exit
            }
        }
    }
}
