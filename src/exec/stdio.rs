use std::{fs::File, io};

use crate::{
    common::{CommandDescriptor, Direction, Error},
    system::{
        dup2,
        file::{open_for_input, open_for_output, open_null_sink, NULL_DEVICE},
    },
};

/// The files a child's standard input and output get bound to.
///
/// A stream without a file stays bound to the shell's own stream. Every file is close-on-exec;
/// the child duplicates it onto the stream slot, and the shell's copy is closed when this value
/// is dropped.
#[derive(Debug, Default)]
pub(super) struct StdioBindings {
    stdin: Option<File>,
    stdout: Option<File>,
}

impl StdioBindings {
    /// Open the redirection targets of `command`.
    ///
    /// A background command without an explicit target reads from and writes to the null device,
    /// so it can never compete with the shell for the terminal.
    pub(super) fn open(command: &CommandDescriptor) -> Result<Self, Error> {
        let stdin = match command.input() {
            Some(path) => Some(open_for_input(path).map_err(|source| Error::Redirect {
                direction: Direction::Input,
                path: path.to_path_buf(),
                source,
            })?),
            None if command.is_background() => {
                Some(open_for_input(NULL_DEVICE).map_err(Error::NullDevice)?)
            }
            None => None,
        };

        let stdout = match command.output() {
            Some(path) => Some(open_for_output(path).map_err(|source| Error::Redirect {
                direction: Direction::Output,
                path: path.to_path_buf(),
                source,
            })?),
            None if command.is_background() => Some(open_null_sink().map_err(Error::NullDevice)?),
            None => None,
        };

        Ok(StdioBindings { stdin, stdout })
    }

    /// Bind the files onto the standard input and output slots of the calling process.
    ///
    /// Only meant to be called in the child, right before the image is replaced.
    pub(super) fn install(&self) -> io::Result<()> {
        if let Some(file) = &self.stdin {
            dup2(file, libc::STDIN_FILENO)?;
        }
        if let Some(file) = &self.stdout {
            dup2(file, libc::STDOUT_FILENO)?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn is_bound(&self, direction: Direction) -> bool {
        match direction {
            Direction::Input => self.stdin.is_some(),
            Direction::Output => self.stdout.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StdioBindings;
    use crate::common::{CommandDescriptor, Direction, Error, Mode};
    use crate::system::file::is_close_on_exec;

    fn command(line: &[&str], mode: Mode) -> CommandDescriptor {
        CommandDescriptor::new(line, mode).unwrap().unwrap()
    }

    #[test]
    fn foreground_without_redirection_binds_nothing() {
        let bindings = StdioBindings::open(&command(&["ls"], Mode::default())).unwrap();
        assert!(!bindings.is_bound(Direction::Input));
        assert!(!bindings.is_bound(Direction::Output));
    }

    #[test]
    fn background_binds_the_null_device() {
        let mode = Mode {
            background: true,
            ..Default::default()
        };
        let bindings = StdioBindings::open(&command(&["cat"], mode)).unwrap();
        assert!(bindings.is_bound(Direction::Input));
        assert!(bindings.is_bound(Direction::Output));
        assert!(is_close_on_exec(bindings.stdin.as_ref().unwrap()).unwrap());
        assert!(is_close_on_exec(bindings.stdout.as_ref().unwrap()).unwrap());
    }

    #[test]
    fn background_keeps_explicit_input() {
        let mode = Mode {
            input: true,
            background: true,
            ..Default::default()
        };
        let bindings = StdioBindings::open(&command(&["cat", "<", "/dev/zero"], mode)).unwrap();
        assert!(bindings.is_bound(Direction::Input));
        assert!(bindings.is_bound(Direction::Output));
    }

    #[test]
    fn missing_input_file_fails() {
        let mode = Mode {
            input: true,
            ..Default::default()
        };
        let err = StdioBindings::open(&command(&["cat", "<", "/nonexistent-path/in"], mode))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Redirect {
                direction: Direction::Input,
                ..
            }
        ));
    }

    #[test]
    fn unwritable_output_fails() {
        let mode = Mode {
            output: true,
            ..Default::default()
        };
        let err = StdioBindings::open(&command(&["ls", ">", "/nonexistent-path/out"], mode))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Redirect {
                direction: Direction::Output,
                ..
            }
        ));
    }
}
