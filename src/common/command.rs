use std::path::{Path, PathBuf};

use super::{Direction, Error};

/// The control tokens found in a command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub input: bool,
    pub output: bool,
    pub background: bool,
}

/// An external program invocation derived from a token sequence.
#[derive(Debug, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct CommandDescriptor {
    pub(crate) program: String,
    pub(crate) arguments: Vec<String>,
    pub(crate) input: Option<PathBuf>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) background: bool,
}

// The redirection target is the token right after the first occurrence of its operator. For the
// supported form `cmd < file` or `cmd > file` this is the third token.
fn target(tokens: &[&str], direction: Direction) -> Result<PathBuf, Error> {
    tokens
        .iter()
        .position(|token| *token == direction.token())
        .and_then(|position| tokens.get(position + 1))
        .map(PathBuf::from)
        .ok_or(Error::MissingRedirectTarget(direction))
}

impl CommandDescriptor {
    /// Build a descriptor from a token sequence that already went through mode detection, so it
    /// no longer contains the background marker.
    ///
    /// Returns `Ok(None)` for an empty sequence.
    pub fn new(tokens: &[&str], mode: Mode) -> Result<Option<Self>, Error> {
        let Some(program) = tokens.first() else {
            return Ok(None);
        };

        let input = mode
            .input
            .then(|| target(tokens, Direction::Input))
            .transpose()?;
        let output = mode
            .output
            .then(|| target(tokens, Direction::Output))
            .transpose()?;

        Ok(Some(CommandDescriptor {
            program: program.to_string(),
            arguments: tokens.iter().map(|token| token.to_string()).collect(),
            input,
            output,
            background: mode.background,
        }))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Every token of the command, the program name included.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The arguments handed to the program after its own name.
    ///
    /// A redirected command is started with its name only: everything after the program name
    /// is taken to be the redirection.
    pub fn exec_arguments(&self) -> &[String] {
        if self.is_redirected() {
            &[]
        } else {
            &self.arguments[1..]
        }
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn is_background(&self) -> bool {
        self.background
    }

    pub fn is_redirected(&self) -> bool {
        self.input.is_some() || self.output.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandDescriptor, Direction, Error, Mode};
    use pretty_assertions::assert_eq;

    fn descriptor(tokens: &[&str], mode: Mode) -> CommandDescriptor {
        CommandDescriptor::new(tokens, mode).unwrap().unwrap()
    }

    #[test]
    fn empty_sequence_has_no_command() {
        assert!(CommandDescriptor::new(&[], Mode::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn plain_command_keeps_its_arguments() {
        let cmd = descriptor(&["ls", "-l", "/tmp"], Mode::default());
        assert_eq!(cmd.program(), "ls");
        assert_eq!(cmd.arguments(), ["ls", "-l", "/tmp"]);
        assert_eq!(cmd.exec_arguments(), ["-l", "/tmp"]);
        assert!(!cmd.is_redirected());
        assert!(!cmd.is_background());
    }

    #[test]
    fn input_redirection() {
        let mode = Mode {
            input: true,
            ..Default::default()
        };
        let cmd = descriptor(&["wc", "<", "junk"], mode);
        assert_eq!(cmd.input().unwrap().to_str(), Some("junk"));
        assert_eq!(cmd.output(), None);
        assert!(cmd.exec_arguments().is_empty());
    }

    #[test]
    fn both_redirections() {
        let mode = Mode {
            input: true,
            output: true,
            background: true,
        };
        let cmd = descriptor(&["sort", "<", "in", ">", "out"], mode);
        assert_eq!(cmd.input().unwrap().to_str(), Some("in"));
        assert_eq!(cmd.output().unwrap().to_str(), Some("out"));
        assert!(cmd.is_background());
    }

    #[test]
    fn redirected_arguments_are_dropped() {
        // only the program name survives; this is the supported positional form
        let mode = Mode {
            output: true,
            ..Default::default()
        };
        let cmd = descriptor(&["ls", "-l", ">", "listing"], mode);
        assert_eq!(cmd.output().unwrap().to_str(), Some("listing"));
        assert!(cmd.exec_arguments().is_empty());
    }

    #[test]
    fn missing_target_is_an_error() {
        let mode = Mode {
            output: true,
            ..Default::default()
        };
        let err = CommandDescriptor::new(&["ls", ">"], mode).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRedirectTarget(Direction::Output)
        ));
    }
}
