#![forbid(unsafe_code)]
use std::fmt;

pub use command::{CommandDescriptor, Mode};
pub use error::Error;

pub mod command;
pub mod error;

/// Which standard stream a redirection rebinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// The control token that requests this redirection.
    pub const fn token(self) -> &'static str {
        match self {
            Direction::Input => "<",
            Direction::Output => ">",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => f.write_str("input"),
            Direction::Output => f.write_str("output"),
        }
    }
}
