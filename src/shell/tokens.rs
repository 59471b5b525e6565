use crate::common::{Error, Mode};

const BACKGROUND: &str = "&";
const INPUT: &str = "<";
const OUTPUT: &str = ">";
const COMMENT: char = '#';

/// The whitespace separated words of one input line, borrowed from that line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Tokens<'a> {
    items: Vec<&'a str>,
}

impl<'a> Tokens<'a> {
    /// Split a line into its tokens. No quoting or escaping is recognized.
    pub(crate) fn parse(line: &'a str) -> Self {
        Tokens {
            items: line.split_whitespace().collect(),
        }
    }

    /// Like [`Tokens::parse`], but refuses lines with more than `max` tokens.
    pub(crate) fn parse_bounded(line: &'a str, max: usize) -> Result<Self, Error> {
        let tokens = Self::parse(line);
        if tokens.items.len() > max {
            Err(Error::TooManyArguments(max))
        } else {
            Ok(tokens)
        }
    }

    pub(crate) fn as_slice(&self) -> &[&'a str] {
        &self.items
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn program(&self) -> Option<&'a str> {
        self.items.first().copied()
    }

    pub(crate) fn argument(&self, index: usize) -> Option<&'a str> {
        self.items.get(index).copied()
    }

    /// A line is a comment when its first token starts with `#`.
    pub(crate) fn is_comment(&self) -> bool {
        self.program()
            .is_some_and(|program| program.starts_with(COMMENT))
    }

    /// Look for the `<`, `>` and `&` control tokens.
    ///
    /// The first `&` is removed from the sequence; all other tokens keep their order. Taking
    /// `self` by value makes sure the removal happens only once.
    pub(crate) fn detect_mode(mut self) -> (Self, Mode) {
        let mut mode = Mode {
            input: self.items.contains(&INPUT),
            output: self.items.contains(&OUTPUT),
            background: false,
        };

        if let Some(position) = self.items.iter().position(|token| *token == BACKGROUND) {
            self.items.remove(position);
            mode.background = true;
        }

        (self, mode)
    }
}
