use std::io::{self, BufRead, Read};

use crate::common::Error;

/// Reads the command lines typed at the prompt, one at a time.
pub(crate) struct LineReader<R> {
    inner: R,
    max_len: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R, max_len: usize) -> Self {
        LineReader { inner, max_len }
    }

    /// Read the next line without its line terminator.
    ///
    /// Returns `Ok(None)` at the end of the input. A line longer than the maximum length is
    /// consumed completely and reported as [`Error::LineTooLong`].
    pub(crate) fn read_line(&mut self) -> Result<Option<String>, Error> {
        let mut buf = Vec::new();
        let limit = u64::try_from(self.max_len)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let read = self.inner.by_ref().take(limit).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(None);
        }

        let terminated = buf.last() == Some(&b'\n');
        if terminated {
            buf.pop();
        }

        if buf.len() > self.max_len {
            if !terminated {
                self.discard_rest()?;
            }
            return Err(Error::LineTooLong(self.max_len));
        }

        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn discard_rest(&mut self) -> io::Result<()> {
        loop {
            let (done, used) = {
                let available = self.inner.fill_buf()?;
                match available.iter().position(|byte| *byte == b'\n') {
                    Some(position) => (true, position + 1),
                    None => (available.is_empty(), available.len()),
                }
            };
            self.inner.consume(used);
            if done {
                return Ok(());
            }
        }
    }
}
