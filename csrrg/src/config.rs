//! Configuration of the decoder.

use tracing::debug;

use crate::errors::{CsrrgError, Result};
use crate::reader::RawLine;
use crate::report::Anomalies;
use crate::utils;

/// Default delimiter of integer lists.
pub const DEFAULT_DELIMITER: u8 = b';';

/// How tokens that are not valid integers are handled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ParseMode {
    /// A malformed token or a decreasing offset list fails the whole decode.
    Strict,

    /// A malformed token is read as its leading integer (0 when it has none),
    /// and decreasing offsets are kept as negative counts.
    #[default]
    Lenient,
}

/// Configuration for a [`Decoder`](crate::Decoder).
#[derive(Clone, Debug)]
pub struct DecoderConfig {
    delimiter: u8,
    mode: ParseMode,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            mode: ParseMode::default(),
        }
    }
}

impl DecoderConfig {
    /// Creates a configuration with the `;` delimiter and lenient parsing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delimiter of integer lists.
    ///
    /// # Errors
    ///
    /// [`CsrrgError`] is returned when the delimiter is not an ASCII
    /// punctuation character other than `+` and `-`.
    pub fn delimiter(mut self, delimiter: u8) -> Result<Self> {
        if !delimiter.is_ascii_punctuation() || delimiter == b'+' || delimiter == b'-' {
            return Err(CsrrgError::invalid_argument(
                "delimiter",
                format!(
                    "{:?} cannot separate integers",
                    char::from(delimiter)
                ),
            ));
        }
        self.delimiter = delimiter;
        Ok(self)
    }

    /// Sets the parse mode.
    pub const fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Gets the delimiter.
    pub const fn get_delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Gets the parse mode.
    pub const fn get_mode(&self) -> ParseMode {
        self.mode
    }

    /// Parses one token into an integer under the configured mode.
    fn parse_token(
        &self,
        token: &str,
        line: usize,
        anomalies: &mut Anomalies,
    ) -> Result<i64> {
        match token.trim().parse::<i64>() {
            Ok(value) => Ok(value),
            Err(e) => match self.mode {
                ParseMode::Strict => Err(CsrrgError::invalid_token(line, token, e.to_string())),
                ParseMode::Lenient => {
                    let value = utils::parse_leading_int(token);
                    debug!(line, token, value, "coerced a malformed token");
                    anomalies.coerced_tokens += 1;
                    Ok(value)
                }
            },
        }
    }

    /// Parses a line holding a single integer.
    pub(crate) fn parse_value(&self, raw: &RawLine, anomalies: &mut Anomalies) -> Result<i64> {
        self.check_encoding(raw)?;
        self.parse_token(&raw.text, raw.number, anomalies)
    }

    /// Tokenizes a delimited line and parses every token.
    ///
    /// In lenient mode, a delimiter right before the line break leaves the
    /// break as a last token, which reads as 0.
    pub(crate) fn parse_line(&self, raw: &RawLine, anomalies: &mut Anomalies) -> Result<Vec<i64>> {
        self.check_encoding(raw)?;
        let mut values = utils::split_delimited(&raw.text, self.delimiter)
            .iter()
            .map(|token| self.parse_token(token, raw.number, anomalies))
            .collect::<Result<Vec<_>>>()?;
        if self.mode == ParseMode::Lenient
            && raw.terminated
            && raw.text.as_bytes().last() == Some(&self.delimiter)
        {
            debug!(line = raw.number, "read the line break after a trailing delimiter as 0");
            anomalies.coerced_tokens += 1;
            values.push(0);
        }
        Ok(values)
    }

    fn check_encoding(&self, raw: &RawLine) -> Result<()> {
        if raw.lossy && self.mode == ParseMode::Strict {
            return Err(CsrrgError::invalid_token(
                raw.number,
                raw.text.as_str(),
                "invalid UTF-8",
            ));
        }
        Ok(())
    }
}
