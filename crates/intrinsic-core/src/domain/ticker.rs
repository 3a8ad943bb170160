use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Longest accepted ticker, exchange suffix included (`BRK.B`, `RDS-A`).
pub const MAX_TICKER_LEN: usize = 15;

/// Exchange-listed ticker, uppercased.
///
/// Tickers end up in provider query strings, so only ASCII letters, digits,
/// `.` and `-` are accepted and the first character must be a letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let raw = input.trim();

        let mut normalized = String::with_capacity(raw.len());
        for (index, ch) in raw.chars().enumerate() {
            if index == MAX_TICKER_LEN {
                return Err(ValidationError::TickerTooLong {
                    len: raw.chars().count(),
                    max: MAX_TICKER_LEN,
                });
            }
            normalized.push(checked_char(index, ch.to_ascii_uppercase())?);
        }

        if normalized.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn checked_char(index: usize, ch: char) -> Result<char, ValidationError> {
    match ch {
        'A'..='Z' => Ok(ch),
        '0'..='9' | '.' | '-' if index > 0 => Ok(ch),
        _ if index == 0 => Err(ValidationError::TickerInvalidStart { ch }),
        _ => Err(ValidationError::TickerInvalidChar { ch, index }),
    }
}

impl FromStr for Ticker {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}
