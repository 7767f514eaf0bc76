//! Integer literal parsing

use crate::{Error, Result};
use num_traits::Num;
use std::{fmt, str};

/// Parse an integer literal as written in assembly or scenario files.
///
/// Literals are an optional `-` followed by either decimal digits or a
/// `0x`-prefixed hexadecimal number. Any magnitude that fits in 64 unsigned
/// bits is accepted, and the result is the two's-complement reading of it, so
/// `0xffffffffffffffff` and `-1` parse to the same value.
pub fn parse_integer(text: &str) -> Result<i64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    // from_str_radix takes a leading `+`, which literals do not.
    if digits.starts_with('+') {
        return Err(Error::InvalidInteger(text.to_string()));
    }

    let magnitude = <u64 as Num>::from_str_radix(digits, radix)
        .map_err(|_| Error::InvalidInteger(text.to_string()))?;

    let value = magnitude as i64;

    Ok(if negative { value.wrapping_neg() } else { value })
}

/// A 64-bit integer read from text, for use in configuration.
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Literal(pub u64);

impl Literal {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl str::FromStr for Literal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_integer(s).map(|v| Literal(v as u64))
    }
}

derive_deserialize_from_str!(Literal, "integer literal");
