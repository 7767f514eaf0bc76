//! The condition flags register

use std::fmt;

/// The four condition flags the simulated core tracks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Carry out of (or borrow into) the most significant bit.
    pub cf: bool,

    /// The result was zero.
    pub zf: bool,

    /// The sign bit of the result.
    pub sf: bool,

    /// The result overflowed when treated as signed.
    pub of: bool,
}

impl Flags {
    /// Clear every flag.
    pub fn reset(&mut self) {
        *self = Flags::default();
    }

    /// True if no flag is set.
    pub fn is_clear(&self) -> bool {
        *self == Flags::default()
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CF = {}\tZF = {}\tSF = {}\tOF = {}",
            self.cf as u8, self.zf as u8, self.sf as u8, self.of as u8
        )
    }
}
