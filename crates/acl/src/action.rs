//! crates/acl/src/action.rs
//!
//! Read/write/execute permission triple carried by every ACL entry.

use std::fmt;
use std::ops::BitOr;

/// Canonical symbols indexed by the permission bits (`r` = 4, `w` = 2, `x` = 1).
const SYMBOLS: [&str; 8] = ["---", "--x", "-w-", "-wx", "r--", "r-x", "rw-", "rwx"];

/// A set of permission bits drawn from {READ, WRITE, EXECUTE}.
///
/// The textual form is always exactly three characters, one of `r`/`-`,
/// `w`/`-` and `x`/`-` in that order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FsAction(u8);

impl FsAction {
    /// No permission.
    pub const NONE: Self = Self(0b000);
    /// Execute (or search, for directories).
    pub const EXECUTE: Self = Self(0b001);
    /// Write.
    pub const WRITE: Self = Self(0b010);
    /// Write and execute.
    pub const WRITE_EXECUTE: Self = Self(0b011);
    /// Read.
    pub const READ: Self = Self(0b100);
    /// Read and execute.
    pub const READ_EXECUTE: Self = Self(0b101);
    /// Read and write.
    pub const READ_WRITE: Self = Self(0b110);
    /// Read, write and execute.
    pub const ALL: Self = Self(0b111);

    /// Builds an action from an octal permission digit, ignoring higher bits.
    #[must_use]
    pub const fn from_octal(digit: u32) -> Self {
        Self((digit & 0o7) as u8)
    }

    /// Returns the action as an octal permission digit.
    #[must_use]
    pub const fn to_octal(self) -> u32 {
        self.0 as u32
    }

    /// Decodes a canonical three character symbol such as `r-x`.
    ///
    /// Returns `None` for anything that is not one of the eight canonical
    /// symbols; matching is case-sensitive.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOLS
            .iter()
            .position(|candidate| *candidate == symbol)
            .map(|bits| Self(bits as u8))
    }

    /// Returns the canonical three character symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        SYMBOLS[self.0 as usize]
    }

    /// Reports whether every bit of `other` is also set in `self`.
    #[must_use]
    pub const fn implies(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Bits present in either action.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for FsAction {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for FsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
