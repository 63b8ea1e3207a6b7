// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Which repetitions count as a match

use std::fmt;
use std::str::FromStr;

/// Rule deciding how many copies of a block make a match
///
/// `AtLeastTwice` accepts `121212` (three copies of `12`); `Twice` only accepts
/// numbers made of two equal halves such as `123123`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Repetition {
    /// Exactly two copies of a block
    Twice,
    /// Two or more copies of a block
    #[default]
    AtLeastTwice,
}

impl Repetition {
    /// Whether a full-width number made of `copies` blocks qualifies
    pub fn accepts_copies(self, copies: u32) -> bool {
        match self {
            Repetition::Twice => copies == 2,
            Repetition::AtLeastTwice => copies >= 2,
        }
    }

    /// Block widths to scan for numbers `width` digits wide, ascending
    ///
    /// Every width divides `width` evenly and is at most `width / 2`.
    pub fn block_widths(self, width: u32) -> impl Iterator<Item = u32> {
        (1..=width / 2)
            .filter(move |block| width % block == 0 && self.accepts_copies(width / block))
    }

    /// Checks a single number against this rule by inspecting its digits
    ///
    /// This is the slow, obviously-correct definition. Enumeration never calls
    /// it; it vets persisted records and narrows cached matches to halves.
    pub fn is_match(self, id: u64) -> bool {
        let digits = id.to_string();
        let bytes = digits.as_bytes();
        let width = bytes.len() as u32;

        self.block_widths(width).any(|block| {
            let pattern = &bytes[..block as usize];
            bytes.chunks(block as usize).all(|chunk| chunk == pattern)
        })
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repetition::Twice => write!(f, "twice"),
            Repetition::AtLeastTwice => write!(f, "at-least-twice"),
        }
    }
}

impl FromStr for Repetition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "twice" | "2" => Ok(Repetition::Twice),
            "at-least-twice" | "any" => Ok(Repetition::AtLeastTwice),
            other => Err(format!(
                "unknown repetition rule '{other}' (expected 'twice' or 'at-least-twice')"
            )),
        }
    }
}
