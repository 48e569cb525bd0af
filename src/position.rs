use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

/// A player's primary on-field role as recorded in the profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Attack,
    Defender,
    Goalkeeper,
    Midfield,
}

impl Position {
    /// Ordered by name, which is also the order split files are written in.
    pub const ALL: [Position; 4] = [
        Position::Attack,
        Position::Defender,
        Position::Goalkeeper,
        Position::Midfield,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Attack => "Attack",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
            Position::Midfield => "Midfield",
        }
    }

    /// Lowercase stem used in the per-position file names of stages 3-5.
    pub fn file_stem(self) -> &'static str {
        match self {
            Position::Attack => "attack",
            Position::Defender => "defender",
            Position::Goalkeeper => "goalkeeper",
            Position::Midfield => "midfield",
        }
    }

    /// Exact match against the profile value; other spellings are not a
    /// recognised position.
    pub fn from_profile(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == raw)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    /// Lenient parse for configuration input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| anyhow!("unknown position: {trimmed}"))
    }
}
