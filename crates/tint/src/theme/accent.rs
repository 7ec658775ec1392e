//! The closed set of accent color tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseAccentError;

/// Decorative color identity, independent of light/dark.
///
/// The token of each variant (see [`Accent::as_str`]) is both the persisted
/// value and the class name placed on the document root.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Zinc,
    #[default]
    Slate,
    Stone,
    Gray,
    Neutral,
    Red,
    Rose,
    Orange,
    Green,
    Blue,
    Yellow,
    Violet,
}

impl Accent {
    /// Every accent, in canonical order.
    pub const ALL: [Accent; 12] = [
        Accent::Zinc,
        Accent::Slate,
        Accent::Stone,
        Accent::Gray,
        Accent::Neutral,
        Accent::Red,
        Accent::Rose,
        Accent::Orange,
        Accent::Green,
        Accent::Blue,
        Accent::Yellow,
        Accent::Violet,
    ];

    /// The lowercase token for this accent.
    pub fn as_str(self) -> &'static str {
        match self {
            Accent::Zinc => "zinc",
            Accent::Slate => "slate",
            Accent::Stone => "stone",
            Accent::Gray => "gray",
            Accent::Neutral => "neutral",
            Accent::Red => "red",
            Accent::Rose => "rose",
            Accent::Orange => "orange",
            Accent::Green => "green",
            Accent::Blue => "blue",
            Accent::Yellow => "yellow",
            Accent::Violet => "violet",
        }
    }

    /// Iterates over all tokens in canonical order.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|accent| accent.as_str())
    }
}

impl FromStr for Accent {
    type Err = ParseAccentError;

    /// Exact token match. Case and surrounding whitespace are significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|accent| accent.as_str() == s)
            .ok_or_else(|| ParseAccentError(s.to_string()))
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Accent> for String {
    fn from(accent: Accent) -> Self {
        accent.as_str().to_string()
    }
}
