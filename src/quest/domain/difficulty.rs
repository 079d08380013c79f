//! Quest difficulty vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quest difficulty, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Derived from `low` or absent priority.
    Beginner,
    /// Derived from `medium` priority.
    Intermediate,
    /// Derived from `high` priority.
    Advanced,
}

impl Difficulty {
    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
