//! Match modes controlling overlap and length selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Whether overlapping occurrences are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    /// Report every occurrence; the next candidate start is one character
    /// after the current one.
    #[default]
    Dense,
    /// After a match, resume scanning strictly after its end.
    Sparse,
}

/// Whether extension continues past the first keyword end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Greediness {
    /// Keep extending to find longer keywords sharing the prefix.
    #[default]
    Greedy,
    /// Stop at the first keyword end.
    Lazy,
}

/// A density and greediness pair.
///
/// Parses from and prints as `"<density>-<greediness>"`, for example
/// `"sparse-lazy"`. Underscores and `+` are also accepted as separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchMode {
    /// Overlap policy.
    pub density: Density,
    /// Length policy.
    pub greediness: Greediness,
}

impl MatchMode {
    /// Report everything, extending as far as possible.
    pub const DENSE_GREEDY: Self = Self::new(Density::Dense, Greediness::Greedy);
    /// Report everything, restarting after the first keyword end.
    pub const DENSE_LAZY: Self = Self::new(Density::Dense, Greediness::Lazy);
    /// Non-overlapping matches.
    pub const SPARSE_GREEDY: Self = Self::new(Density::Sparse, Greediness::Greedy);
    /// Non-overlapping matches, stopping at the first keyword end.
    pub const SPARSE_LAZY: Self = Self::new(Density::Sparse, Greediness::Lazy);

    /// Create a mode from its two policies.
    #[must_use]
    pub const fn new(density: Density, greediness: Greediness) -> Self {
        Self {
            density,
            greediness,
        }
    }

    /// True for [`Density::Sparse`].
    #[must_use]
    pub fn is_sparse(&self) -> bool {
        self.density == Density::Sparse
    }

    /// True for [`Greediness::Lazy`].
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        self.greediness == Greediness::Lazy
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dense => write!(f, "dense"),
            Self::Sparse => write!(f, "sparse"),
        }
    }
}

impl fmt::Display for Greediness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => write!(f, "greedy"),
            Self::Lazy => write!(f, "lazy"),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.density, self.greediness)
    }
}

impl FromStr for MatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let Some((density, greediness)) = normalized.split_once(['-', '_', '+']) else {
            return Err(Error::invalid_argument(format!(
                "match mode '{s}' must look like 'dense-greedy'"
            )));
        };

        let density = match density {
            "dense" => Density::Dense,
            "sparse" => Density::Sparse,
            other => {
                return Err(Error::invalid_argument(format!(
                    "unknown density '{other}' (expected dense or sparse)"
                )))
            }
        };
        let greediness = match greediness {
            "greedy" => Greediness::Greedy,
            "lazy" => Greediness::Lazy,
            other => {
                return Err(Error::invalid_argument(format!(
                    "unknown greediness '{other}' (expected greedy or lazy)"
                )))
            }
        };

        Ok(Self::new(density, greediness))
    }
}

impl TryFrom<String> for MatchMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MatchMode> for String {
    fn from(mode: MatchMode) -> Self {
        mode.to_string()
    }
}
