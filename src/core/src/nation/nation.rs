use serde::{Deserialize, Serialize};
use std::fmt;

/// Continental confederation a nation belongs to. Used by the host rotation
/// and by the draw's same-confederation group limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confederation {
    Uefa,
    Conmebol,
    Concacaf,
    Caf,
    Afc,
    Ofc,
}

impl fmt::Display for Confederation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Confederation::Uefa => "UEFA",
            Confederation::Conmebol => "CONMEBOL",
            Confederation::Concacaf => "CONCACAF",
            Confederation::Caf => "CAF",
            Confederation::Afc => "AFC",
            Confederation::Ofc => "OFC",
        };
        write!(f, "{}", name)
    }
}

/// Name-pool key for roster generation. A closed set: nations whose naming
/// tradition is not modelled explicitly fall back to [`Culture::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Culture {
    English,
    Hispanic,
    Brazilian,
    French,
    Germanic,
    Italian,
    Nordic,
    Slavic,
    WestAfrican,
    Arabic,
    EastAsian,
    Default,
}

/// Immutable reference data for one national side. Shared by value across all
/// editions; nothing in the engine ever mutates a nation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nation {
    pub code: String,
    pub name: String,
    pub confederation: Confederation,
    pub rating: u8,
    pub culture: Culture,
}

impl Nation {
    pub fn new(
        code: &str,
        name: &str,
        confederation: Confederation,
        rating: u8,
        culture: Culture,
    ) -> Self {
        Nation {
            code: code.to_string(),
            name: name.to_string(),
            confederation,
            rating,
            culture,
        }
    }
}
