//! Rendering options.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How `**bold**` and `*italic*` spans are matched on a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisMatching {
    /// One span from the first delimiter to the last one on the line.
    ///
    /// `**a** and **b**` becomes a single strong span. This is the dialect's
    /// historical behavior.
    #[default]
    Greedy,

    /// Every delimiter pair is its own span.
    Balanced,
}

impl FromStr for EmphasisMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "balanced" => Ok(Self::Balanced),
            other => Err(format!("unknown emphasis matching '{other}'")),
        }
    }
}

/// Options accepted by [`render_with`](super::render_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub emphasis: EmphasisMatching,
}

impl RenderOptions {
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            emphasis: EmphasisMatching::Balanced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_emphasis_names() {
        assert_eq!("greedy".parse(), Ok(EmphasisMatching::Greedy));
        assert_eq!(" Balanced ".parse(), Ok(EmphasisMatching::Balanced));
        assert!("lazy".parse::<EmphasisMatching>().is_err());
    }

    #[test]
    fn deserializes_from_toml() {
        let options: RenderOptions = toml::from_str("emphasis = \"balanced\"").unwrap();
        assert_eq!(options, RenderOptions::balanced());

        let options: RenderOptions = toml::from_str("").unwrap();
        assert_eq!(options.emphasis, EmphasisMatching::Greedy);
    }
}
