use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk profile assigned from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileLabel {
    #[serde(rename = "Conservador")]
    Conservative,
    #[serde(rename = "Moderado")]
    Moderate,
    #[serde(rename = "Balanceado")]
    Balanced,
    #[serde(rename = "Arriesgado / Agresivo")]
    Aggressive,
}

/// Scores strictly below each bound fall into the matching label.
pub const CONSERVATIVE_BELOW: f64 = 20.0;
pub const MODERATE_BELOW: f64 = 40.0;
pub const BALANCED_BELOW: f64 = 60.0;

impl ProfileLabel {
    pub const ALL: [Self; 4] = [
        Self::Conservative,
        Self::Moderate,
        Self::Balanced,
        Self::Aggressive,
    ];

    pub fn from_score(score: f64) -> Self {
        if score < CONSERVATIVE_BELOW {
            Self::Conservative
        } else if score < MODERATE_BELOW {
            Self::Moderate
        } else if score < BALANCED_BELOW {
            Self::Balanced
        } else {
            Self::Aggressive
        }
    }

    /// Display name, as shown to investors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "Conservador",
            Self::Moderate => "Moderado",
            Self::Balanced => "Balanceado",
            Self::Aggressive => "Arriesgado / Agresivo",
        }
    }

    /// URL-friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for ProfileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.slug().eq_ignore_ascii_case(s) || label.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown profile label: {s:?}"))
    }
}
