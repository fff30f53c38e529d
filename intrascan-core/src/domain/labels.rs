//! Directional labels shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short-term structure inferred from the last three highs and lows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureLabel {
    Bullish,
    Bearish,
    Neutral,
}

/// Overall benchmark direction. Uses the same three labels as structure.
pub type MarketTrend = StructureLabel;

impl StructureLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureLabel::Bullish => "BULLISH",
            StructureLabel::Bearish => "BEARISH",
            StructureLabel::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for StructureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directional stance of a candidate setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Long,
    Short,
    None,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Long => "LONG",
            Bias::Short => "SHORT",
            Bias::None => "NONE",
        }
    }

    /// The structure/trend label that agrees with this bias.
    pub fn aligned_label(&self) -> Option<StructureLabel> {
        match self {
            Bias::Long => Some(StructureLabel::Bullish),
            Bias::Short => Some(StructureLabel::Bearish),
            Bias::None => None,
        }
    }

    /// The trend label that opposes this bias.
    pub fn opposing_label(&self) -> Option<StructureLabel> {
        match self {
            Bias::Long => Some(StructureLabel::Bearish),
            Bias::Short => Some(StructureLabel::Bullish),
            Bias::None => None,
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
