//! Glitch Tier Classification
//!
//! Maps the request's glitch slider value to one of three ordinal severity
//! tiers. The tier drives how strongly visual-distortion language appears in
//! both the world-state prompt and the per-landmark image prompts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal glitch severity, totally ordered Minor < Unstable < Chaotic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum GlitchTier {
    #[default]
    Minor,
    Unstable,
    Chaotic,
}

impl GlitchTier {
    /// Classify a slider value in `[0, 100]`.
    ///
    /// Pure and total over finite input; non-finite values are rejected by
    /// request validation before this is reached. Bands are inclusive on
    /// their lower bound: `<34` Minor, `<67` Unstable, else Chaotic.
    pub fn from_slider(v: f64) -> Self {
        if v < 34.0 {
            GlitchTier::Minor
        } else if v < 67.0 {
            GlitchTier::Unstable
        } else {
            GlitchTier::Chaotic
        }
    }

    /// Strength adjective injected into image prompts.
    pub fn strength_phrase(&self) -> &'static str {
        match self {
            GlitchTier::Minor => "subtle, barely noticeable",
            GlitchTier::Unstable => "visible but controlled",
            GlitchTier::Chaotic => "strong and dramatic (still photorealistic)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlitchTier::Minor => "minor",
            GlitchTier::Unstable => "unstable",
            GlitchTier::Chaotic => "chaotic",
        }
    }
}

impl fmt::Display for GlitchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
