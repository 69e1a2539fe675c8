use serde::Serialize;

use super::GridCell;

/// Categorical intensity for a heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatLevel {
    /// Padding outside the series range.
    Outside,
    /// Exactly zero.
    None,
    /// Below 20%.
    Low,
    /// Below 50%.
    Medium,
    /// Below 100%.
    High,
    /// Everything done.
    Full,
}

impl HeatLevel {
    /// Buckets a percentage.
    #[must_use]
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage <= 0.0 {
            Self::None
        } else if percentage < 0.2 {
            Self::Low
        } else if percentage < 0.5 {
            Self::Medium
        } else if percentage < 1.0 {
            Self::High
        } else {
            Self::Full
        }
    }

    /// Level of a grid cell; placeholders are [`HeatLevel::Outside`].
    #[must_use]
    pub fn of(cell: &GridCell) -> Self {
        if cell.in_range {
            Self::from_percentage(cell.percentage)
        } else {
            Self::Outside
        }
    }

    /// Single-character rendering for terminal output.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Outside => ' ',
            Self::None => '·',
            Self::Low => '░',
            Self::Medium => '▒',
            Self::High => '▓',
            Self::Full => '█',
        }
    }
}
