use std::fmt;

use serde::Serialize;

/// One prompt-driven transformation of the working document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Identity, summary and timing fields with empty ingredient/step placeholders
    Skeleton,
    /// Ingredient entries with amounts, units and prep flags
    Ingredients,
    /// Discrete steps with durations, resources and type
    Steps,
    /// Cross-references, groups and metadata
    Linking,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 4] = [
        Stage::Skeleton,
        Stage::Ingredients,
        Stage::Steps,
        Stage::Linking,
    ];

    /// 1-based position in the pipeline
    pub fn number(self) -> u8 {
        match self {
            Stage::Skeleton => 1,
            Stage::Ingredients => 2,
            Stage::Steps => 3,
            Stage::Linking => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Skeleton => "Extracting metadata & skeleton",
            Stage::Ingredients => "Normalizing ingredients & prep detection",
            Stage::Steps => "Sequencing steps & durations",
            Stage::Linking => "Semantic linking & grouping",
        }
    }

    /// Whether the generator is handed the current working document.
    ///
    /// The skeleton stage starts from the raw text alone; every later stage
    /// edits what the previous one wrote.
    pub fn uses_context(self) -> bool {
        !matches!(self, Stage::Skeleton)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage {}: {}", self.number(), self.label())
    }
}
