//! Constants describing the Roux recipe document.
//!
//! These are interpolated into stage prompts only. Nothing here inspects
//! the generated YAML; conformance is left to the external validator.

/// Schema the generated document is expected to follow
pub const RECIPE_SCHEMA: &str = "recipe/simple-v5.1";

/// Top-level keys of a complete recipe document
pub const TOP_LEVEL_FIELDS: [&str; 13] = [
    "id",
    "slug",
    "title",
    "summary",
    "yield",
    "total_time",
    "ingredients",
    "steps",
    "ingredient_groups",
    "step_groups",
    "notes",
    "tags",
    "equipment",
];

/// Fields populated by the skeleton stage
pub const SKELETON_FIELDS: [&str; 6] = ["id", "slug", "title", "summary", "yield", "total_time"];

/// Fields of each ingredient entry
pub const INGREDIENT_FIELDS: [&str; 5] = ["name", "amount", "unit", "note", "requires_prep"];

/// Passive waits longer than this many minutes make a step `long-lead`
pub const LONG_LEAD_WAIT_MINUTES: u32 = 30;

/// Step type for serving and garnish steps
pub const STEP_TYPE_TERMINAL: &str = "terminal";

/// Step type for steps dominated by a long passive wait
pub const STEP_TYPE_LONG_LEAD: &str = "long-lead";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_fields_are_top_level() {
        for field in SKELETON_FIELDS {
            assert!(TOP_LEVEL_FIELDS.contains(&field), "{field} missing");
        }
    }
}
