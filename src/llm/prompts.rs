use crate::models::{
    INGREDIENT_FIELDS, LONG_LEAD_WAIT_MINUTES, RECIPE_SCHEMA, SKELETON_FIELDS, STEP_TYPE_LONG_LEAD,
    STEP_TYPE_TERMINAL, Stage, TOP_LEVEL_FIELDS,
};

/// System prompt for API-backed generators.
///
/// Subprocess generators get the stage prompt alone; the API backend needs to
/// be told that only the document itself may come back.
pub const SYSTEM_PROMPT: &str = r#"You are compiling a cooking recipe into Roux YAML.

RULES:
1. Respond with the complete YAML document and nothing else. No prose, no code fences.
2. Only touch the fields the instructions name. Keep every other field exactly as it is.
3. Never invent ingredients or steps that the raw text does not support.
4. Identifiers must be unique and every reference must point at an existing identifier."#;

/// Build the prompt for one stage.
///
/// Every prompt embeds the raw recipe text verbatim; stages after the
/// skeleton also receive the working document as a context file.
pub fn build_stage_prompt(stage: Stage, raw_text: &str) -> String {
    let mut prompt = String::new();

    match stage {
        Stage::Skeleton => {
            prompt.push_str("Transform this raw recipe text into a Roux YAML skeleton.\n");
            prompt.push_str(&format!(
                "Focus ONLY on: {}.\n",
                join_fields(&SKELETON_FIELDS)
            ));
            prompt.push_str(&format!("Schema: '{}'\n", RECIPE_SCHEMA));
            prompt.push_str("Include empty placeholders for ingredients and steps.\n");
            prompt.push_str("\nTEXT:\n");
        }
        Stage::Ingredients => {
            prompt.push_str(
                "Update the 'ingredients' list in the provided YAML based on the original raw text.\n",
            );
            prompt.push_str(&format!(
                "Focus ONLY on: {}.\n",
                join_fields(&INGREDIENT_FIELDS)
            ));
            prompt.push_str(
                "- Set 'requires_prep: true' if the text implies work (e.g. diced, minced).\n",
            );
            prompt.push_str("- Assign unique IDs like 'f-garlic'.\n");
            prompt.push_str("- Keep existing metadata.\n");
            prompt.push_str("\nRAW TEXT:\n");
        }
        Stage::Steps => {
            prompt.push_str(
                "Update the 'steps' list in the provided YAML based on the original raw text.\n",
            );
            prompt.push_str(
                "Focus ONLY on: discrete steps, work_m (active), wait_m (passive), resources, and type.\n",
            );
            prompt.push_str("- Break prose into executable steps.\n");
            prompt.push_str(&format!(
                "- '{}' type for serving/garnish.\n",
                STEP_TYPE_TERMINAL
            ));
            prompt.push_str(&format!(
                "- '{}' for >{}m passive waits.\n",
                STEP_TYPE_LONG_LEAD, LONG_LEAD_WAIT_MINUTES
            ));
            prompt.push_str("- Keep ingredients and metadata intact.\n");
            prompt.push_str("\nRAW TEXT:\n");
        }
        Stage::Linking => {
            prompt.push_str("Finalize the YAML by linking ingredients to steps and creating groups.\n");
            prompt.push_str("Focus ONLY on:\n");
            prompt.push_str("- Populate 'uses' lists in steps with ingredient IDs.\n");
            prompt.push_str("- Create 'ingredient_groups' and 'step_groups'.\n");
            prompt.push_str("- Add 'notes', 'tags', and 'equipment'.\n");
            prompt.push_str("- Ensure all ID references are correct.\n");
            prompt.push_str(&format!(
                "The finished document has these top-level fields: {}.\n",
                join_fields(&TOP_LEVEL_FIELDS)
            ));
            prompt.push_str("\nRAW TEXT:\n");
        }
    }

    prompt.push_str(raw_text);
    if !raw_text.ends_with('\n') {
        prompt.push('\n');
    }

    prompt
}

fn join_fields(fields: &[&str]) -> String {
    match fields.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "2 cups flour, 1 egg. Mix and bake for 45 minutes.";

    #[test]
    fn test_every_prompt_embeds_raw_text() {
        for stage in Stage::ALL {
            let prompt = build_stage_prompt(stage, RAW);
            assert!(prompt.contains(RAW), "{stage} prompt lacks raw text");
        }
    }

    #[test]
    fn test_skeleton_prompt_names_schema_and_fields() {
        let prompt = build_stage_prompt(Stage::Skeleton, RAW);
        assert!(prompt.contains("recipe/simple-v5.1"));
        assert!(prompt.contains("id, slug, title, summary, yield, and total_time"));
        assert!(prompt.contains("empty placeholders for ingredients and steps"));
    }

    #[test]
    fn test_ingredient_prompt_asks_for_prep_flag() {
        let prompt = build_stage_prompt(Stage::Ingredients, RAW);
        assert!(prompt.contains("requires_prep: true"));
        assert!(prompt.contains("f-garlic"));
        assert!(prompt.contains("Keep existing metadata"));
    }

    #[test]
    fn test_steps_prompt_states_long_lead_threshold() {
        let prompt = build_stage_prompt(Stage::Steps, RAW);
        assert!(prompt.contains("'long-lead' for >30m passive waits"));
        assert!(prompt.contains("'terminal' type"));
        assert!(prompt.contains("work_m"));
        assert!(prompt.contains("wait_m"));
    }

    #[test]
    fn test_linking_prompt_lists_groups_and_metadata() {
        let prompt = build_stage_prompt(Stage::Linking, RAW);
        assert!(prompt.contains("'uses'"));
        assert!(prompt.contains("'ingredient_groups' and 'step_groups'"));
        assert!(prompt.contains("equipment"));
    }

    #[test]
    fn test_join_fields() {
        assert_eq!(join_fields(&["a"]), "a");
        assert_eq!(join_fields(&["a", "b", "c"]), "a, b, and c");
        assert_eq!(join_fields(&[]), "");
    }
}
