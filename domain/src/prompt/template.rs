//! Prompt templates for the pipeline flow

use crate::evaluation::entities::Provenance;
use crate::evaluation::parsing::{APPLICABLE_TOKEN, OUTDATED_TOKEN};
use crate::item::entities::Item;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the task understanding stage
    pub fn task_understanding_system() -> &'static str {
        r#"You are a teaching assistant preparing a question-authoring task.
Rewrite the teacher's instructions as a precise, self-contained task description
suitable for generating test questions. Keep every constraint the teacher stated
(number of questions, question kinds, topics, answer requirements)."#
    }

    /// User prompt for the task understanding stage
    pub fn task_understanding(teacher_prompt: &str) -> String {
        format!(
            r#"Teacher instructions:

{}

Output only the rewritten task description."#,
            teacher_prompt
        )
    }

    /// System prompt for item generation
    pub fn generation_system() -> &'static str {
        r#"You are an exam author. Generate test questions strictly grounded in the
knowledge passages you are given. Every question must be answerable from the
passages. Respond with JSON only, no surrounding prose."#
    }

    /// User prompt for item generation, with format instructions
    pub fn generate_items(task_description: &str, knowledge: &str) -> String {
        format!(
            r#"Task description:
{task_description}

Retrieved knowledge:
{knowledge}

Generate the questions as a JSON object in exactly this shape:

{{
  "items": [
    {{
      "kind": "multiple_choice",
      "content": "...",
      "answer": "...",
      "options": ["A", "B", "C", "D"]
    }},
    {{
      "kind": "short_answer",
      "content": "...",
      "answer": "..."
    }}
  ]
}}

Output only the JSON object."#
        )
    }

    /// User prompt for the applicability check on a previously accepted item
    pub fn applicability_check(item_content: &str, knowledge: &str) -> String {
        format!(
            r#"An existing test question:

{item_content}

The most recent relevant knowledge from the knowledge base:

{knowledge}

Judge whether the question is still applicable for current teaching, given
this knowledge. Reply with exactly one word: {APPLICABLE_TOKEN} if it is
still usable, {OUTDATED_TOKEN} if it is not."#
        )
    }

    /// User prompt for scoring an item.
    ///
    /// New items get the extra similarity-to-bank dimension; existing items
    /// are scored on the base dimensions only.
    pub fn score_item(item: &Item, provenance: Provenance) -> String {
        let status = match provenance {
            Provenance::New => "newly generated",
            Provenance::Existing => "existing",
        };
        let extra_dimension = if provenance.is_new() {
            ", similarity to questions already in the bank"
        } else {
            ""
        };

        format!(
            r#"Assess the quality of this {status} test question and give an integer
score from 0 to 100.

Question: {content}
Answer: {answer}

Dimensions: faithfulness to the source material, answer relevance, context
relevance{extra_dimension}.

Output only the number."#,
            content = item.content,
            answer = item.answer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::entities::ItemKind;

    #[test]
    fn test_task_understanding_embeds_prompt() {
        let prompt = PromptTemplate::task_understanding("Two questions on supply and demand.");
        assert!(prompt.contains("Two questions on supply and demand."));
    }

    #[test]
    fn test_applicability_prompt_names_both_tokens() {
        let prompt = PromptTemplate::applicability_check("Old question", "Fresh knowledge");
        assert!(prompt.contains(APPLICABLE_TOKEN));
        assert!(prompt.contains(OUTDATED_TOKEN));
    }

    #[test]
    fn test_scoring_dimension_depends_on_provenance() {
        let item = Item::new(ItemKind::ShortAnswer, "Define elasticity.", "Sensitivity.");

        let new_prompt = PromptTemplate::score_item(&item, Provenance::New);
        assert!(new_prompt.contains("similarity to questions already in the bank"));

        let existing_prompt = PromptTemplate::score_item(&item, Provenance::Existing);
        assert!(!existing_prompt.contains("similarity to questions already in the bank"));
    }

    #[test]
    fn test_generation_prompt_carries_schema() {
        let prompt = PromptTemplate::generate_items("task", "knowledge");
        assert!(prompt.contains("\"items\""));
        assert!(prompt.contains("multiple_choice"));
    }
}
