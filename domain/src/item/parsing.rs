//! Item batch parsing from LLM responses.
//!
//! Extracts structured [`Item`]s from generation responses. Supports
//! ` ```json` fenced code blocks, raw JSON, and a bare JSON object embedded
//! in surrounding prose. This is pure domain logic — no I/O.
//!
//! Expected schema:
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "kind": "multiple_choice",
//!       "content": "...",
//!       "answer": "...",
//!       "options": ["A", "B", "C", "D"]
//!     }
//!   ]
//! }
//! ```
//!
//! A response that yields no parseable object at all is a hard
//! [`ItemParseError`]; the caller degrades that to an empty batch and a
//! telemetry event. Individually malformed entries (empty content, missing
//! required answer) are skipped without failing the batch.

use super::entities::{Item, ItemKind};
use thiserror::Error;

/// Errors from parsing a generation response into an item batch
#[derive(Error, Debug)]
pub enum ItemParseError {
    #[error("No JSON object found in response")]
    NoJson,

    #[error("Response JSON has no \"items\" array")]
    MissingItemsArray,
}

/// Parse a generation response into a batch of items.
///
/// Entries are validated individually: an entry with empty `content`, or an
/// empty `answer` for a kind that requires one, is dropped. A missing `kind`
/// defaults to `short_answer`. Unknown top-level entry fields land in the
/// item's attribute map.
pub fn parse_item_batch(response: &str) -> Result<Vec<Item>, ItemParseError> {
    let json = extract_json(response).ok_or(ItemParseError::NoJson)?;

    let entries = json
        .get("items")
        .and_then(|v| v.as_array())
        .ok_or(ItemParseError::MissingItemsArray)?;

    Ok(entries.iter().filter_map(parse_entry).collect())
}

/// Parse a single entry, returning `None` if it fails schema validation
fn parse_entry(entry: &serde_json::Value) -> Option<Item> {
    let content = entry.get("content").and_then(|v| v.as_str())?.trim();
    if content.is_empty() {
        return None;
    }

    let kind: ItemKind = entry
        .get("kind")
        .and_then(|v| v.as_str())
        .unwrap_or("short_answer")
        .parse()
        .unwrap_or(ItemKind::ShortAnswer);

    let answer = entry
        .get("answer")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim();
    if answer.is_empty() && kind.requires_answer() {
        return None;
    }

    let mut item = Item::new(kind, content, answer);
    if let Some(object) = entry.as_object() {
        for (key, value) in object {
            if !matches!(key.as_str(), "kind" | "content" | "answer") {
                item.attributes.insert(key.clone(), value.clone());
            }
        }
    }

    Some(item)
}

/// Find a JSON object in the response text.
///
/// 1. ` ```json` (or unlabeled ` ``` `) fenced blocks
/// 2. The entire response as raw JSON
/// 3. The outermost `{...}` span embedded in prose
fn extract_json(response: &str) -> Option<serde_json::Value> {
    let mut in_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();
        if !in_block && (trimmed == "```json" || trimmed == "```") {
            in_block = true;
            current_block.clear();
        } else if in_block && trimmed == "```" {
            in_block = false;
            if let Ok(parsed) = serde_json::from_str(&current_block) {
                return Some(parsed);
            }
        } else if in_block {
            current_block.push_str(line);
            current_block.push('\n');
        }
    }

    if let Ok(parsed) = serde_json::from_str(response.trim()) {
        return Some(parsed);
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_json_batch() {
        let response = r#"{
            "items": [
                {"kind": "multiple_choice", "content": "Pick the law of demand.", "answer": "A", "options": ["A", "B", "C", "D"]},
                {"kind": "short_answer", "content": "Define price elasticity.", "answer": "Sensitivity of demand to price."}
            ]
        }"#;

        let items = parse_item_batch(response).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ItemKind::MultipleChoice);
        assert_eq!(items[0].options().unwrap().len(), 4);
        assert_eq!(items[1].kind, ItemKind::ShortAnswer);
    }

    #[test]
    fn test_parse_fenced_block() {
        let response = r#"Here are the questions:
```json
{"items": [{"kind": "short_answer", "content": "What is market equilibrium?", "answer": "Supply equals demand."}]}
```
Let me know if you need more."#;

        let items = parse_item_batch(response).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_embedded_object() {
        let response = r#"Sure! {"items": [{"kind": "true_false", "content": "Demand curves slope down.", "answer": "true"}]} Done."#;
        let items = parse_item_batch(response).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::TrueFalse);
    }

    #[test]
    fn test_no_json_is_error() {
        assert!(matches!(
            parse_item_batch("I could not produce questions."),
            Err(ItemParseError::NoJson)
        ));
    }

    #[test]
    fn test_missing_items_array_is_error() {
        assert!(matches!(
            parse_item_batch(r#"{"questions": []}"#),
            Err(ItemParseError::MissingItemsArray)
        ));
    }

    #[test]
    fn test_empty_content_entry_skipped() {
        let response = r#"{"items": [
            {"kind": "short_answer", "content": "", "answer": "x"},
            {"kind": "short_answer", "content": "Valid question?", "answer": "Yes."}
        ]}"#;
        let items = parse_item_batch(response).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "Valid question?");
    }

    #[test]
    fn test_missing_answer_skipped_for_requiring_kind() {
        let response = r#"{"items": [
            {"kind": "multiple_choice", "content": "No answer given."},
            {"kind": "essay", "content": "Discuss consumer surplus."}
        ]}"#;
        let items = parse_item_batch(response).unwrap();
        // Essay does not require an answer, multiple choice does
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ItemKind::Essay);
    }

    #[test]
    fn test_missing_kind_defaults_to_short_answer() {
        let response = r#"{"items": [{"content": "Define scarcity.", "answer": "Limited resources."}]}"#;
        let items = parse_item_batch(response).unwrap();
        assert_eq!(items[0].kind, ItemKind::ShortAnswer);
    }

    #[test]
    fn test_extra_fields_become_attributes() {
        let response = r#"{"items": [{"kind": "short_answer", "content": "Q", "answer": "A", "difficulty": "hard"}]}"#;
        let items = parse_item_batch(response).unwrap();
        assert_eq!(
            items[0].attributes.get("difficulty"),
            Some(&serde_json::json!("hard"))
        );
    }
}
