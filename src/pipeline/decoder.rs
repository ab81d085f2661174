use crate::errors::{AppError, AppResult};
use crate::models::{FrontMatter, Note, RawBlock};
use serde::Deserialize;
use serde_yaml::Value;

pub fn decode_blocks(blocks: &[RawBlock<'_>]) -> AppResult<Vec<Note>> {
    blocks
        .iter()
        .enumerate()
        .map(|(position, block)| -> AppResult<Note> {
            let front_matter = decode_front_matter(block.metadata).map_err(|message| {
                tracing::warn!(note = position + 1, error = %message, "failed to decode note metadata");
                AppError::Decode {
                    index: position + 1,
                    message,
                }
            })?;
            Ok(Note::from_parts(front_matter, block.body))
        })
        .collect()
}

// Plain scalars deserialized as `String` keep their source text, so `0x10`
// or `2.50` are not normalised the way a resolved `Value::Number` would be.
#[derive(Debug, Deserialize)]
struct RawFrontMatter {
    title: Option<String>,
    date: Option<String>,
    tags: Option<Vec<String>>,
}

/// Absent or null fields decode to empty values; validation decides whether
/// that is acceptable.
pub fn decode_front_matter(metadata: &str) -> Result<FrontMatter, String> {
    if metadata.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let value: Value = serde_yaml::from_str(metadata).map_err(|error| error.to_string())?;
    match value {
        Value::Mapping(_) => {}
        Value::Null => return Ok(FrontMatter::default()),
        other => {
            return Err(format!(
                "expected a mapping of fields, found {}",
                value_kind(&other)
            ))
        }
    }

    let raw: RawFrontMatter = serde_yaml::from_str(metadata).map_err(|error| error.to_string())?;
    Ok(FrontMatter {
        title: raw.title.unwrap_or_default(),
        date: raw.date.unwrap_or_default(),
        tags: raw.tags.unwrap_or_default(),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_all_fields() {
        let front_matter =
            decode_front_matter("title: First Note\ndate: 2023-10-01\ntags:\n  - test\n  - rust\n")
                .expect("decoded");
        assert_eq!(front_matter.title, "First Note");
        assert_eq!(front_matter.date, "2023-10-01");
        assert_eq!(front_matter.tags, vec!["test", "rust"]);
    }

    #[test]
    fn absent_and_null_fields_are_empty() {
        let front_matter = decode_front_matter("title:\ntags:\n").expect("decoded");
        assert_eq!(front_matter, FrontMatter::default());
        assert_eq!(decode_front_matter("  \n").expect("decoded"), FrontMatter::default());
    }

    #[test]
    fn scalar_numbers_keep_their_text() {
        let front_matter = decode_front_matter("title: 42\ndate: 2023-10-01\ntags: [1, true]\n").expect("decoded");
        assert_eq!(front_matter.title, "42");
        assert_eq!(front_matter.tags, vec!["1", "true"]);
    }

    #[test]
    fn numeric_looking_scalars_keep_source_spelling() {
        let front_matter = decode_front_matter(
            "title: 1e3\ndate: 2023-10-01\ntags:\n  - 0x10\n  - 1e3\n  - 1_000\n  - 2.50\n",
        )
        .expect("decoded");
        assert_eq!(front_matter.title, "1e3");
        assert_eq!(front_matter.tags, vec!["0x10", "1e3", "1_000", "2.50"]);
    }

    #[test]
    fn rejects_non_mapping_documents() {
        let error = decode_front_matter("just some words").expect_err("not a mapping");
        assert!(error.contains("expected a mapping"));
    }

    #[test]
    fn rejects_nested_and_scalar_tag_values() {
        assert!(decode_front_matter("title:\n  nested: yes\n").is_err());
        assert!(decode_front_matter("title: T\ntags: single\n").is_err());
        assert!(decode_front_matter("title: T\ntags:\n  - [a, b]\n").is_err());
    }

    #[test]
    fn malformed_yaml_is_a_decode_error_with_position() {
        let blocks = vec![
            RawBlock {
                metadata: "title: ok\ndate: 2024-01-01\n",
                body: "one",
            },
            RawBlock {
                metadata: "title: [unclosed\n",
                body: "two",
            },
        ];
        let error = decode_blocks(&blocks).expect_err("must fail");
        match error {
            AppError::Decode { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn body_is_trimmed_into_content() {
        let blocks = vec![RawBlock {
            metadata: "title: T\ndate: 2024-01-01\n",
            body: "\n\n  Body text\n\n",
        }];
        let notes = decode_blocks(&blocks).expect("decoded");
        assert_eq!(notes[0].content, "Body text");
        assert!(notes[0].tags.is_empty());
    }
}
