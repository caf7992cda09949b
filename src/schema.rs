// src/schema.rs
// Declarative validation contract for the problem editor. The rules live in a
// JSON Schema document compiled once; validation walks every violation (no
// short-circuit) into a field-path -> messages map for inline display.

use jsonschema::error::ValidationErrorKind;
use jsonschema::paths::{JSONPointer, PathChunk};
use jsonschema::{Draft, JSONSchema, ValidationError};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Validation errors keyed by field path, e.g. `title`, `tags`,
/// `testcases[1].output`, `codeSnippets.PYTHON`. Each path carries every
/// message reported against it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub struct ProblemSchema {
    compiled: JSONSchema,
}

impl Default for ProblemSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemSchema {
    pub fn new() -> Self {
        let document = problem_schema_document();
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&document)
            .expect("problem schema document is valid");
        Self { compiled }
    }

    /// Validates a serialized draft. An empty map means the draft is
    /// submittable.
    pub fn validate(&self, instance: &Value) -> FieldErrors {
        let mut errors: FieldErrors = BTreeMap::new();
        if let Err(violations) = self.compiled.validate(instance) {
            for violation in violations {
                let path = field_path(&violation.instance_path);
                let message = message_for(&path, &violation);
                errors.entry(path).or_default().push(message);
            }
        }
        errors
    }
}

/// Renders a JSON pointer ("/testcases/0/input") as the dotted/indexed form
/// the form widgets key their inline errors by ("testcases[0].input").
fn field_path(pointer: &JSONPointer) -> String {
    let mut path = String::new();
    for chunk in pointer.iter() {
        match chunk {
            PathChunk::Property(name) => {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(name);
            }
            PathChunk::Index(index) => {
                path.push('[');
                path.push_str(&index.to_string());
                path.push(']');
            }
            PathChunk::Keyword(_) => {}
        }
    }
    path
}

fn leaf(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn language_label(key: &str) -> &str {
    match key {
        "JAVASCRIPT" => "JavaScript",
        "PYTHON" => "Python",
        "JAVA" => "Java",
        other => other,
    }
}

/// Human-readable message per violated rule. Falls back to the validator's
/// own rendering for anything the form does not have bespoke wording for.
fn message_for(path: &str, violation: &ValidationError<'_>) -> String {
    match &violation.kind {
        ValidationErrorKind::MinLength { .. } => match leaf(path) {
            "title" => "Title must be at least 3 characters".to_string(),
            "description" => "Description must be at least 10 characters".to_string(),
            "constraints" => "Constraints are required".to_string(),
            "input" => "Input is required".to_string(),
            "output" => "Output is required".to_string(),
            key if path.starts_with("codeSnippets.") => {
                format!("{} code snippet is required", language_label(key))
            }
            key if path.starts_with("referenceSolutions.") => {
                format!("{} solution is required", language_label(key))
            }
            _ => violation.to_string(),
        },
        ValidationErrorKind::MinItems { .. } => match path {
            "tags" => "At least one tag is required".to_string(),
            "testcases" => "At least one test case is required".to_string(),
            _ => violation.to_string(),
        },
        ValidationErrorKind::Enum { .. } if path == "difficulty" => {
            "Difficulty must be EASY, MEDIUM or HARD".to_string()
        }
        _ => violation.to_string(),
    }
}

fn problem_schema_document() -> Value {
    let non_empty_string = json!({ "type": "string", "minLength": 1 });
    let example = json!({
        "type": "object",
        "required": ["input", "output"],
        "properties": {
            "input": non_empty_string,
            "output": non_empty_string,
            "explanation": { "type": "string" }
        }
    });
    let per_language = |item: &Value| {
        json!({
            "type": "object",
            "required": ["JAVASCRIPT", "PYTHON", "JAVA"],
            "properties": {
                "JAVASCRIPT": item,
                "PYTHON": item,
                "JAVA": item
            }
        })
    };

    json!({
        "type": "object",
        "required": [
            "title", "description", "difficulty", "tags", "constraints",
            "testcases", "examples", "codeSnippets", "referenceSolutions"
        ],
        "properties": {
            "title": { "type": "string", "minLength": 3 },
            "description": { "type": "string", "minLength": 10 },
            "difficulty": { "enum": ["EASY", "MEDIUM", "HARD"] },
            // Length-only rule: a blank string is a valid tag entry.
            "tags": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string" }
            },
            "constraints": non_empty_string,
            "hints": { "type": "string" },
            "editorial": { "type": "string" },
            "testcases": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["input", "output"],
                    "properties": {
                        "input": non_empty_string,
                        "output": non_empty_string
                    }
                }
            },
            "examples": per_language(&example),
            "codeSnippets": per_language(&non_empty_string),
            "referenceSolutions": per_language(&non_empty_string)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ProblemDraft;

    fn filled_draft() -> ProblemDraft {
        let mut draft = ProblemDraft::default();
        draft.title = "Two Sum".to_string();
        draft.description = "Find two numbers adding up to a target.".to_string();
        draft.tags = vec!["array".to_string()];
        draft.constraints = "2 <= n <= 10^4".to_string();
        draft.testcases[0].input = "1 2".to_string();
        draft.testcases[0].output = "3".to_string();
        for language in crate::models::Language::ALL {
            let example = draft.examples.get_mut(language);
            example.input = "nums = [2, 7], target = 9".to_string();
            example.output = "[0, 1]".to_string();
            *draft.code_snippets.get_mut(language) = "// starter".to_string();
            *draft.reference_solutions.get_mut(language) = "// solution".to_string();
        }
        draft
    }

    #[test]
    fn fully_populated_draft_validates_clean() {
        let schema = ProblemSchema::new();
        let errors = schema.validate(&filled_draft().as_value());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn empty_tag_array_reports_at_the_array_path() {
        let schema = ProblemSchema::new();
        let mut draft = filled_draft();
        draft.tags.clear();
        let errors = schema.validate(&draft.as_value());
        assert_eq!(
            errors.get("tags").map(Vec::as_slice),
            Some(&["At least one tag is required".to_string()][..])
        );
    }

    #[test]
    fn missing_testcase_output_reports_the_indexed_path() {
        let schema = ProblemSchema::new();
        let mut draft = filled_draft();
        draft.add_testcase();
        draft.testcases[1].input = "4 5".to_string();
        let errors = schema.validate(&draft.as_value());
        assert!(errors.contains_key("testcases[1].output"));
        assert!(!errors.contains_key("testcases[0].output"));
        assert_eq!(
            errors["testcases[1].output"],
            vec!["Output is required".to_string()]
        );
    }

    #[test]
    fn every_violation_is_reported_not_just_the_first() {
        let schema = ProblemSchema::new();
        let errors = schema.validate(&ProblemDraft::default().as_value());
        // The pristine draft violates rules across unrelated fields at once.
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("description"));
        assert!(errors.contains_key("constraints"));
        assert!(errors.contains_key("testcases[0].input"));
        assert!(errors.contains_key("codeSnippets.JAVASCRIPT"));
        assert!(errors.contains_key("referenceSolutions.JAVA"));
        assert!(errors.contains_key("examples.PYTHON.output"));
        assert_eq!(
            errors["codeSnippets.PYTHON"],
            vec!["Python code snippet is required".to_string()]
        );
        assert_eq!(
            errors["referenceSolutions.JAVA"],
            vec!["Java solution is required".to_string()]
        );
    }

    #[test]
    fn blank_tag_entries_pass_the_length_only_rule() {
        let schema = ProblemSchema::new();
        let mut draft = filled_draft();
        draft.add_tag();
        assert_eq!(draft.tags, vec!["array".to_string(), String::new()]);
        let errors = schema.validate(&draft.as_value());
        assert!(errors.is_empty(), "blank tag should validate: {errors:?}");
    }
}
