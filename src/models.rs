// src/models.rs
// Wire model for the judge platform API. Everything the server sends is
// camelCase JSON with SCREAMING_SNAKE_CASE enum values; optional fields may be
// missing or null and must deserialize to defaults rather than fail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Problem difficulty as stored by the platform.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The wire value ("EASY", "MEDIUM", "HARD").
    pub fn as_key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// The closed set of languages a problem definition carries code for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    Javascript,
    Python,
    Java,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Javascript, Language::Python, Language::Java];

    /// The wire key used in per-language maps ("JAVASCRIPT", ...).
    pub fn as_key(&self) -> &'static str {
        match self {
            Language::Javascript => "JAVASCRIPT",
            Language::Python => "PYTHON",
            Language::Java => "JAVA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Javascript => "JavaScript",
            Language::Python => "Python",
            Language::Java => "Java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed record with one slot per [`Language`]. The platform models
/// examples, starter code and reference solutions as closed per-language maps
/// rather than dynamic collections, so there is no add/remove, only per-key
/// access.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de> + Default"))]
pub struct LanguageSet<T> {
    #[serde(rename = "JAVASCRIPT", default)]
    pub javascript: T,
    #[serde(rename = "PYTHON", default)]
    pub python: T,
    #[serde(rename = "JAVA", default)]
    pub java: T,
}

impl<T> LanguageSet<T> {
    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::Javascript => &self.javascript,
            Language::Python => &self.python,
            Language::Java => &self.java,
        }
    }

    pub fn get_mut(&mut self, language: Language) -> &mut T {
        match language {
            Language::Javascript => &mut self.javascript,
            Language::Python => &mut self.python,
            Language::Java => &mut self.java,
        }
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> LanguageSet<U> {
        LanguageSet {
            javascript: f(&self.javascript),
            python: f(&self.python),
            java: f(&self.java),
        }
    }
}

/// One hidden judge test case.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
}

/// A worked example shown alongside the problem statement.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Example {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub explanation: String,
}

/// A row in the problem's solved-by relation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolvedRecord {
    pub user_id: Uuid,
}

/// A problem definition as served by the platform. Read-only to the view
/// model; edits go through a [`crate::form::ProblemDraft`].
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    #[serde(default, deserialize_with = "null_default")]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "null_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub constraints: String,
    #[serde(default)]
    pub hints: Option<String>,
    #[serde(default)]
    pub editorial: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub testcases: Vec<TestCase>,
    #[serde(default, deserialize_with = "null_default")]
    pub examples: LanguageSet<Example>,
    #[serde(default, deserialize_with = "null_default")]
    pub code_snippets: LanguageSet<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub reference_solutions: LanguageSet<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub solved_by: Vec<SolvedRecord>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Account role. Delete/edit affordances are only rendered for admins; the
/// real authorization check happens server-side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

/// The authenticated account, if any.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("user")
    }
}

/// A user-owned problem playlist.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Treats an explicit JSON `null` like a missing field. The API emits null for
/// empty optional columns and the view model must never observe it.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_deserializes_with_missing_and_null_optionals() {
        let raw = serde_json::json!({
            "id": "7f2c1e6a-52c4-4b25-9b86-0a54c0efc3e4",
            "title": "Two Sum",
            "description": null,
            "difficulty": "MEDIUM",
            "tags": null,
            "solvedBy": [{"userId": "0b8f3c8e-93dc-45f6-a5cf-3d7b6f6f2a11"}]
        });
        let problem: Problem = serde_json::from_value(raw).unwrap();
        assert_eq!(problem.title, "Two Sum");
        assert_eq!(problem.difficulty, Difficulty::Medium);
        assert!(problem.description.is_empty());
        assert!(problem.tags.is_empty());
        assert!(problem.testcases.is_empty());
        assert_eq!(problem.solved_by.len(), 1);
        assert!(problem.hints.is_none());
    }

    #[test]
    fn language_set_uses_wire_keys() {
        let raw = serde_json::json!({
            "JAVASCRIPT": "function twoSum() {}",
            "PYTHON": "def two_sum(): pass"
        });
        let set: LanguageSet<String> = serde_json::from_value(raw).unwrap();
        assert_eq!(set.get(Language::Javascript), "function twoSum() {}");
        assert_eq!(set.get(Language::Python), "def two_sum(): pass");
        // Missing key falls back to the default.
        assert_eq!(set.get(Language::Java), "");
    }

    #[test]
    fn difficulty_round_trips_screaming_case() {
        let parsed: Difficulty = serde_json::from_str("\"HARD\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"HARD\"");
    }
}
