// src/form.rs
// The editable problem draft: a fully-defaulted working copy of a problem
// record, with dynamic tag/test-case arrays, a one-shot hydration state
// machine, and the submit payload assembly.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::models::{Difficulty, Example, Language, LanguageSet, Problem, TestCase};
use crate::schema::{FieldErrors, ProblemSchema};

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TestCaseDraft {
    pub input: String,
    pub output: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ExampleDraft {
    pub input: String,
    pub output: String,
    pub explanation: String,
}

/// The form's working copy. Every field is a string (or a collection of
/// string sub-records) so the form never observes a null; hydration fills the
/// gaps of a partial record with type-appropriate defaults.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDraft {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub constraints: String,
    pub hints: String,
    pub editorial: String,
    pub testcases: Vec<TestCaseDraft>,
    pub examples: LanguageSet<ExampleDraft>,
    pub code_snippets: LanguageSet<String>,
    pub reference_solutions: LanguageSet<String>,
}

impl Default for ProblemDraft {
    fn default() -> Self {
        ProblemDraft {
            title: String::new(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            // The dynamic arrays start with one editable placeholder each.
            tags: vec![String::new()],
            constraints: String::new(),
            hints: String::new(),
            editorial: String::new(),
            testcases: vec![TestCaseDraft::default()],
            examples: LanguageSet::default(),
            code_snippets: LanguageSet::default(),
            reference_solutions: LanguageSet::default(),
        }
    }
}

impl ProblemDraft {
    /// Builds a draft from a fetched record, defaulting every missing or
    /// empty optional so the form has something editable everywhere. An empty
    /// dynamic array becomes a single placeholder entry.
    pub fn from_problem(problem: &Problem) -> Self {
        let defaults = ProblemDraft::default();
        ProblemDraft {
            title: problem.title.clone(),
            description: problem.description.clone(),
            difficulty: problem.difficulty,
            tags: if problem.tags.is_empty() {
                defaults.tags
            } else {
                problem.tags.clone()
            },
            constraints: problem.constraints.clone(),
            hints: problem.hints.clone().unwrap_or_default(),
            editorial: problem.editorial.clone().unwrap_or_default(),
            testcases: if problem.testcases.is_empty() {
                defaults.testcases
            } else {
                problem
                    .testcases
                    .iter()
                    .map(|tc| TestCaseDraft {
                        input: tc.input.clone(),
                        output: tc.output.clone(),
                    })
                    .collect()
            },
            examples: problem.examples.map(|example| ExampleDraft {
                input: example.input.clone(),
                output: example.output.clone(),
                explanation: example.explanation.clone(),
            }),
            code_snippets: problem.code_snippets.clone(),
            reference_solutions: problem.reference_solutions.clone(),
        }
    }

    /// Appends an empty tag entry. No upper bound.
    pub fn add_tag(&mut self) {
        self.tags.push(String::new());
    }

    /// Removes the tag at `index`. Rejected when only one entry remains — the
    /// UI renders the affordance disabled in that state.
    pub fn remove_tag(&mut self, index: usize) -> bool {
        if self.tags.len() <= 1 || index >= self.tags.len() {
            return false;
        }
        self.tags.remove(index);
        true
    }

    /// Appends an empty test case. No upper bound.
    pub fn add_testcase(&mut self) {
        self.testcases.push(TestCaseDraft::default());
    }

    /// Removes the test case at `index`, with the same last-item protection
    /// as tags.
    pub fn remove_testcase(&mut self, index: usize) -> bool {
        if self.testcases.len() <= 1 || index >= self.testcases.len() {
            return false;
        }
        self.testcases.remove(index);
        true
    }

    /// The draft as a JSON value for schema validation.
    pub fn as_value(&self) -> Value {
        serde_json::to_value(self).expect("a draft of plain strings always serializes")
    }
}

/// Hydration lifecycle of a draft. The only transitions are
/// `Empty -> Loading` (the fetch was dispatched) and `Loading -> Hydrated`
/// (the first resolution landed); everything else is rejected, so a stale,
/// later-resolving fetch can never clobber in-progress edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    Empty,
    Loading,
    Hydrated,
}

/// Editor state for one problem: the draft, its hydration phase, the inline
/// validation errors, and the submit in-flight flag.
#[derive(Debug)]
pub struct ProblemEditor {
    pub problem_id: Uuid,
    phase: DraftPhase,
    pub draft: ProblemDraft,
    pub errors: FieldErrors,
    pub is_submitting: bool,
}

impl ProblemEditor {
    pub fn open(problem_id: Uuid) -> Self {
        ProblemEditor {
            problem_id,
            phase: DraftPhase::Empty,
            draft: ProblemDraft::default(),
            errors: FieldErrors::new(),
            is_submitting: false,
        }
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn is_hydrated(&self) -> bool {
        self.phase == DraftPhase::Hydrated
    }

    /// Marks the fetch as dispatched. Only valid from `Empty`; in particular
    /// a hydrated editor cannot be put back into `Loading`.
    pub fn begin_loading(&mut self) -> bool {
        if self.phase == DraftPhase::Empty {
            self.phase = DraftPhase::Loading;
            true
        } else {
            false
        }
    }

    /// First resolution wins, then freeze: replaces the draft only on the
    /// `Loading -> Hydrated` transition and reports whether it ran. A second
    /// resolution (or one for a different problem) is ignored.
    pub fn hydrate(&mut self, problem: &Problem) -> bool {
        if self.phase != DraftPhase::Loading || problem.id != self.problem_id {
            return false;
        }
        self.draft = ProblemDraft::from_problem(problem);
        self.phase = DraftPhase::Hydrated;
        true
    }

    /// Runs the schema over the current draft, replacing the error map.
    /// Returns whether the draft is submittable.
    pub fn validate(&mut self, schema: &ProblemSchema) -> bool {
        self.errors = schema.validate(&self.draft.as_value());
        self.errors.is_empty()
    }

    /// First message recorded against a field path, for inline display.
    pub fn error_for(&self, path: &str) -> Option<&str> {
        self.errors
            .get(path)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// The update call's arguments, in the order the collaborator expects
    /// them. Hints and editorial are not part of the contract.
    pub fn update_args(&self) -> UpdateArgs {
        UpdateArgs {
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            examples: self.draft.examples.map(|example| Example {
                input: example.input.clone(),
                output: example.output.clone(),
                explanation: example.explanation.clone(),
            }),
            difficulty: self.draft.difficulty,
            tags: self.draft.tags.clone(),
            constraints: self.draft.constraints.clone(),
            testcases: self
                .draft
                .testcases
                .iter()
                .map(|tc| TestCase {
                    input: tc.input.clone(),
                    output: tc.output.clone(),
                })
                .collect(),
            code_snippets: self.draft.code_snippets.clone(),
            reference_solutions: self.draft.reference_solutions.clone(),
            id: self.problem_id,
        }
    }
}

/// Ordered payload for `ProblemManager::update_problem`.
#[derive(Debug, Clone)]
pub struct UpdateArgs {
    pub title: String,
    pub description: String,
    pub examples: LanguageSet<Example>,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub constraints: String,
    pub testcases: Vec<TestCase>,
    pub code_snippets: LanguageSet<String>,
    pub reference_solutions: LanguageSet<String>,
    pub id: Uuid,
}

/// One addressable field of the editor form, in traversal order. The list is
/// rebuilt whenever the dynamic arrays change length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Difficulty,
    Tag(usize),
    TestcaseInput(usize),
    TestcaseOutput(usize),
    Snippet(Language),
    Solution(Language),
    ExampleInput(Language),
    ExampleOutput(Language),
    ExampleExplanation(Language),
    Constraints,
    Hints,
    Editorial,
}

impl FormField {
    /// The error-map path this field displays inline, if it has one. Tag
    /// entries carry no per-entry rule (array length is validated at the
    /// section level).
    pub fn error_path(&self) -> Option<String> {
        match self {
            FormField::Title => Some("title".to_string()),
            FormField::Description => Some("description".to_string()),
            FormField::Difficulty => Some("difficulty".to_string()),
            FormField::Tag(_) => None,
            FormField::TestcaseInput(i) => Some(format!("testcases[{i}].input")),
            FormField::TestcaseOutput(i) => Some(format!("testcases[{i}].output")),
            FormField::Snippet(language) => Some(format!("codeSnippets.{}", language.as_key())),
            FormField::Solution(language) => {
                Some(format!("referenceSolutions.{}", language.as_key()))
            }
            FormField::ExampleInput(language) => {
                Some(format!("examples.{}.input", language.as_key()))
            }
            FormField::ExampleOutput(language) => {
                Some(format!("examples.{}.output", language.as_key()))
            }
            FormField::ExampleExplanation(_) => None,
            FormField::Constraints => Some("constraints".to_string()),
            FormField::Hints => None,
            FormField::Editorial => None,
        }
    }

    /// Whether Enter inserts a newline (textarea) instead of advancing focus.
    pub fn is_multiline(&self) -> bool {
        !matches!(
            self,
            FormField::Title | FormField::Difficulty | FormField::Tag(_)
        )
    }
}

/// The traversal order of the form, mirroring its visual layout: basics,
/// tags, test cases, one section per language, additional information.
pub fn form_fields(draft: &ProblemDraft) -> Vec<FormField> {
    let mut fields = vec![FormField::Title, FormField::Description, FormField::Difficulty];
    for i in 0..draft.tags.len() {
        fields.push(FormField::Tag(i));
    }
    for i in 0..draft.testcases.len() {
        fields.push(FormField::TestcaseInput(i));
        fields.push(FormField::TestcaseOutput(i));
    }
    for language in Language::ALL {
        fields.push(FormField::Snippet(language));
        fields.push(FormField::Solution(language));
        fields.push(FormField::ExampleInput(language));
        fields.push(FormField::ExampleOutput(language));
        fields.push(FormField::ExampleExplanation(language));
    }
    fields.push(FormField::Constraints);
    fields.push(FormField::Hints);
    fields.push(FormField::Editorial);
    fields
}

/// Mutable access to the text behind a field. `None` for the difficulty
/// selector, which cycles instead of taking keystrokes.
pub fn field_text_mut<'a>(draft: &'a mut ProblemDraft, field: &FormField) -> Option<&'a mut String> {
    match field {
        FormField::Title => Some(&mut draft.title),
        FormField::Description => Some(&mut draft.description),
        FormField::Difficulty => None,
        FormField::Tag(i) => draft.tags.get_mut(*i),
        FormField::TestcaseInput(i) => draft.testcases.get_mut(*i).map(|tc| &mut tc.input),
        FormField::TestcaseOutput(i) => draft.testcases.get_mut(*i).map(|tc| &mut tc.output),
        FormField::Snippet(language) => Some(draft.code_snippets.get_mut(*language)),
        FormField::Solution(language) => Some(draft.reference_solutions.get_mut(*language)),
        FormField::ExampleInput(language) => Some(&mut draft.examples.get_mut(*language).input),
        FormField::ExampleOutput(language) => Some(&mut draft.examples.get_mut(*language).output),
        FormField::ExampleExplanation(language) => {
            Some(&mut draft.examples.get_mut(*language).explanation)
        }
        FormField::Constraints => Some(&mut draft.constraints),
        FormField::Hints => Some(&mut draft.hints),
        FormField::Editorial => Some(&mut draft.editorial),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SolvedRecord;

    fn fetched_problem() -> Problem {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "Two Sum",
            "description": "Find two numbers adding up to a target.",
            "difficulty": "EASY",
            "tags": ["array", "dp"],
            "constraints": "2 <= n",
            "testcases": [{"input": "1 2", "output": "3"}],
            "codeSnippets": {"JAVASCRIPT": "function () {}"}
        }))
        .unwrap()
    }

    #[test]
    fn hydration_defaults_every_gap() {
        let mut problem = fetched_problem();
        problem.tags.clear();
        problem.testcases.clear();
        problem.hints = None;
        let draft = ProblemDraft::from_problem(&problem);
        // Empty dynamic arrays become a single editable placeholder.
        assert_eq!(draft.tags, vec![String::new()]);
        assert_eq!(draft.testcases, vec![TestCaseDraft::default()]);
        assert_eq!(draft.hints, "");
        assert_eq!(draft.code_snippets.javascript, "");
    }

    #[test]
    fn remove_is_rejected_on_the_last_entry() {
        let mut draft = ProblemDraft::default();
        assert_eq!(draft.tags.len(), 1);
        assert!(!draft.remove_tag(0));
        assert_eq!(draft.tags.len(), 1);
        assert!(!draft.remove_testcase(0));
        assert_eq!(draft.testcases.len(), 1);
    }

    #[test]
    fn append_then_remove_restores_the_array_exactly() {
        let problem = fetched_problem();
        let mut draft = ProblemDraft::from_problem(&problem);
        let before = draft.tags.clone();

        draft.add_tag();
        assert_eq!(
            draft.tags,
            vec!["array".to_string(), "dp".to_string(), String::new()]
        );
        assert!(draft.remove_tag(draft.tags.len() - 1));
        assert_eq!(draft.tags, before);

        let before = draft.testcases.clone();
        draft.add_testcase();
        assert!(draft.remove_testcase(draft.testcases.len() - 1));
        assert_eq!(draft.testcases, before);
    }

    #[test]
    fn out_of_range_remove_is_a_noop() {
        let mut draft = ProblemDraft::default();
        draft.add_tag();
        assert!(!draft.remove_tag(5));
        assert_eq!(draft.tags.len(), 2);
    }

    #[test]
    fn hydration_runs_exactly_once() {
        let problem = fetched_problem();
        let mut editor = ProblemEditor::open(problem.id);
        assert_eq!(editor.phase(), DraftPhase::Empty);

        // Resolution before the fetch was dispatched is rejected.
        assert!(!editor.hydrate(&problem));

        assert!(editor.begin_loading());
        assert!(editor.hydrate(&problem));
        assert_eq!(editor.phase(), DraftPhase::Hydrated);
        assert_eq!(editor.draft.title, "Two Sum");

        // The user edits; a second resolution must not clobber the edit.
        editor.draft.title = "Two Sum (edited)".to_string();
        assert!(!editor.hydrate(&problem));
        assert_eq!(editor.draft.title, "Two Sum (edited)");

        // Loading cannot be re-entered once hydrated.
        assert!(!editor.begin_loading());
        assert_eq!(editor.phase(), DraftPhase::Hydrated);
    }

    #[test]
    fn hydration_ignores_a_record_for_another_problem() {
        let problem = fetched_problem();
        let other = fetched_problem();
        let mut editor = ProblemEditor::open(problem.id);
        editor.begin_loading();
        assert!(!editor.hydrate(&other));
        assert_eq!(editor.phase(), DraftPhase::Loading);
    }

    #[test]
    fn update_args_follow_the_collaborator_contract() {
        let mut problem = fetched_problem();
        problem.solved_by = vec![SolvedRecord {
            user_id: Uuid::new_v4(),
        }];
        let mut editor = ProblemEditor::open(problem.id);
        editor.begin_loading();
        editor.hydrate(&problem);
        editor.draft.hints = "not forwarded".to_string();

        let args = editor.update_args();
        assert_eq!(args.id, problem.id);
        assert_eq!(args.title, "Two Sum");
        assert_eq!(args.tags, vec!["array".to_string(), "dp".to_string()]);
        assert_eq!(args.testcases[0].output, "3");
        assert_eq!(args.code_snippets.javascript, "function () {}");
    }

    #[test]
    fn traversal_order_tracks_the_dynamic_arrays() {
        let mut draft = ProblemDraft::default();
        let base = form_fields(&draft).len();
        draft.add_tag();
        draft.add_testcase();
        let grown = form_fields(&draft);
        // One tag field plus an input/output pair.
        assert_eq!(grown.len(), base + 3);
        assert!(grown.contains(&FormField::Tag(1)));
        assert!(grown.contains(&FormField::TestcaseOutput(1)));
    }

    #[test]
    fn field_paths_match_the_schema_error_keys() {
        assert_eq!(
            FormField::TestcaseOutput(2).error_path().as_deref(),
            Some("testcases[2].output")
        );
        assert_eq!(
            FormField::Snippet(Language::Python).error_path().as_deref(),
            Some("codeSnippets.PYTHON")
        );
        assert_eq!(
            FormField::ExampleInput(Language::Java).error_path().as_deref(),
            Some("examples.JAVA.input")
        );
        assert_eq!(FormField::Tag(0).error_path(), None);
    }
}
