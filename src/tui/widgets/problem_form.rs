use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form::{form_fields, FormField, ProblemEditor};
use crate::tui::app::App;
use crate::tui::theme::AppTheme;

pub struct ProblemFormWidget;

impl ProblemFormWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;
        let Some(editor) = &app.editor else {
            return;
        };

        let title = if editor.is_submitting {
            format!("Edit Problem {} (saving...)", editor.problem_id)
        } else {
            format!("Edit Problem {}", editor.problem_id)
        };
        let block = Block::default()
            .title(Line::from(Span::styled(title, theme.form_section_title)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_accent));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if !editor.is_hydrated() {
            let loading = Paragraph::new("Loading problem...")
                .style(Style::default().fg(theme.secondary_foreground))
                .alignment(Alignment::Center);
            f.render_widget(loading, inner);
            return;
        }

        let wrap_width = inner.width.saturating_sub(6).max(20) as usize;
        let (lines, focused_line) = build_form_lines(editor, app.form_focus, wrap_width, theme);

        // Keep the focused field inside the viewport.
        let height = inner.height as usize;
        let focused = focused_line.unwrap_or(0);
        let mut scroll = app.form_scroll as usize;
        if focused < scroll {
            scroll = focused;
        } else if height > 2 && focused >= scroll + height - 2 {
            scroll = focused + 2 - height;
        }
        app.form_scroll = scroll as u16;

        let form = Paragraph::new(lines).scroll((app.form_scroll, 0));
        f.render_widget(form, inner);
    }
}

/// Lays the whole form out as styled lines and reports which line the focused
/// field starts on.
fn build_form_lines(
    editor: &ProblemEditor,
    focus: usize,
    wrap_width: usize,
    theme: &AppTheme,
) -> (Vec<Line<'static>>, Option<usize>) {
    let draft = &editor.draft;
    let fields = form_fields(draft);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut focused_line = None;
    let mut current_section = "";

    for (index, field) in fields.iter().enumerate() {
        let section = section_of(field);
        if section != current_section {
            current_section = section;
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(
                section.to_string(),
                theme.form_section_title,
            )));
            // Array-length rules report at the section level.
            let section_error = match field {
                FormField::Tag(_) => editor.error_for("tags"),
                FormField::TestcaseInput(_) => editor.error_for("testcases"),
                _ => None,
            };
            if let Some(message) = section_error {
                lines.push(Line::from(Span::styled(
                    format!("  ! {message}"),
                    theme.form_error,
                )));
            }
        }

        let is_focused = index == focus;
        if is_focused {
            focused_line = Some(lines.len());
        }
        let marker = if is_focused { "> " } else { "  " };
        let label_style = if is_focused {
            theme.form_active_field
        } else {
            theme.form_label
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}", label_of(field)),
            label_style,
        )));

        let value = field_value(draft, field);
        if value.is_empty() && !is_focused {
            lines.push(Line::from(Span::styled(
                "    (empty)".to_string(),
                theme.form_placeholder,
            )));
        } else {
            let shown = if is_focused {
                format!("{value}_")
            } else {
                value
            };
            for chunk in shown.split('\n') {
                if chunk.is_empty() {
                    lines.push(Line::raw("    "));
                    continue;
                }
                for wrapped in textwrap::wrap(chunk, wrap_width) {
                    lines.push(Line::from(Span::styled(
                        format!("    {wrapped}"),
                        theme.form_value,
                    )));
                }
            }
        }

        if let Some(path) = field.error_path() {
            if let Some(message) = editor.error_for(&path) {
                lines.push(Line::from(Span::styled(
                    format!("    ! {message}"),
                    theme.form_error,
                )));
            }
        }

        // The remove affordance is disabled on the last remaining entry.
        let last_protected = match field {
            FormField::Tag(_) => draft.tags.len() == 1,
            FormField::TestcaseOutput(_) => draft.testcases.len() == 1,
            _ => false,
        };
        if is_focused && last_protected {
            lines.push(Line::from(Span::styled(
                "    (the last entry cannot be removed)".to_string(),
                theme.form_disabled_hint,
            )));
        }
    }

    (lines, focused_line)
}

fn section_of(field: &FormField) -> &'static str {
    match field {
        FormField::Title | FormField::Description | FormField::Difficulty => "Basic Information",
        FormField::Tag(_) => "Tags",
        FormField::TestcaseInput(_) | FormField::TestcaseOutput(_) => "Test Cases",
        FormField::Snippet(language)
        | FormField::Solution(language)
        | FormField::ExampleInput(language)
        | FormField::ExampleOutput(language)
        | FormField::ExampleExplanation(language) => language.label(),
        FormField::Constraints | FormField::Hints | FormField::Editorial => {
            "Additional Information"
        }
    }
}

fn label_of(field: &FormField) -> String {
    match field {
        FormField::Title => "Title".to_string(),
        FormField::Description => "Description".to_string(),
        FormField::Difficulty => "Difficulty (Enter to cycle)".to_string(),
        FormField::Tag(i) => format!("Tag #{}", i + 1),
        FormField::TestcaseInput(i) => format!("Test Case #{} Input", i + 1),
        FormField::TestcaseOutput(i) => format!("Test Case #{} Expected Output", i + 1),
        FormField::Snippet(_) => "Starter Code Template".to_string(),
        FormField::Solution(_) => "Reference Solution".to_string(),
        FormField::ExampleInput(_) => "Example Input".to_string(),
        FormField::ExampleOutput(_) => "Example Output".to_string(),
        FormField::ExampleExplanation(_) => "Example Explanation (optional)".to_string(),
        FormField::Constraints => "Constraints".to_string(),
        FormField::Hints => "Hints (optional)".to_string(),
        FormField::Editorial => "Editorial (optional)".to_string(),
    }
}

fn field_value(draft: &crate::form::ProblemDraft, field: &FormField) -> String {
    match field {
        FormField::Difficulty => draft.difficulty.label().to_string(),
        FormField::Title => draft.title.clone(),
        FormField::Description => draft.description.clone(),
        FormField::Tag(i) => draft.tags.get(*i).cloned().unwrap_or_default(),
        FormField::TestcaseInput(i) => draft
            .testcases
            .get(*i)
            .map(|tc| tc.input.clone())
            .unwrap_or_default(),
        FormField::TestcaseOutput(i) => draft
            .testcases
            .get(*i)
            .map(|tc| tc.output.clone())
            .unwrap_or_default(),
        FormField::Snippet(language) => draft.code_snippets.get(*language).clone(),
        FormField::Solution(language) => draft.reference_solutions.get(*language).clone(),
        FormField::ExampleInput(language) => draft.examples.get(*language).input.clone(),
        FormField::ExampleOutput(language) => draft.examples.get(*language).output.clone(),
        FormField::ExampleExplanation(language) => {
            draft.examples.get(*language).explanation.clone()
        }
        FormField::Constraints => draft.constraints.clone(),
        FormField::Hints => draft.hints.clone(),
        FormField::Editorial => draft.editorial.clone(),
    }
}
