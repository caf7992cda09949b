// src/tui/events.rs

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use super::app::{
    ActionOutcome, App, AppEvent, AppView, InputMode, PlaylistPopupMode,
};
use super::ui::ui;
use crate::form::{field_text_mut, form_fields, FormField};

pub async fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
) -> Result<()> {
    let mut event_receiver = app.event_receiver.take().expect("event receiver present");
    let mut outcome_receiver = app.outcome_receiver.take().expect("outcome receiver present");
    let mut crossterm_events = EventStream::new();

    // Initial data fetch
    app.fetch_current_user().await;
    app.fetch_problems().await;

    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        // Drain pending log entries into the Logs view
        if let Some(receiver) = &mut app.log_receiver {
            while let Ok(entry) = receiver.try_recv() {
                app.log_entries.push(entry);
            }
        }
        let max_logs = 1000;
        if app.log_entries.len() > max_logs {
            let overflow = app.log_entries.len() - max_logs;
            app.log_entries.drain(0..overflow);
        }
        if app.active_view == AppView::Logs && !app.log_entries.is_empty() {
            let at_bottom = match app.log_list_state.selected() {
                Some(index) => index >= app.log_entries.len().saturating_sub(2),
                None => true,
            };
            if at_bottom {
                app.log_list_state.select(Some(app.log_entries.len() - 1));
            }
        }

        let tick_duration = Duration::from_millis(app.config.interface.refresh_interval_ms);

        tokio::select! {
            // Completions of spawned collaborator calls
            Some(outcome) = outcome_receiver.recv() => {
                app.apply_outcome(outcome);
            }

            // App events dispatched from key handlers
            Some(event) = event_receiver.recv() => {
                handle_app_event(&mut app, event).await;
            }

            // Terminal events
            Some(Ok(event)) = crossterm_events.next() => {
                if let CrosstermEvent::Key(key) = event {
                    on_key(&mut app, key);
                }
            }

            // Periodic refresh. The hydration latch keeps a refresh from ever
            // touching an open draft.
            _ = tokio::time::sleep(tick_duration) => {
                app.tick();
                let _ = app.event_sender.send(AppEvent::FetchProblems);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::FetchProblems => {
            app.fetch_problems().await;
        }
        AppEvent::FetchCurrentUser => {
            app.fetch_current_user().await;
        }
        AppEvent::LoadProblem(id) => {
            let manager = Arc::clone(&app.problem_manager);
            let outcomes = app.outcome_sender.clone();
            tokio::spawn(async move {
                let outcome = match manager.get_problem(id).await {
                    Ok(problem) => ActionOutcome::ProblemLoaded(Box::new(problem)),
                    Err(e) => ActionOutcome::ProblemLoadFailed(e.to_string()),
                };
                let _ = outcomes.send(outcome);
            });
        }
        AppEvent::SubmitProblem(args) => {
            let manager = Arc::clone(&app.problem_manager);
            let outcomes = app.outcome_sender.clone();
            tokio::spawn(async move {
                let args = *args;
                let id = args.id;
                let outcome = match manager
                    .update_problem(
                        args.title,
                        args.description,
                        args.examples,
                        args.difficulty,
                        args.tags,
                        args.constraints,
                        args.testcases,
                        args.code_snippets,
                        args.reference_solutions,
                        args.id,
                    )
                    .await
                {
                    Ok(_) => ActionOutcome::ProblemSaved(id),
                    Err(e) => ActionOutcome::ProblemSaveFailed(e.to_string()),
                };
                let _ = outcomes.send(outcome);
            });
        }
        AppEvent::DeleteProblem(id) => {
            let manager = Arc::clone(&app.problem_manager);
            let outcomes = app.outcome_sender.clone();
            tokio::spawn(async move {
                let outcome = match manager.delete_problem(id).await {
                    Ok(()) => ActionOutcome::ProblemDeleted(id),
                    Err(e) => ActionOutcome::ProblemDeleteFailed(e.to_string()),
                };
                let _ = outcomes.send(outcome);
            });
        }
        AppEvent::FetchPlaylists => {
            let manager = Arc::clone(&app.playlist_manager);
            let outcomes = app.outcome_sender.clone();
            tokio::spawn(async move {
                let outcome = match manager.list_playlists().await {
                    Ok(playlists) => ActionOutcome::PlaylistsFetched(playlists),
                    Err(e) => ActionOutcome::PlaylistActionFailed(e.to_string()),
                };
                let _ = outcomes.send(outcome);
            });
        }
        AppEvent::CreatePlaylist { name, description } => {
            let manager = Arc::clone(&app.playlist_manager);
            let outcomes = app.outcome_sender.clone();
            tokio::spawn(async move {
                let outcome = match manager.create_playlist(name, description).await {
                    Ok(playlist) => ActionOutcome::PlaylistCreated(playlist),
                    Err(e) => ActionOutcome::PlaylistActionFailed(e.to_string()),
                };
                let _ = outcomes.send(outcome);
            });
        }
        AppEvent::AddToPlaylist {
            playlist_id,
            problem_id,
        } => {
            let manager = Arc::clone(&app.playlist_manager);
            let outcomes = app.outcome_sender.clone();
            tokio::spawn(async move {
                let outcome = match manager.add_problem(playlist_id, problem_id).await {
                    Ok(()) => ActionOutcome::ProblemAddedToPlaylist,
                    Err(e) => ActionOutcome::PlaylistActionFailed(e.to_string()),
                };
                let _ = outcomes.send(outcome);
            });
        }
    }
}

fn key_matches(app: &App, action: &str, key_event: &KeyEvent) -> bool {
    if let Some((code, mods)) = app.keybinding_map.get(action) {
        key_event.code == *code && key_event.modifiers == *mods
    } else {
        false
    }
}

pub fn on_key(app: &mut App, key_event: KeyEvent) {
    if app.show_help_modal {
        if key_matches(app, "help", &key_event) || key_event.code == KeyCode::Esc {
            app.show_help_modal = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode_key(app, key_event),
        InputMode::Search => handle_search_mode_key(app, key_event),
        InputMode::Form => handle_form_mode_key(app, key_event),
        InputMode::ConfirmDelete => handle_confirm_delete_mode_key(app, key_event),
        InputMode::Playlist => handle_playlist_mode_key(app, key_event),
    }
}

fn handle_normal_mode_key(app: &mut App, key_event: KeyEvent) {
    if key_matches(app, "quit", &key_event) {
        app.should_quit = true;
    } else if key_matches(app, "help", &key_event) {
        app.show_help_modal = true;
    } else if key_matches(app, "next_tab", &key_event) {
        app.active_view = app.active_view.next();
    } else if key_matches(app, "prev_tab", &key_event) {
        app.active_view = app.active_view.previous();
    } else if key_matches(app, "refresh", &key_event) {
        let _ = app.event_sender.send(AppEvent::FetchProblems);
        let _ = app.event_sender.send(AppEvent::FetchCurrentUser);
    } else if key_matches(app, "down", &key_event) || key_event.code == KeyCode::Char('j') {
        match app.active_view {
            AppView::Problems => app.select_next_row(),
            AppView::Logs => app.scroll_logs_down(),
            AppView::Editor => {}
        }
    } else if key_matches(app, "up", &key_event) || key_event.code == KeyCode::Char('k') {
        match app.active_view {
            AppView::Problems => app.select_previous_row(),
            AppView::Logs => app.scroll_logs_up(),
            AppView::Editor => {}
        }
    } else if app.active_view == AppView::Problems {
        handle_problem_table_key(app, key_event);
    }
}

fn handle_problem_table_key(app: &mut App, key_event: KeyEvent) {
    if key_matches(app, "search", &key_event) {
        app.input_mode = InputMode::Search;
    } else if key_matches(app, "difficulty", &key_event) {
        app.criteria.difficulty = app.criteria.difficulty.cycle();
        app.after_filter_change();
    } else if key_matches(app, "tag", &key_event) {
        app.criteria.tag = app.criteria.tag.cycle(&app.tags);
        app.after_filter_change();
    } else if key_matches(app, "next_page", &key_event) {
        app.next_page();
    } else if key_matches(app, "prev_page", &key_event) {
        app.prev_page();
    } else if key_matches(app, "edit", &key_event) {
        // Display-layer gate only; the server enforces the real check.
        if !app.is_admin() {
            return;
        }
        if let Some(problem) = app.selected_problem() {
            let id = problem.id;
            app.open_editor(id);
        }
    } else if key_matches(app, "delete", &key_event) {
        if !app.is_admin() || app.is_deleting {
            return;
        }
        if let Some(problem) = app.selected_problem() {
            let id = problem.id;
            if app.config.interface.confirm_delete {
                app.pending_delete = Some(id);
                app.input_mode = InputMode::ConfirmDelete;
            } else {
                app.is_deleting = true;
                let _ = app.event_sender.send(AppEvent::DeleteProblem(id));
            }
        }
    } else if key_matches(app, "save_to_playlist", &key_event) {
        if app.current_user.is_none() {
            app.notify_error("Sign in to save problems to playlists");
            return;
        }
        if let Some(problem) = app.selected_problem() {
            let id = problem.id;
            app.open_add_to_playlist_popup(id);
        }
    } else if key_matches(app, "new_playlist", &key_event) {
        if app.current_user.is_none() {
            app.notify_error("Sign in to create playlists");
            return;
        }
        app.open_create_playlist_popup();
    }
}

fn handle_search_mode_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.criteria.search.push(c);
            app.after_filter_change();
        }
        KeyCode::Backspace => {
            app.criteria.search.pop();
            app.after_filter_change();
        }
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn handle_form_mode_key(app: &mut App, key_event: KeyEvent) {
    // Submission and traversal first; anything else edits the focused field.
    if key_event.code == KeyCode::Esc {
        app.close_editor();
        return;
    }
    if key_matches(app, "submit", &key_event) {
        submit_form(app);
        return;
    }
    if key_matches(app, "add_entry", &key_event) {
        add_form_entry(app);
        return;
    }
    if key_matches(app, "remove_entry", &key_event) {
        remove_form_entry(app);
        return;
    }

    let Some(editor) = &mut app.editor else {
        return;
    };
    if !editor.is_hydrated() || editor.is_submitting {
        return;
    }

    let fields = form_fields(&editor.draft);
    match key_event.code {
        KeyCode::Tab => {
            app.form_focus = (app.form_focus + 1) % fields.len();
        }
        KeyCode::BackTab => {
            app.form_focus = (app.form_focus + fields.len() - 1) % fields.len();
        }
        code => {
            let Some(field) = fields.get(app.form_focus) else {
                return;
            };
            match code {
                KeyCode::Enter if *field == FormField::Difficulty => {
                    editor.draft.difficulty = match editor.draft.difficulty {
                        crate::models::Difficulty::Easy => crate::models::Difficulty::Medium,
                        crate::models::Difficulty::Medium => crate::models::Difficulty::Hard,
                        crate::models::Difficulty::Hard => crate::models::Difficulty::Easy,
                    };
                }
                KeyCode::Enter if field.is_multiline() => {
                    if let Some(text) = field_text_mut(&mut editor.draft, field) {
                        text.push('\n');
                    }
                }
                KeyCode::Enter => {
                    // Single-line fields advance on Enter.
                    app.form_focus = (app.form_focus + 1) % fields.len();
                }
                KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(text) = field_text_mut(&mut editor.draft, field) {
                        text.push(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(text) = field_text_mut(&mut editor.draft, field) {
                        text.pop();
                    }
                }
                _ => {}
            }
        }
    }
}

fn submit_form(app: &mut App) {
    let Some(editor) = &mut app.editor else {
        return;
    };
    if !editor.is_hydrated() || editor.is_submitting {
        return;
    }
    if !editor.validate(&app.schema) {
        let count = editor.errors.len();
        app.notify_error(format!(
            "{count} field{} need attention",
            if count == 1 { "" } else { "s" }
        ));
        return;
    }
    editor.is_submitting = true;
    let args = Box::new(editor.update_args());
    let _ = app.event_sender.send(AppEvent::SubmitProblem(args));
}

/// Appends a tag or test case depending on which section holds the focus.
fn add_form_entry(app: &mut App) {
    let Some(field) = app.focused_field() else {
        return;
    };
    let Some(editor) = &mut app.editor else {
        return;
    };
    match field {
        FormField::Tag(_) => {
            editor.draft.add_tag();
            let index = editor.draft.tags.len() - 1;
            app.form_focus = position_of(&editor.draft, FormField::Tag(index));
        }
        FormField::TestcaseInput(_) | FormField::TestcaseOutput(_) => {
            editor.draft.add_testcase();
            let index = editor.draft.testcases.len() - 1;
            app.form_focus = position_of(&editor.draft, FormField::TestcaseInput(index));
        }
        _ => {}
    }
}

/// Removes the focused tag or test case; a no-op on the last entry.
fn remove_form_entry(app: &mut App) {
    let Some(field) = app.focused_field() else {
        return;
    };
    let Some(editor) = &mut app.editor else {
        return;
    };
    let removed = match field {
        FormField::Tag(index) => editor.draft.remove_tag(index),
        FormField::TestcaseInput(index) | FormField::TestcaseOutput(index) => {
            editor.draft.remove_testcase(index)
        }
        _ => false,
    };
    if removed {
        let fields = form_fields(&editor.draft);
        app.form_focus = app.form_focus.min(fields.len() - 1);
    }
}

fn position_of(draft: &crate::form::ProblemDraft, field: FormField) -> usize {
    form_fields(draft)
        .iter()
        .position(|f| *f == field)
        .unwrap_or(0)
}

fn handle_confirm_delete_mode_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(id) = app.pending_delete.take() {
                app.is_deleting = true;
                let _ = app.event_sender.send(AppEvent::DeleteProblem(id));
            }
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_delete = None;
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn handle_playlist_mode_key(app: &mut App, key_event: KeyEvent) {
    if key_event.code == KeyCode::Esc {
        app.close_playlist_popup();
        return;
    }
    let Some(popup) = &mut app.playlist_popup else {
        return;
    };
    match popup.mode {
        PlaylistPopupMode::Create => match key_event.code {
            KeyCode::Tab | KeyCode::BackTab => {
                popup.active_field = (popup.active_field + 1) % 2;
            }
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                if popup.active_field == 0 {
                    popup.name.push(c);
                } else {
                    popup.description.push(c);
                }
            }
            KeyCode::Backspace => {
                if popup.active_field == 0 {
                    popup.name.pop();
                } else {
                    popup.description.pop();
                }
            }
            KeyCode::Enter => {
                if popup.name.trim().is_empty() {
                    app.notify_error("Playlist name is required");
                    return;
                }
                let name = popup.name.trim().to_string();
                let description = match popup.description.trim() {
                    "" => None,
                    text => Some(text.to_string()),
                };
                let _ = app
                    .event_sender
                    .send(AppEvent::CreatePlaylist { name, description });
            }
            _ => {}
        },
        PlaylistPopupMode::AddTo => match key_event.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if popup.playlists.is_empty() {
                    return;
                }
                let i = match popup.list_state.selected() {
                    Some(i) if i >= popup.playlists.len() - 1 => 0,
                    Some(i) => i + 1,
                    None => 0,
                };
                popup.list_state.select(Some(i));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if popup.playlists.is_empty() {
                    return;
                }
                let i = match popup.list_state.selected() {
                    Some(0) | None => popup.playlists.len() - 1,
                    Some(i) => i - 1,
                };
                popup.list_state.select(Some(i));
            }
            KeyCode::Enter => {
                let selected = popup
                    .list_state
                    .selected()
                    .and_then(|i| popup.playlists.get(i));
                if let (Some(playlist), Some(problem_id)) = (selected, popup.target_problem) {
                    let playlist_id = playlist.id;
                    let _ = app.event_sender.send(AppEvent::AddToPlaylist {
                        playlist_id,
                        problem_id,
                    });
                }
            }
            _ => {}
        },
    }
}
