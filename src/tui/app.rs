// src/tui/app.rs

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::{ListState, TableState};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{error, Level};
use uuid::Uuid;

use crate::auth_manager::AuthManager;
use crate::config::Config;
use crate::filter::{self, FilterCriteria, PageState};
use crate::form::{form_fields, FormField, ProblemEditor, UpdateArgs};
use crate::models::{Playlist, Problem, User};
use crate::playlist_manager::PlaylistManager;
use crate::problem_manager::ProblemManager;
use crate::schema::ProblemSchema;

use super::theme::AppTheme;

// Define the views of the TUI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Problems,
    Editor,
    Logs,
}

impl AppView {
    /// Tab rotation covers the two browsable views; the editor is entered and
    /// left explicitly.
    pub fn next(&self) -> Self {
        match self {
            Self::Problems => Self::Logs,
            Self::Logs => Self::Problems,
            Self::Editor => Self::Problems,
        }
    }

    pub fn previous(&self) -> Self {
        self.next()
    }
}

// Define input modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    ConfirmDelete,
    Playlist,
}

// A log entry shown in the Logs view
#[derive(Clone, Debug)]
pub struct UILogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

// App-level events for async operations dispatched from sync key handlers
pub enum AppEvent {
    FetchProblems,
    FetchCurrentUser,
    LoadProblem(Uuid),
    SubmitProblem(Box<UpdateArgs>),
    DeleteProblem(Uuid),
    FetchPlaylists,
    CreatePlaylist {
        name: String,
        description: Option<String>,
    },
    AddToPlaylist {
        playlist_id: Uuid,
        problem_id: Uuid,
    },
}

// Completions of spawned collaborator calls, delivered back to the event loop
pub enum ActionOutcome {
    ProblemLoaded(Box<Problem>),
    ProblemLoadFailed(String),
    ProblemSaved(Uuid),
    ProblemSaveFailed(String),
    ProblemDeleted(Uuid),
    ProblemDeleteFailed(String),
    PlaylistsFetched(Vec<Playlist>),
    PlaylistCreated(Playlist),
    ProblemAddedToPlaylist,
    PlaylistActionFailed(String),
}

/// Which playlist popup is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaylistPopupMode {
    Create,
    AddTo,
}

pub struct PlaylistPopupState {
    pub mode: PlaylistPopupMode,
    pub name: String,
    pub description: String,
    pub active_field: usize,
    pub playlists: Vec<Playlist>,
    pub list_state: ListState,
    pub target_problem: Option<Uuid>,
}

/// Transient status-bar notice; cleared after the configured TTL.
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

pub struct App {
    pub should_quit: bool,
    pub active_view: AppView,
    pub input_mode: InputMode,
    pub show_help_modal: bool,

    pub config: Arc<Config>,
    pub theme: Arc<AppTheme>,

    // Collaborators, injected at construction
    pub problem_manager: Arc<ProblemManager>,
    pub playlist_manager: Arc<PlaylistManager>,
    pub auth_manager: Arc<AuthManager>,

    pub current_user: Option<User>,

    // Problem table state
    pub problems: Vec<Problem>,
    pub criteria: FilterCriteria,
    pub tags: Vec<String>,
    pub page: PageState,
    pub table_state: TableState,

    // Editor state
    pub editor: Option<ProblemEditor>,
    pub schema: ProblemSchema,
    pub form_focus: usize,
    pub form_scroll: u16,

    // Delete confirmation
    pub pending_delete: Option<Uuid>,
    pub is_deleting: bool,

    // Playlist popups
    pub playlist_popup: Option<PlaylistPopupState>,

    pub notice: Option<Notice>,

    // Logs view
    pub log_entries: Vec<UILogEntry>,
    pub log_list_state: ListState,
    pub log_receiver: Option<mpsc::UnboundedReceiver<UILogEntry>>,

    // Channels between sync key handlers and async work
    pub event_sender: mpsc::UnboundedSender<AppEvent>,
    pub event_receiver: Option<mpsc::UnboundedReceiver<AppEvent>>,
    pub outcome_sender: mpsc::UnboundedSender<ActionOutcome>,
    pub outcome_receiver: Option<mpsc::UnboundedReceiver<ActionOutcome>>,

    pub keybinding_map: HashMap<String, (KeyCode, KeyModifiers)>,
}

impl App {
    pub fn new(
        config: Arc<Config>,
        problem_manager: Arc<ProblemManager>,
        playlist_manager: Arc<PlaylistManager>,
        auth_manager: Arc<AuthManager>,
        log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<ActionOutcome>();

        let keybinding_map = parse_keybindings(&config.keybindings);

        Self {
            should_quit: false,
            active_view: AppView::Problems,
            input_mode: InputMode::Normal,
            show_help_modal: false,
            config,
            theme: Arc::new(AppTheme::default()),
            problem_manager,
            playlist_manager,
            auth_manager,
            current_user: None,
            problems: Vec::new(),
            criteria: FilterCriteria::default(),
            tags: Vec::new(),
            page: PageState::default(),
            table_state: TableState::default(),
            editor: None,
            schema: ProblemSchema::new(),
            form_focus: 0,
            form_scroll: 0,
            pending_delete: None,
            is_deleting: false,
            playlist_popup: None,
            notice: None,
            log_entries: Vec::new(),
            log_list_state: ListState::default(),
            log_receiver: Some(log_receiver),
            event_sender: event_tx,
            event_receiver: Some(event_rx),
            outcome_sender: outcome_tx,
            outcome_receiver: Some(outcome_rx),
            keybinding_map,
        }
    }

    pub fn tick(&mut self) {
        if let Some(notice) = &self.notice {
            if notice.shown_at.elapsed().as_millis() as u64 >= self.config.interface.notice_ttl_ms {
                self.notice = None;
            }
        }
    }

    pub async fn fetch_problems(&mut self) {
        match self.problem_manager.list_problems().await {
            Ok(problems) => {
                self.problems = problems;
                self.tags = filter::tag_universe(&self.problems);
                self.after_filter_change();
            }
            Err(e) => {
                error!("Failed to fetch problems: {}", e);
                // Degrade to an empty table rather than showing stale rows.
                self.problems.clear();
                self.tags.clear();
                self.after_filter_change();
                self.notify_error(format!("Failed to fetch problems: {e}"));
            }
        }
    }

    pub async fn fetch_current_user(&mut self) {
        match self.auth_manager.current_user().await {
            Ok(user) => self.current_user = user,
            Err(e) => {
                error!("Failed to resolve current user: {}", e);
                self.current_user = None;
            }
        }
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }

    /// Count of problems passing the current criteria.
    pub fn filtered_len(&self) -> usize {
        filter::filter_problems(&self.problems, &self.criteria).len()
    }

    pub fn total_pages(&self) -> usize {
        PageState::total_pages(self.filtered_len())
    }

    /// The problem the table cursor points at, resolved through the current
    /// filter and page window.
    pub fn selected_problem(&self) -> Option<&Problem> {
        let filtered = filter::filter_problems(&self.problems, &self.criteria);
        let visible = self.page.page_slice(&filtered);
        self.table_state
            .selected()
            .and_then(|index| visible.get(index).copied())
    }

    /// Re-clamps the page cursor and the row selection after any criteria or
    /// collection change.
    pub fn after_filter_change(&mut self) {
        self.page.clamp_to(self.total_pages());
        let visible_len = {
            let filtered = filter::filter_problems(&self.problems, &self.criteria);
            self.page.page_slice(&filtered).len()
        };
        if visible_len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(selected.min(visible_len - 1)));
        }
    }

    pub fn select_next_row(&mut self) {
        let visible_len = {
            let filtered = filter::filter_problems(&self.problems, &self.criteria);
            self.page.page_slice(&filtered).len()
        };
        if visible_len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= visible_len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn select_previous_row(&mut self) {
        let visible_len = {
            let filtered = filter::filter_problems(&self.problems, &self.criteria);
            self.page.page_slice(&filtered).len()
        };
        if visible_len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    visible_len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn next_page(&mut self) {
        if self.page.next(self.total_pages()) {
            self.table_state.select(Some(0));
        }
    }

    pub fn prev_page(&mut self) {
        if self.page.prev() {
            self.table_state.select(Some(0));
        }
    }

    /// Opens the editor for a problem: a fresh draft in `Loading`, with the
    /// fetch dispatched. The draft is discarded when the editor is left.
    pub fn open_editor(&mut self, problem_id: Uuid) {
        let mut editor = ProblemEditor::open(problem_id);
        editor.begin_loading();
        self.editor = Some(editor);
        self.form_focus = 0;
        self.form_scroll = 0;
        self.active_view = AppView::Editor;
        self.input_mode = InputMode::Form;
        let _ = self.event_sender.send(AppEvent::LoadProblem(problem_id));
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
        self.active_view = AppView::Problems;
        self.input_mode = InputMode::Normal;
    }

    /// The focused form field, if the editor is open and hydrated.
    pub fn focused_field(&self) -> Option<FormField> {
        let editor = self.editor.as_ref()?;
        let fields = form_fields(&editor.draft);
        fields.get(self.form_focus).copied()
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    /// Applies a completed collaborator call. Outcomes for state that no
    /// longer exists (an editor that was closed meanwhile) are dropped.
    pub fn apply_outcome(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::ProblemLoaded(problem) => {
                if let Some(editor) = &mut self.editor {
                    if !editor.hydrate(&problem) {
                        tracing::debug!("Ignoring stale problem fetch for {}", problem.id);
                    }
                }
            }
            ActionOutcome::ProblemLoadFailed(message) => {
                error!("Failed to load problem: {}", message);
                self.notify_error(format!("Error loading problem: {message}"));
            }
            ActionOutcome::ProblemSaved(id) => {
                tracing::info!("Problem {} updated", id);
                self.close_editor();
                self.notify("Problem updated successfully");
                let _ = self.event_sender.send(AppEvent::FetchProblems);
            }
            ActionOutcome::ProblemSaveFailed(message) => {
                if let Some(editor) = &mut self.editor {
                    // The draft is preserved untouched for another attempt.
                    editor.is_submitting = false;
                }
                error!("Failed to update problem: {}", message);
                self.notify_error(format!("Error updating problem: {message}"));
            }
            ActionOutcome::ProblemDeleted(id) => {
                self.is_deleting = false;
                tracing::info!("Problem {} deleted", id);
                self.notify("Problem deleted");
                let _ = self.event_sender.send(AppEvent::FetchProblems);
            }
            ActionOutcome::ProblemDeleteFailed(message) => {
                self.is_deleting = false;
                error!("Failed to delete problem: {}", message);
                self.notify_error(format!("Error deleting problem: {message}"));
            }
            ActionOutcome::PlaylistsFetched(playlists) => {
                if let Some(popup) = &mut self.playlist_popup {
                    popup.list_state.select(if playlists.is_empty() {
                        None
                    } else {
                        Some(0)
                    });
                    popup.playlists = playlists;
                }
            }
            ActionOutcome::PlaylistCreated(playlist) => {
                self.notify(format!("Playlist '{}' created", playlist.name));
                if self
                    .playlist_popup
                    .as_ref()
                    .is_some_and(|p| p.mode == PlaylistPopupMode::Create)
                {
                    self.close_playlist_popup();
                }
            }
            ActionOutcome::ProblemAddedToPlaylist => {
                self.notify("Problem saved to playlist");
                self.close_playlist_popup();
            }
            ActionOutcome::PlaylistActionFailed(message) => {
                error!("Playlist action failed: {}", message);
                self.notify_error(format!("Playlist error: {message}"));
            }
        }
    }

    pub fn open_create_playlist_popup(&mut self) {
        self.playlist_popup = Some(PlaylistPopupState {
            mode: PlaylistPopupMode::Create,
            name: String::new(),
            description: String::new(),
            active_field: 0,
            playlists: Vec::new(),
            list_state: ListState::default(),
            target_problem: None,
        });
        self.input_mode = InputMode::Playlist;
    }

    pub fn open_add_to_playlist_popup(&mut self, problem_id: Uuid) {
        self.playlist_popup = Some(PlaylistPopupState {
            mode: PlaylistPopupMode::AddTo,
            name: String::new(),
            description: String::new(),
            active_field: 0,
            playlists: Vec::new(),
            list_state: ListState::default(),
            target_problem: Some(problem_id),
        });
        self.input_mode = InputMode::Playlist;
        let _ = self.event_sender.send(AppEvent::FetchPlaylists);
    }

    pub fn close_playlist_popup(&mut self) {
        self.playlist_popup = None;
        if self.input_mode == InputMode::Playlist {
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn scroll_logs_up(&mut self) {
        let current = self.log_list_state.selected().unwrap_or(0);
        if current > 0 {
            self.log_list_state.select(Some(current - 1));
        }
    }

    pub fn scroll_logs_down(&mut self) {
        if self.log_entries.is_empty() {
            return;
        }
        let max_index = self.log_entries.len() - 1;
        let current = self.log_list_state.selected().unwrap_or(0);
        if current < max_index {
            self.log_list_state.select(Some(current + 1));
        }
    }
}

fn parse_keybindings(
    cfg: &crate::config::KeyBindingsConfig,
) -> HashMap<String, (KeyCode, KeyModifiers)> {
    let mut map = HashMap::new();
    let entries: [(&str, &str); 19] = [
        ("quit", &cfg.quit),
        ("help", &cfg.help),
        ("next_tab", &cfg.next_tab),
        ("prev_tab", &cfg.prev_tab),
        ("search", &cfg.search),
        ("difficulty", &cfg.difficulty),
        ("tag", &cfg.tag),
        ("refresh", &cfg.refresh),
        ("edit", &cfg.edit),
        ("delete", &cfg.delete),
        ("save_to_playlist", &cfg.save_to_playlist),
        ("new_playlist", &cfg.new_playlist),
        ("up", &cfg.up),
        ("down", &cfg.down),
        ("prev_page", &cfg.prev_page),
        ("next_page", &cfg.next_page),
        ("submit", &cfg.submit),
        ("add_entry", &cfg.add_entry),
        ("remove_entry", &cfg.remove_entry),
    ];
    for (action, binding) in entries {
        if let Some(parsed) = parse_keybinding(binding) {
            map.insert(action.to_string(), parsed);
        } else {
            tracing::warn!("Ignoring unparseable keybinding '{}' for {}", binding, action);
        }
    }
    map
}

fn parse_keybinding(s: &str) -> Option<(KeyCode, KeyModifiers)> {
    let mut mods = KeyModifiers::empty();
    let mut key = s.trim();
    loop {
        if let Some(stripped) = key.strip_prefix("Ctrl+") {
            mods |= KeyModifiers::CONTROL;
            key = stripped;
        } else if let Some(stripped) = key.strip_prefix("Alt+") {
            mods |= KeyModifiers::ALT;
            key = stripped;
        } else if let Some(stripped) = key.strip_prefix("Shift+") {
            mods |= KeyModifiers::SHIFT;
            key = stripped;
        } else {
            break;
        }
    }
    let code = match key.to_lowercase().as_str() {
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };
    Some((code, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keybindings_parse_plain_and_modified_keys() {
        assert_eq!(
            parse_keybinding("q"),
            Some((KeyCode::Char('q'), KeyModifiers::empty()))
        );
        assert_eq!(
            parse_keybinding("Ctrl+s"),
            Some((KeyCode::Char('s'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_keybinding("Tab"),
            Some((KeyCode::Tab, KeyModifiers::empty()))
        );
        assert_eq!(parse_keybinding("NoSuchKey"), None);
    }
}
