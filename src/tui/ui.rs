use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::app::{App, AppView};
use super::widgets::{
    help_modal::HelpModalWidget,
    hint_bar::HintBarWidget,
    logs::LogsWidget,
    playlist_popup::PlaylistPopupWidget,
    problem_form::ProblemFormWidget,
    problem_table::ProblemTableWidget,
    status_bar::StatusBarWidget,
};

pub fn ui(f: &mut Frame, app: &mut App) {
    // Status bar on top, content in the middle, a one-line hint/notice bar at
    // the bottom.
    let main_layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Hint bar
        ])
        .split(f.size());

    StatusBarWidget::render(f, app, main_layout_chunks[0]);

    let main_content_area = main_layout_chunks[1];
    match app.active_view {
        AppView::Problems => {
            ProblemTableWidget::render(f, app, main_content_area);
        }
        AppView::Editor => {
            ProblemFormWidget::render(f, app, main_content_area);
        }
        AppView::Logs => {
            LogsWidget::render(f, app, main_content_area);
        }
    }

    HintBarWidget::render(f, app, main_layout_chunks[2]);

    // Popups over the main content
    if app.playlist_popup.is_some() {
        PlaylistPopupWidget::render(f, app, f.size());
    }
    if app.show_help_modal {
        HelpModalWidget::render(f, app, f.size());
    }
}
