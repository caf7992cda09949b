use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        let status_bar_style = Style::default()
            .fg(theme.status_bar_foreground)
            .bg(theme.status_bar_background);

        let status_bar_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let mode_bg = match app.input_mode {
            InputMode::Normal => theme.status_bar_mode_normal_bg,
            InputMode::Search => theme.status_bar_mode_search_bg,
            InputMode::Form => theme.status_bar_mode_form_bg,
            InputMode::ConfirmDelete => theme.status_bar_mode_confirm_bg,
            InputMode::Playlist => theme.status_bar_mode_playlist_bg,
        };

        let user_span = match &app.current_user {
            Some(user) if user.is_admin() => Span::styled(
                format!("{} (admin)", user.display_name()),
                Style::default()
                    .fg(theme.status_bar_view_name_fg)
                    .bg(theme.status_bar_background)
                    .bold(),
            ),
            Some(user) => Span::styled(user.display_name().to_string(), status_bar_style),
            None => Span::styled("anonymous", status_bar_style),
        };

        let status_spans_left = Line::from(vec![
            Span::styled("Judgeboard | ", status_bar_style),
            Span::styled("View: ", status_bar_style),
            Span::styled(
                format!("{:?}", app.active_view),
                Style::default()
                    .fg(theme.status_bar_view_name_fg)
                    .bg(theme.status_bar_background)
                    .bold(),
            ),
            Span::styled(" | Input: ", status_bar_style),
            Span::styled(
                format!("{:?}", app.input_mode),
                Style::default().fg(theme.primary_foreground).bg(mode_bg).bold(),
            ),
            Span::styled(
                format!(" | Problems: {} ", app.problems.len()),
                status_bar_style,
            ),
            Span::styled("| ", status_bar_style),
            user_span,
        ]);

        f.render_widget(
            Paragraph::new(status_spans_left).style(status_bar_style),
            status_bar_layout[0],
        );

        let status_spans_right = vec![Span::from(Local::now().format("%H:%M:%S").to_string())];

        f.render_widget(
            Paragraph::new(Line::from(status_spans_right))
                .style(status_bar_style)
                .alignment(Alignment::Right),
            status_bar_layout[1],
        );
    }
}
