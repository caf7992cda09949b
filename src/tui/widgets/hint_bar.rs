use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, AppView, InputMode};

pub struct HintBarWidget;

impl HintBarWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;

        // A pending notice takes precedence over the key hints.
        if let Some(notice) = &app.notice {
            let color = if notice.is_error {
                theme.error_text
            } else {
                theme.success_text
            };
            let line = Line::from(Span::styled(
                format!(" {}", notice.text),
                Style::default().fg(color).bg(theme.hint_bar_background),
            ));
            f.render_widget(
                Paragraph::new(line).style(Style::default().bg(theme.hint_bar_background)),
                area,
            );
            return;
        }

        let hints = match app.input_mode {
            InputMode::Normal => match app.active_view {
                AppView::Problems => {
                    if app.is_admin() {
                        "/ search | d difficulty | t tag | Left/Right page | e edit | x delete | s save to playlist | n new playlist | ? help | q quit"
                    } else {
                        "/ search | d difficulty | t tag | Left/Right page | s save to playlist | n new playlist | ? help | q quit"
                    }
                }
                AppView::Logs => "Up/Down scroll | Tab back to problems | q quit",
                AppView::Editor => "? help | q quit",
            },
            InputMode::Search => "Type to search by title | Enter/Esc done",
            InputMode::Form => {
                "Tab/S-Tab field | Ctrl+a add entry | Ctrl+d remove entry | Ctrl+s save | Esc discard"
            }
            InputMode::ConfirmDelete => "Delete this problem? y / n",
            InputMode::Playlist => "Tab field | Enter confirm | Esc cancel",
        };

        let line = Line::from(Span::styled(
            format!(" {hints}"),
            Style::default()
                .fg(theme.hint_bar_text)
                .bg(theme.hint_bar_background),
        ));
        f.render_widget(
            Paragraph::new(line).style(Style::default().bg(theme.hint_bar_background)),
            area,
        );
    }
}
