use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::tui::app::App;

pub struct HelpModalWidget;

impl HelpModalWidget {
    pub fn render(f: &mut Frame, app: &App, area: Rect) {
        let theme = &app.theme;
        let keys = &app.config.keybindings;

        let popup_area = centered_rect(60, 70, area);
        let block = Block::default()
            .title("Key Bindings")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.popup_border))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(theme.popup_background));

        f.render_widget(Clear, popup_area);
        f.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let entries = [
            ("Quit", keys.quit.as_str()),
            ("Help", keys.help.as_str()),
            ("Switch view", keys.next_tab.as_str()),
            ("Search by title", keys.search.as_str()),
            ("Cycle difficulty filter", keys.difficulty.as_str()),
            ("Cycle tag filter", keys.tag.as_str()),
            ("Previous / next page", "Left / Right"),
            ("Refresh", keys.refresh.as_str()),
            ("Edit problem (admin)", keys.edit.as_str()),
            ("Delete problem (admin)", keys.delete.as_str()),
            ("Save to playlist", keys.save_to_playlist.as_str()),
            ("New playlist", keys.new_playlist.as_str()),
            ("Form: save", keys.submit.as_str()),
            ("Form: add tag/test case", keys.add_entry.as_str()),
            ("Form: remove tag/test case", keys.remove_entry.as_str()),
        ];

        let lines: Vec<Line> = entries
            .iter()
            .map(|(action, key)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {key:<12}"),
                        Style::default().fg(theme.border_accent),
                    ),
                    Span::styled(action.to_string(), Style::default().fg(theme.primary_foreground)),
                ])
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }
}
