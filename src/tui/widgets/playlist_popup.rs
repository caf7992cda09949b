use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::tui::app::{App, PlaylistPopupMode};

pub struct PlaylistPopupWidget;

impl PlaylistPopupWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;
        let Some(popup) = &mut app.playlist_popup else {
            return;
        };

        let popup_area = centered_rect(60, 60, area);
        let title = match popup.mode {
            PlaylistPopupMode::Create => "Create Playlist",
            PlaylistPopupMode::AddTo => "Save to Playlist",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.popup_border))
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(theme.popup_background));

        f.render_widget(Clear, popup_area); // Clear the area before rendering the popup
        f.render_widget(block.clone(), popup_area);
        let inner_area = block.inner(popup_area);

        match popup.mode {
            PlaylistPopupMode::Create => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints([
                        Constraint::Length(3), // Name
                        Constraint::Length(3), // Description
                        Constraint::Min(1),    // Spacer
                        Constraint::Length(1), // Instructions
                    ])
                    .split(inner_area);

                let active_style = Style::default().fg(theme.border_accent);

                let mut name_input = Paragraph::new(popup.name.as_str())
                    .block(Block::default().borders(Borders::ALL).title("Name"));
                if popup.active_field == 0 {
                    name_input = name_input.style(active_style);
                }
                let mut description_input = Paragraph::new(popup.description.as_str()).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Description (optional)"),
                );
                if popup.active_field == 1 {
                    description_input = description_input.style(active_style);
                }

                f.render_widget(name_input, chunks[0]);
                f.render_widget(description_input, chunks[1]);

                let instructions =
                    Paragraph::new("Tab to switch fields, Enter to create, Esc to cancel.")
                        .style(Style::default().fg(theme.secondary_foreground))
                        .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[3]);
            }
            PlaylistPopupMode::AddTo => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .margin(1)
                    .constraints([
                        Constraint::Min(1),    // Playlist list
                        Constraint::Length(1), // Instructions
                    ])
                    .split(inner_area);

                if popup.playlists.is_empty() {
                    let placeholder = Paragraph::new("No playlists yet. Press n to create one.")
                        .style(Style::default().fg(theme.secondary_foreground))
                        .alignment(Alignment::Center);
                    f.render_widget(placeholder, chunks[0]);
                } else {
                    let items: Vec<ListItem> = popup
                        .playlists
                        .iter()
                        .map(|playlist| {
                            let mut spans = vec![Span::styled(
                                playlist.name.clone(),
                                Style::default().fg(theme.primary_foreground),
                            )];
                            if let Some(description) = &playlist.description {
                                spans.push(Span::styled(
                                    format!("  {description}"),
                                    Style::default().fg(theme.secondary_foreground),
                                ));
                            }
                            ListItem::new(Line::from(spans))
                        })
                        .collect();
                    let list = List::new(items)
                        .highlight_style(theme.highlight_style)
                        .highlight_symbol(">> ");
                    f.render_stateful_widget(list, chunks[0], &mut popup.list_state);
                }

                let instructions = Paragraph::new("Enter to save, Esc to cancel.")
                    .style(Style::default().fg(theme.secondary_foreground))
                    .alignment(Alignment::Center);
                f.render_widget(instructions, chunks[1]);
            }
        }
    }
}
