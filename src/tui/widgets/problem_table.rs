use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::filter::{self, PageState};
use crate::models::Difficulty;
use crate::tui::app::{App, InputMode};

pub struct ProblemTableWidget;

impl ProblemTableWidget {
    pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
        let theme = &app.theme;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Filter bar
                Constraint::Min(0),    // Table
                Constraint::Length(1), // Pagination footer
            ])
            .split(area);

        // Filter bar: the three predicates, with the search input highlighted
        // while it is being edited.
        let search_style = if app.input_mode == InputMode::Search {
            Style::default().fg(theme.border_accent)
        } else {
            Style::default().fg(theme.primary_foreground)
        };
        let search_text = if app.input_mode == InputMode::Search {
            format!("{}_", app.criteria.search)
        } else if app.criteria.search.is_empty() {
            "(any title)".to_string()
        } else {
            app.criteria.search.clone()
        };
        let filter_line = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme.secondary_foreground)),
            Span::styled(search_text, search_style),
            Span::styled(
                "  Difficulty: ",
                Style::default().fg(theme.secondary_foreground),
            ),
            Span::styled(
                app.criteria.difficulty.label(),
                Style::default().fg(theme.primary_foreground),
            ),
            Span::styled("  Tag: ", Style::default().fg(theme.secondary_foreground)),
            Span::styled(
                app.criteria.tag.label().to_string(),
                Style::default().fg(theme.primary_foreground),
            ),
        ]);
        let filter_block = Block::default()
            .title(Line::from(Span::styled("Problems", theme.table_title)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_primary));
        f.render_widget(Paragraph::new(filter_line).block(filter_block), chunks[0]);

        // Table over the current page of the filtered collection.
        let filtered = filter::filter_problems(&app.problems, &app.criteria);
        let total_pages = PageState::total_pages(filtered.len());
        let visible = app.page.page_slice(&filtered);

        if visible.is_empty() {
            let placeholder = Paragraph::new("No problems found.")
                .style(Style::default().fg(theme.secondary_foreground))
                .alignment(Alignment::Center);
            f.render_widget(placeholder, chunks[1]);
        } else {
            let user = app.current_user.as_ref();
            let rows: Vec<Row> = visible
                .iter()
                .map(|problem| {
                    let solved = filter::is_solved(problem, user);
                    let solved_cell = if solved {
                        Cell::from("[x]").style(Style::default().fg(theme.solved_mark))
                    } else {
                        Cell::from("[ ]").style(Style::default().fg(theme.tertiary_foreground))
                    };
                    let difficulty_color = match problem.difficulty {
                        Difficulty::Easy => theme.difficulty_easy,
                        Difficulty::Medium => theme.difficulty_medium,
                        Difficulty::Hard => theme.difficulty_hard,
                    };
                    Row::new(vec![
                        solved_cell,
                        Cell::from(problem.title.clone())
                            .style(Style::default().fg(theme.primary_foreground)),
                        Cell::from(problem.tags.join(", ")).style(theme.tag_badge),
                        Cell::from(problem.difficulty.as_key())
                            .style(Style::default().fg(difficulty_color)),
                    ])
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Length(6),
                    Constraint::Percentage(40),
                    Constraint::Percentage(40),
                    Constraint::Length(10),
                ],
            )
            .header(Row::new(vec!["Solved", "Title", "Tags", "Difficulty"]).style(theme.table_header))
            .highlight_style(theme.highlight_style)
            .highlight_symbol(">> ");
            f.render_stateful_widget(table, chunks[1], &mut app.table_state);
        }

        // Pagination footer. The disabled style is the affordance for the
        // no-op at each bound.
        let prev_style = if app.page.can_prev() {
            theme.pager_enabled
        } else {
            theme.pager_disabled
        };
        let next_style = if app.page.can_next(total_pages) {
            theme.pager_enabled
        } else {
            theme.pager_disabled
        };
        let footer = Line::from(vec![
            Span::styled("< Prev", prev_style),
            Span::styled(
                format!("  {} / {}  ", app.page.current(), total_pages.max(1)),
                Style::default().fg(theme.secondary_foreground),
            ),
            Span::styled("Next >", next_style),
            Span::styled(
                format!("   {} problems", filtered.len()),
                Style::default().fg(theme.tertiary_foreground),
            ),
        ]);
        f.render_widget(
            Paragraph::new(footer).alignment(Alignment::Center),
            chunks[2],
        );
    }
}
