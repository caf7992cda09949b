use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct AppTheme {
    // General
    pub primary_foreground: Color,
    pub secondary_foreground: Color,
    pub tertiary_foreground: Color,
    pub border_primary: Color,
    pub border_accent: Color,
    pub highlight_style: Style,
    pub error_text: Color,
    pub warning_text: Color,
    pub success_text: Color,

    // Status Bar
    pub status_bar_background: Color,
    pub status_bar_foreground: Color,
    pub status_bar_mode_normal_bg: Color,
    pub status_bar_mode_search_bg: Color,
    pub status_bar_mode_form_bg: Color,
    pub status_bar_mode_confirm_bg: Color,
    pub status_bar_mode_playlist_bg: Color,
    pub status_bar_view_name_fg: Color,

    // Problem Table
    pub table_title: Style,
    pub table_header: Style,
    pub difficulty_easy: Color,
    pub difficulty_medium: Color,
    pub difficulty_hard: Color,
    pub tag_badge: Style,
    pub solved_mark: Color,
    pub pager_enabled: Style,
    pub pager_disabled: Style,

    // Editor Form
    pub form_section_title: Style,
    pub form_label: Style,
    pub form_value: Style,
    pub form_active_field: Style,
    pub form_placeholder: Style,
    pub form_error: Style,
    pub form_disabled_hint: Style,

    // Log View
    pub log_title: Style,
    pub log_level_trace: Style,
    pub log_level_debug: Style,
    pub log_level_info: Style,
    pub log_level_warn: Style,
    pub log_level_error: Style,
    pub log_timestamp: Style,
    pub log_target: Style,

    // Popup / hint bar
    pub popup_border: Color,
    pub popup_background: Color,
    pub hint_bar_background: Color,
    pub hint_bar_text: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // General
            primary_foreground: Color::White,
            secondary_foreground: Color::Gray,
            tertiary_foreground: Color::DarkGray,
            border_primary: Color::DarkGray,
            border_accent: Color::Cyan,
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            error_text: Color::Red,
            warning_text: Color::Yellow,
            success_text: Color::Green,

            // Status Bar
            status_bar_background: Color::Blue,
            status_bar_foreground: Color::White,
            status_bar_mode_normal_bg: Color::LightCyan,
            status_bar_mode_search_bg: Color::LightMagenta,
            status_bar_mode_form_bg: Color::LightGreen,
            status_bar_mode_confirm_bg: Color::LightRed,
            status_bar_mode_playlist_bg: Color::LightYellow,
            status_bar_view_name_fg: Color::Yellow,

            // Problem Table
            table_title: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            table_header: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            difficulty_easy: Color::Green,
            difficulty_medium: Color::Yellow,
            difficulty_hard: Color::Red,
            tag_badge: Style::default().fg(Color::Yellow),
            solved_mark: Color::Green,
            pager_enabled: Style::default().fg(Color::White),
            pager_disabled: Style::default().fg(Color::DarkGray),

            // Editor Form
            form_section_title: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            form_label: Style::default().fg(Color::Gray),
            form_value: Style::default().fg(Color::White),
            form_active_field: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            form_placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            form_error: Style::default().fg(Color::Red),
            form_disabled_hint: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            // Log View
            log_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            log_level_trace: Style::default().fg(Color::Magenta),
            log_level_debug: Style::default().fg(Color::Blue),
            log_level_info: Style::default().fg(Color::Green),
            log_level_warn: Style::default().fg(Color::Yellow),
            log_level_error: Style::default().fg(Color::Red),
            log_timestamp: Style::default().fg(Color::DarkGray),
            log_target: Style::default().fg(Color::Cyan),

            // Popup / hint bar
            popup_border: Color::Yellow,
            popup_background: Color::DarkGray,
            hint_bar_background: Color::DarkGray,
            hint_bar_text: Color::Rgb(220, 220, 220),
        }
    }
}
