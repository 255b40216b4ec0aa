use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use crate::app::{App, Focus, Modal};
use crate::core::visibility::Visibility;

// ============================================================================
// Tokyo Night Color Theme
// ============================================================================
mod theme {
    use ratatui::style::Color;

    // Tokyo Night Storm palette
    pub const BG_DARK: Color = Color::Rgb(26, 27, 38);      // #1a1b26
    pub const BG_HIGHLIGHT: Color = Color::Rgb(41, 46, 66); // #292e42
    pub const FG: Color = Color::Rgb(169, 177, 214);        // #a9b1d6
    pub const FG_DARK: Color = Color::Rgb(86, 95, 137);     // #565f89
    pub const COMMENT: Color = Color::Rgb(86, 95, 137);     // #565f89

    // Accent colors
    pub const BLUE: Color = Color::Rgb(122, 162, 247);      // #7aa2f7
    pub const CYAN: Color = Color::Rgb(125, 207, 255);      // #7dcfff
    pub const PURPLE: Color = Color::Rgb(187, 154, 247);    // #bb9af7
    pub const GREEN: Color = Color::Rgb(158, 206, 106);     // #9ece6a
    pub const YELLOW: Color = Color::Rgb(224, 175, 104);    // #e0af68
    pub const RED: Color = Color::Rgb(247, 118, 142);       // #f7768e
    pub const TEAL: Color = Color::Rgb(115, 218, 202);      // #73daca
}

/// Screen areas of the sign-in form, shared by rendering and mouse hit tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormLayout {
    pub header: Rect,
    pub username: Rect,
    pub password: Rect,
    pub toggle: Rect,
    pub inspector: Rect,
    pub footer: Rect,
}

pub fn form_layout(area: Rect) -> FormLayout {
    // Split the frame into main area and persistent footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main content area
            Constraint::Length(3), // Persistent footer
        ])
        .split(area);

    let column = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(chunks[0])[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password + toggle
            Constraint::Min(0),    // Inspector
        ])
        .split(column);

    let password_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(8)])
        .split(rows[2]);

    FormLayout {
        header: rows[0],
        username: rows[1],
        password: password_row[0],
        toggle: password_row[1],
        inspector: rows[3],
        footer: chunks[1],
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Which part of the form sits under a terminal cell
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<Focus> {
    let layout = form_layout(area);
    if contains(layout.toggle, column, row) {
        Some(Focus::Toggle)
    } else if contains(layout.password, column, row) {
        Some(Focus::Password)
    } else if contains(layout.username, column, row) {
        Some(Focus::Username)
    } else {
        None
    }
}

pub fn render(app: &App, frame: &mut Frame) {
    let layout = form_layout(frame.area());

    render_header(layout.header, frame);
    render_fields(app, &layout, frame);
    render_inspector(app, layout.inspector, frame);

    // Render modal if open (overlaid)
    if app.modal == Modal::Help {
        render_help_modal(frame);
    }

    render_footer(app, layout.footer, frame);
}

fn render_header(area: Rect, frame: &mut Frame) {
    let title = Paragraph::new("🔒 SIGN IN 🔒")
        .style(Style::default().fg(theme::CYAN).bold())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BLUE))
                .style(Style::default().bg(theme::BG_DARK)),
        );
    frame.render_widget(title, area);
}

fn field_style(focused: bool) -> (Style, Style) {
    if focused {
        (
            Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD),
            Style::default().fg(theme::CYAN),
        )
    } else {
        (Style::default().fg(theme::FG), Style::default().fg(theme::FG_DARK))
    }
}

fn render_fields(app: &App, layout: &FormLayout, frame: &mut Frame) {
    let (text_style, border_style) = field_style(app.focus == Focus::Username);
    let username = Paragraph::new(app.username.as_str())
        .style(text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(theme::BG_DARK))
                .title(" Username "),
        );
    frame.render_widget(username, layout.username);

    let (text_style, border_style) = field_style(app.focus == Focus::Password);
    let password_title = match app.visibility() {
        Visibility::Masked => " Password ",
        Visibility::Revealed => " Password (visible) ",
    };
    let password = Paragraph::new(app.password_display())
        .style(text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(theme::BG_DARK))
                .title(password_title),
        );
    frame.render_widget(password, layout.password);

    let toggle_border = if app.focus == Focus::Toggle {
        theme::YELLOW
    } else {
        theme::PURPLE
    };
    let toggle = Paragraph::new(app.control_icon())
        .style(Style::default().fg(theme::FG))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(toggle_border))
                .style(Style::default().bg(theme::BG_DARK))
                .title(" F2 "),
        );
    frame.render_widget(toggle, layout.toggle);
}

/// Shows the markup state the toggle maintains
fn render_inspector(app: &App, area: Rect, frame: &mut Frame) {
    let state_color = match app.visibility() {
        Visibility::Masked => theme::GREEN,
        Visibility::Revealed => theme::YELLOW,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("state    ", Style::default().fg(theme::COMMENT)),
            Span::styled(app.visibility().to_string(), Style::default().fg(state_color).bold()),
        ]),
        Line::from(vec![
            Span::styled("input    ", Style::default().fg(theme::COMMENT)),
            Span::styled(
                match app.field_type() {
                    Some(input_type) => format!("type=\"{}\"", input_type),
                    None => "(no type attribute)".to_string(),
                },
                Style::default().fg(theme::FG),
            ),
        ]),
        Line::from(vec![
            Span::styled("control  ", Style::default().fg(theme::COMMENT)),
            Span::styled(
                format!("class=\"{}\"", app.control_classes()),
                Style::default().fg(theme::FG),
            ),
        ]),
    ];

    if let Some(ref error) = app.error_message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("❌ Error: {}", error),
            Style::default().fg(theme::RED),
        )));
    }

    let inspector = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::TEAL))
                .style(Style::default().bg(theme::BG_DARK))
                .title(" Markup "),
        );
    frame.render_widget(inspector, area);
}

/// Centered rectangle for modals
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_help_modal(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" 📖 Help - Keyboard shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::PURPLE))
        .style(Style::default().bg(theme::BG_HIGHLIGHT));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let help_text = vec![
        "Navigation:",
        "  Tab/↓       Next field",
        "  Shift+Tab/↑ Previous field",
        "  Mouse       Click a field to focus it",
        "",
        "Password visibility:",
        "  F2          Show/hide the password",
        "  Space/Enter Show/hide when the eye is focused",
        "  Mouse       Click the eye",
        "",
        "General:",
        "  F1          Show this help",
        "  Esc         Close help / Quit",
        "",
        "Press Esc or F1 to close",
    ];

    let paragraph = Paragraph::new(help_text.join("\n"))
        .style(Style::default().fg(theme::FG))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);
}

fn render_footer(app: &App, area: Rect, frame: &mut Frame) {
    // Display status message if it exists
    let helper_text = if let Some(ref status) = app.status_message {
        status.as_str()
    } else {
        match (&app.modal, app.focus) {
            (Modal::Help, _) => "Esc/F1: close help",
            (Modal::None, Focus::Toggle) => "Space/Enter: show/hide | Tab: field | F1: help | Esc: quit",
            (Modal::None, _) => "Tab: field | F2: show/hide password | F1: help | Esc: quit",
        }
    };

    let style = if app.status_message.is_some() {
        Style::default().fg(theme::GREEN)
    } else {
        Style::default().fg(theme::COMMENT)
    };

    let helper = Paragraph::new(helper_text)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::FG_DARK))
                .style(Style::default().bg(theme::BG_DARK))
                .title(" Shortcuts "),
        );

    frame.render_widget(helper, area);
}
