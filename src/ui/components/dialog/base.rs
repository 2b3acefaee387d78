//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    /// Dialog title
    pub title: &'a str,
    /// Title color
    pub title_color: Color,
    /// Border color
    pub border_color: Color,
    /// Message content, word-wrapped (can be multi-line with \n)
    pub message: &'a str,
    /// Block shown below the message line by line, without wrapping
    pub details: Option<&'a str>,
    /// Hint text shown at the bottom (e.g., "Enter to close")
    pub hint: Option<Vec<Span<'a>>>,
    /// Maximum width of the dialog
    pub max_width: u16,
}

impl<'a> Default for DialogConfig<'a> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            title_color: Color::White,
            border_color: Color::White,
            message: "",
            details: None,
            hint: None,
            max_width: 60,
        }
    }
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let padding = 4u16; // 2 chars padding on each side
    let max_line_width = config.max_width.saturating_sub(padding) as usize;

    let wrapped_lines = wrap_text(config.message, max_line_width);
    let detail_lines: Vec<&str> = config.details.map_or_else(Vec::new, |d| d.lines().collect());

    let content_width = wrapped_lines
        .iter()
        .map(|l| l.chars().count())
        .chain(detail_lines.iter().map(|l| l.chars().count()))
        .max()
        .unwrap_or(0)
        .max(config.title.chars().count());
    let dialog_width = to_cells(content_width)
        .saturating_add(padding + 2) // +2 for borders
        .min(config.max_width)
        .min(area.width);

    // Height: title + blank + message + (blank + details) + (blank + hint) + borders
    let detail_rows = if detail_lines.is_empty() {
        0
    } else {
        to_cells(detail_lines.len()).saturating_add(1)
    };
    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    let dialog_height = to_cells(wrapped_lines.len())
        .saturating_add(detail_rows)
        .saturating_add(hint_rows + 4)
        .max(5)
        .min(area.height);

    // Center the dialog
    let dialog_area = Rect {
        x: area.x + (area.width.saturating_sub(dialog_width)) / 2,
        y: area.y + (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    content.extend(wrapped_lines.into_iter().map(Line::from));

    if !detail_lines.is_empty() {
        content.push(Line::from(""));
        content.extend(
            detail_lines
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Gray)))),
        );
    }

    if let Some(hint_spans) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint_spans));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.border_color))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

fn to_cells(count: usize) -> u16 {
    count.min(u16::MAX as usize) as u16
}

/// Shared "Enter / Esc" hint line
pub fn close_hint<'a>(action: &'a str) -> Vec<Span<'a>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Span::styled("Enter", key_style),
        Span::raw(" / "),
        Span::styled("Esc", key_style),
        Span::raw(format!(" {action}")),
    ]
}

/// Wrap text to fit within a maximum width, counted in characters
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if current_width + word_width + 1 > max_width && !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }
            if !current_line.is_empty() {
                current_line.push(' ');
                current_width += 1;
            }
            current_line.push_str(word);
            current_width += word_width;
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
