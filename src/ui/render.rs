use crate::outline::Section;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};

/// Format remaining time as `<m>m<s>s`, with a leading `-` when overrun.
pub fn format_remaining(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs();
    format!("{}{}m{}s", sign, abs / 60, abs % 60)
}

/// Get color for the progress bar
/// - below warn: Green
/// - below danger: Yellow
/// - otherwise: Red
pub fn progress_color(progress: f64, (warn, danger): (f64, f64)) -> Color {
    if progress < warn {
        Color::Green
    } else if progress < danger {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Render the document title and the current section name.
pub fn render_header(
    f: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    current: Option<&Section>,
    paused: bool,
) {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let mut current_line = vec![Span::styled(
        current.map(Section::qualified_name).unwrap_or_default(),
        Style::default().fg(Color::White).bg(Color::Magenta),
    )];
    if paused {
        current_line.push(Span::raw(" "));
        current_line.push(Span::styled(
            "PAUSED",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(current_line));

    f.render_widget(Paragraph::new(lines), area);
}

/// Render the progress gauge with the remaining time as its label.
pub fn render_progress(
    f: &mut ratatui::Frame,
    area: Rect,
    progress: Option<f64>,
    remaining_seconds: Option<i64>,
    thresholds: (f64, f64),
) {
    let progress = progress.unwrap_or(0.0);
    let remaining = remaining_seconds.unwrap_or(0);

    let label_style = if remaining < 0 {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default()
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(progress_color(progress, thresholds)))
        .ratio(progress.clamp(0.0, 1.0))
        .label(Span::styled(format_remaining(remaining), label_style));

    f.render_widget(gauge, area);
}

/// Render finished sections (dimmed) followed by the upcoming ones.
pub fn render_sections(
    f: &mut ratatui::Frame,
    area: Rect,
    finished: &[Section],
    upcoming: &[Section],
) {
    let mut items: Vec<ListItem> = finished
        .iter()
        .map(|section| {
            ListItem::new(Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::styled(section.to_string(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    items.extend(upcoming.iter().map(|section| {
        ListItem::new(Line::from(vec![
            Span::raw("  "),
            Span::raw(section.to_string()),
        ]))
    }));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " Sections ({} done, {} to go) ",
                finished.len(),
                upcoming.len()
            )),
    );

    f.render_widget(list, area);
}

/// Render the footer with keybindings help.
pub fn render_footer(f: &mut ratatui::Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::styled("[d/→]", Style::default().fg(Color::Cyan)),
        Span::raw("Next "),
        Span::styled("[a/←]", Style::default().fg(Color::Cyan)),
        Span::raw("Previous "),
        Span::styled("[w]", Style::default().fg(Color::Cyan)),
        Span::raw("Pause "),
        Span::styled("[e]", Style::default().fg(Color::Cyan)),
        Span::raw("Resume "),
        Span::styled("[Space]", Style::default().fg(Color::Cyan)),
        Span::raw("Toggle "),
        Span::styled("[q]", Style::default().fg(Color::Cyan)),
        Span::raw("Quit"),
    ]);

    let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));

    f.render_widget(paragraph, area);
}
