use common::{Notifier, Severity};
use domain::indicators::ZoneColor;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use router::SiteNode;

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

pub fn zone_color(color: ZoneColor) -> Color {
    match color {
        ZoneColor::Green => Color::Green,
        ZoneColor::Yellow => Color::Yellow,
        ZoneColor::Orange => Color::LightRed,
        ZoneColor::Red => Color::Red,
        ZoneColor::Neutral => Color::DarkGray,
    }
}

/// Stacked toast overlay in the bottom-right corner. Expired toasts
/// drop out here, so rendering doubles as the dismiss timer.
pub fn render_toasts(f: &mut Frame, area: Rect, notifier: &mut Notifier) {
    let toasts = notifier.visible();
    if toasts.is_empty() {
        return;
    }
    let width = area.width.min(44);
    let mut bottom = area.bottom().saturating_sub(1);
    for toast in toasts.iter().rev() {
        if bottom < area.y + 3 {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y: bottom - 2,
            width,
            height: 3,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(severity_color(toast.severity)));
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(toast.message.as_str()).block(block),
            rect,
        );
        bottom = bottom.saturating_sub(3);
    }
}

/// Breadcrumb header: `Início` alone at the root, otherwise the
/// parent-link trail.
pub fn breadcrumb_line(trail: &[&SiteNode]) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "Início",
        Style::default().fg(Color::Cyan),
    )];
    for node in trail {
        spans.push(Span::raw(" › "));
        spans.push(Span::styled(
            node.title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// Checkbox-style list line shared by every checklist page.
pub fn check_line(done: bool, text: &str, selected: bool) -> Line<'static> {
    let mark = if done { "[x] " } else { "[ ] " };
    let mut style = if done {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    if selected {
        style = style.bg(Color::Indexed(237)).add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(format!("{mark}{text}"), style))
}
