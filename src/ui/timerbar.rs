use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::timer::format_clock;
use crate::tui::App;

/// Countdown gauge with a gutter for the per-answer time bonus/penalty
/// badge. The gutter is always reserved so the bar does not jump when a
/// badge pops in.
pub fn draw_timerbar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(9)])
        .split(area);

    let ratio = app.session.clock_ratio();
    let color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Time "))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format_clock(app.session.clock()));
    f.render_widget(gauge, chunks[0]);

    if let Some(feedback) = app.session.feedback() {
        let style = if feedback.time_adjustment >= 0 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        // Middle row of the 3-row gauge area
        let badge = Paragraph::new(vec![
            Line::from(""),
            Line::styled(format!("{:+}s", feedback.time_adjustment), style),
        ])
        .alignment(Alignment::Center);
        f.render_widget(badge, chunks[1]);
    }
}
