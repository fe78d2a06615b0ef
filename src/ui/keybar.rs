use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::Phase;
use crate::tui::App;

pub fn draw_keybar(f: &mut Frame, area: Rect, app: &App) {
    let bindings: Vec<(&str, &str)> = match app.session.phase() {
        Phase::Loading => vec![("Ctrl+Q", "quit")],
        Phase::Active => vec![("a-d", "answer"), ("Ctrl+Q", "quit")],
        Phase::Finished => vec![
            ("↑/↓", "scroll"),
            ("PgUp/PgDn", "jump"),
            ("r", "play again"),
            ("Enter", "exit"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
