use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::timer::format_clock;
use crate::tui::App;

const LOW_CLOCK: f64 = 10.0;

pub fn draw_titlebar(f: &mut Frame, area: Rect, app: &App) {
    let clock = app.session.clock();
    let timer_text = format!(" {} remaining ", format_clock(clock));
    let timer_span = if clock <= LOW_CLOCK && clock > 0.0 {
        Span::styled(
            timer_text.clone(),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(timer_text.clone(), Style::default().fg(Color::Rgb(200, 200, 120)))
    };

    let title_text = format!("[ {} ]", app.session.category());
    let title_span = Span::styled(
        title_text.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Center the title across the full width, then fill the gap to the
    // right-aligned timer
    let available = area.width as usize;
    let title_len = title_text.len();
    let center_pad = if available > title_len {
        (available - title_len) / 2
    } else {
        0
    };
    let right_pad = available.saturating_sub(center_pad + title_len + timer_text.len());

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        title_span,
        Span::raw(" ".repeat(right_pad)),
        timer_span,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
