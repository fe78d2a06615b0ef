use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::model::{Difficulty, OptionKey};
use crate::tui::App;
use crate::ui::wrap_text;

pub fn difficulty_style(level: Difficulty) -> Style {
    let color = match level {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn draw_question(f: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.session.current_question() else {
        let p = Paragraph::new("No questions").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Header
    lines.push(Line::from(Span::styled(
        format!(
            "  Question {} of {}",
            app.session.current_index() + 1,
            app.session.question_count()
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("  {}", question.level.label()),
        difficulty_style(question.level),
    )));
    if let Some(url) = question.image_url() {
        lines.push(Line::from(Span::styled(
            format!("  [image] {}", url),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    // Prompt (with wrapping)
    let wrap_width = (area.width as usize).saturating_sub(4);
    for wline in wrap_text(&question.prompt, wrap_width) {
        lines.push(Line::from(format!("  {}", wline)));
    }
    lines.push(Line::from(""));

    // Options. Once an answer is in, the chosen row is painted by its
    // grade; the rest stay untouched until the next question arrives.
    let feedback = app.session.feedback();
    for key in OptionKey::ALL {
        let chosen = feedback.map(|fb| fb.key == key).unwrap_or(false);
        let correct = feedback.map(|fb| fb.correct).unwrap_or(false);

        let marker = if chosen { "(●)" } else { "( )" };
        let style = if chosen && correct {
            Style::default()
                .fg(Color::White)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if chosen {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let prefix = format!("  {} {}. ", marker, key.as_char());
        let prefix_len = prefix.len();
        let text_width = (area.width as usize).saturating_sub(prefix_len);
        let wrapped = wrap_text(question.option_text(key), text_width);
        for (li, wline) in wrapped.iter().enumerate() {
            if li == 0 {
                lines.push(Line::from(vec![
                    Span::styled(prefix.clone(), style),
                    Span::styled(wline.clone(), style),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(prefix_len)),
                    Span::styled(wline.clone(), style),
                ]));
            }
        }
    }

    let widget = Paragraph::new(lines);
    f.render_widget(widget, area);
}
