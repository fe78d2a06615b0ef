use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::session::FinishReason;
use crate::tui::App;
use crate::ui::wrap_text;

pub fn draw_summary(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();
    let wrap_width = (area.width as usize).saturating_sub(6);

    lines.push(Line::from(""));
    lines.push(headline(app.session.finish_reason()));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::raw("  Final score: "),
        Span::styled(
            app.session.total_score().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(format!(
        "  Answered: {} of {}",
        app.session.tally().answered(),
        app.session.question_count()
    )));
    lines.push(tally_line(app));
    if let Some(started) = app.session.started_at() {
        lines.push(Line::from(Span::styled(
            format!("  Started: {}", started.to_rfc3339()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(finished) = app.session.finished_at() {
        lines.push(Line::from(Span::styled(
            format!("  Finished: {}", finished.to_rfc3339()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    if let Some(stat) = &app.user_stat {
        lines.push(Line::from(Span::styled(
            format!(
                "  Career: total {}, best {}, rank {} ({} plays)",
                stat.total_score, stat.highest_score, stat.rank, stat.count
            ),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    } else if app.report_pending {
        lines.push(Line::from(Span::styled(
            "  Reporting score...",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    if app.session.answers().is_empty() {
        lines.push(Line::from(Span::styled(
            "  No questions answered.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Review",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for record in app.session.answers() {
            let header = format!("Question {}: {}", record.question_index + 1, record.prompt);
            for wline in wrap_text(&header, wrap_width) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", wline),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
            }

            let answer_style = if record.is_correct() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            let chosen = format!("Your answer: {}", record.chosen_display());
            for wline in wrap_text(&chosen, wrap_width) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", wline),
                    answer_style,
                )));
            }
            if !record.is_correct() {
                let correct = format!("Correct answer: {}", record.correct_display());
                for wline in wrap_text(&correct, wrap_width) {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", wline),
                        Style::default().fg(Color::Green),
                    )));
                }
            }
            if !record.explanation.is_empty() {
                for wline in wrap_text(&record.explanation, wrap_width) {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", wline),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            lines.push(Line::from(""));
        }
    }

    // Apply scroll with clamping
    let total_content_lines = lines.len();
    let visible_height = (area.height as usize).saturating_sub(2);
    let scroll = app
        .summary_scroll
        .min(total_content_lines.saturating_sub(visible_height));
    let display_lines: Vec<Line> = lines.into_iter().skip(scroll).collect();

    let widget = Paragraph::new(display_lines)
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    f.render_widget(widget, area);

    if total_content_lines > visible_height {
        let mut scrollbar_state = ScrollbarState::new(total_content_lines)
            .position(scroll)
            .viewport_content_length(visible_height);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn headline(reason: Option<FinishReason>) -> Line<'static> {
    let (text, color) = match reason {
        Some(FinishReason::Completed) => ("✓  Quiz Complete", Color::Green),
        Some(FinishReason::TimeExpired) => ("✗  Time's Up", Color::Red),
        Some(FinishReason::NoQuestions) | None => ("✗  No Questions Available", Color::Red),
    };
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn tally_line(app: &App) -> Line<'static> {
    let tally = app.session.tally();
    Line::from(vec![
        Span::raw("  "),
        Span::styled("Easy ", Style::default().fg(Color::Green)),
        Span::raw(format!("{}✓ {}✗", tally.easy.correct, tally.easy.incorrect)),
        Span::raw("   "),
        Span::styled("Medium ", Style::default().fg(Color::Yellow)),
        Span::raw(format!(
            "{}✓ {}✗",
            tally.medium.correct, tally.medium.incorrect
        )),
        Span::raw("   "),
        Span::styled("Hard ", Style::default().fg(Color::Red)),
        Span::raw(format!("{}✓ {}✗", tally.hard.correct, tally.hard.incorrect)),
    ])
}
