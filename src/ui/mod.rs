pub mod keybar;
pub mod layout;
pub mod loading;
pub mod question;
pub mod summary;
pub mod timerbar;
pub mod titlebar;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::session::Phase;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    match app.session.phase() {
        Phase::Loading => {
            loading::draw_loading(f, area, app);
        }
        Phase::Active => {
            draw_quiz(f, area, app);
        }
        Phase::Finished => {
            draw_finished(f, area, app);
        }
    }
}

fn draw_quiz(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, app);
    timerbar::draw_timerbar(f, layout.timerbar, app);
    question::draw_question(f, layout.main, app);
    keybar::draw_keybar(f, layout.keybar, app);
}

fn draw_finished(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // summary
            Constraint::Length(1), // keybar
        ])
        .split(area);

    summary::draw_summary(f, vertical[0], app);
    keybar::draw_keybar(f, vertical[1], app);
}

/// Word-wrap a line to fit within `width` columns, breaking at word
/// boundaries.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            result.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}
