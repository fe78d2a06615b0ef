use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub titlebar: Rect,
    pub timerbar: Rect,
    pub main: Rect,
    pub keybar: Rect,
}

pub fn compute_layout(area: Rect) -> QuizLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // titlebar
            Constraint::Length(3), // countdown gauge
            Constraint::Min(5),    // question content
            Constraint::Length(1), // keybar
        ])
        .split(area);

    QuizLayout {
        titlebar: vertical[0],
        timerbar: vertical[1],
        main: vertical[2],
        keybar: vertical[3],
    }
}
