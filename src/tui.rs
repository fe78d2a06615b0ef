use std::io;
use std::sync::mpsc;
use std::time::Instant;

use log::{debug, info};
use ratatui::crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyModifiers,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::api::{self, ApiClient, FetchEvent, ReportEvent};
use crate::model::{OptionKey, UserStat};
use crate::session::{Phase, QuizSession};
use crate::timer::TimerEvent;

/// Everything the event loop owns: the session itself plus UI and
/// network state that lives outside the quiz rules.
pub struct App {
    pub session: QuizSession,
    pub user_stat: Option<UserStat>,
    pub report_pending: bool,
    pub summary_scroll: usize,
    pub should_quit: bool,
    client: ApiClient,
    user_id: Option<String>,
    fetch_rx: mpsc::Receiver<FetchEvent>,
    report_rx: Option<mpsc::Receiver<ReportEvent>>,
}

impl App {
    pub fn new(client: ApiClient, category: String, user_id: Option<String>) -> Self {
        let fetch_rx = api::spawn_fetch(client.clone(), category.clone());
        Self {
            session: QuizSession::new(category, user_id.clone(), Instant::now()),
            user_stat: None,
            report_pending: false,
            summary_scroll: 0,
            should_quit: false,
            client,
            user_id,
            fetch_rx,
            report_rx: None,
        }
    }

    /// Fresh run of the same category. The old fetch receiver is dropped
    /// here, which is what tells a still-running fetch thread to stand
    /// down without delivering into the new session.
    fn restart(&mut self) {
        let category = self.session.category().to_string();
        info!("restarting quiz for {:?}", category);
        self.fetch_rx = api::spawn_fetch(self.client.clone(), category.clone());
        self.session = QuizSession::new(category, self.user_id.clone(), Instant::now());
        self.user_stat = None;
        self.report_pending = false;
        self.report_rx = None;
        self.summary_scroll = 0;
    }

    /// Spawn the score report the first time the session turns up
    /// finished. `take_report` yields once, so this cannot double-send.
    fn maybe_send_report(&mut self) {
        if !self.session.is_finished() {
            return;
        }
        if let Some(report) = self.session.take_report() {
            info!(
                "session finished ({:?}), score {}, {} answered",
                self.session.finish_reason(),
                self.session.total_score(),
                self.session.tally().answered()
            );
            self.report_rx = Some(api::spawn_report(self.client.clone(), report));
            self.report_pending = true;
        }
    }
}

pub fn run_tui(mut app: App, tick_rx: mpsc::Receiver<TimerEvent>) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let result = main_loop(&mut terminal, &mut app, &tick_rx);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange).ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rx: &mpsc::Receiver<TimerEvent>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, app))
            .map_err(|e| format!("Draw error: {}", e))?;

        if app.should_quit {
            break;
        }

        // Poll for input events
        if event::poll(std::time::Duration::from_millis(100))
            .map_err(|e| format!("Poll error: {}", e))?
        {
            match event::read().map_err(|e| format!("Read error: {}", e))? {
                Event::Key(key) => handle_key(key, app),
                Event::FocusLost => {
                    debug!("terminal hidden, pausing clock");
                    app.session.on_focus_change(false, Instant::now());
                }
                Event::FocusGained => {
                    debug!("terminal visible, charging hidden time");
                    app.session.on_focus_change(true, Instant::now());
                }
                _ => {}
            }
        }

        // Heartbeat: clock depletion, loading floor, delayed advance
        while let Ok(TimerEvent::Tick(at)) = tick_rx.try_recv() {
            app.session.on_tick(at);
        }

        // Question batch arriving from the fetch thread
        if let Ok(FetchEvent::Loaded(batch)) = app.fetch_rx.try_recv() {
            app.session.on_questions(&batch, Instant::now());
        }

        // Score report acknowledgment
        let report_event = app.report_rx.as_ref().and_then(|rx| rx.try_recv().ok());
        match report_event {
            Some(ReportEvent::Acked(stat)) => {
                app.user_stat = Some(stat);
                app.report_pending = false;
            }
            Some(ReportEvent::Failed) => {
                app.report_pending = false;
            }
            None => {}
        }

        // Finer grained than the ticker so the post-answer pause does not
        // stretch a whole extra tick.
        app.session.advance_if_due(Instant::now());

        app.maybe_send_report();
    }

    Ok(())
}

fn handle_key(key: KeyEvent, app: &mut App) {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.session.phase() {
        Phase::Loading => {}
        Phase::Active => handle_quiz_key(key, app),
        Phase::Finished => handle_summary_key(key, app),
    }
}

fn handle_quiz_key(key: KeyEvent, app: &mut App) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    if let KeyCode::Char(c) = key.code {
        if let Some(option) = OptionKey::from_char(c) {
            if let Some(feedback) = app.session.answer(option, Instant::now()) {
                debug!(
                    "question {} answered {} ({}, {:+}s, {:+} points)",
                    app.session.current_index() + 1,
                    option.as_char(),
                    if feedback.correct { "correct" } else { "wrong" },
                    feedback.time_adjustment,
                    feedback.score_delta
                );
            }
        }
    }
}

fn handle_summary_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('r') => {
            app.restart();
        }
        KeyCode::Up => {
            app.summary_scroll = app.summary_scroll.saturating_sub(1);
        }
        KeyCode::Down => {
            app.summary_scroll = app.summary_scroll.saturating_add(1);
        }
        KeyCode::PageUp => {
            app.summary_scroll = app.summary_scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            app.summary_scroll = app.summary_scroll.saturating_add(10);
        }
        KeyCode::Home => {
            app.summary_scroll = 0;
        }
        _ => {}
    }
}
