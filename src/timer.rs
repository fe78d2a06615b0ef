use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Heartbeat period. Deltas are measured against real elapsed time, so a
/// late tick charges the clock for exactly the time that passed.
pub const TICK_PERIOD: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub enum TimerEvent {
    Tick(Instant),
}

/// Background heartbeat for the whole run. The thread winds down on its
/// own once the receiver is dropped.
pub fn spawn_ticker() -> mpsc::Receiver<TimerEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        thread::sleep(TICK_PERIOD);
        if tx.send(TimerEvent::Tick(Instant::now())).is_err() {
            break;
        }
    });

    rx
}

/// Whole seconds for the titlebar, rounded up so the display only shows
/// zero once the clock is truly empty.
pub fn format_clock(clock: f64) -> String {
    let secs = clock.max(0.0).ceil() as i64;
    format!("{}s", secs)
}
