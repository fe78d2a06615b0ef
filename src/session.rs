use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::model::*;

/// The clock starts full and is clamped here after every bonus.
pub const CLOCK_CEILING: f64 = 60.0;
/// How long a graded answer stays on screen before the next question.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(500);
/// Floor on the loading screen so a fast response does not flash it away.
pub const MIN_LOADING: Duration = Duration::from_millis(500);
/// Residue below this counts as an empty clock.
const CLOCK_EPSILON: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Every question was answered before the clock ran out.
    Completed,
    /// The clock hit zero, by depletion or by an answer penalty.
    TimeExpired,
    /// The category had no questions to play.
    NoQuestions,
}

/// Grading outcome of a single answer, kept around while the answered
/// question is still on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub key: OptionKey,
    pub correct: bool,
    pub time_adjustment: i32,
    pub score_delta: i32,
}

/// Seconds granted or charged for an answer. Correct rewards grow with
/// difficulty while wrong-answer penalties shrink with it.
pub fn time_adjustment(level: Difficulty, correct: bool) -> i32 {
    match (level, correct) {
        (Difficulty::Easy, true) => 4,
        (Difficulty::Medium, true) => 8,
        (Difficulty::Hard, true) => 12,
        (Difficulty::Easy, false) => -12,
        (Difficulty::Medium, false) => -8,
        (Difficulty::Hard, false) => -4,
    }
}

pub fn score_delta(level: Difficulty, correct: bool) -> i32 {
    match (level, correct) {
        (Difficulty::Easy, true) => 1,
        (Difficulty::Medium, true) => 2,
        (Difficulty::Hard, true) => 3,
        (Difficulty::Easy, false) => -3,
        (Difficulty::Medium, false) => -2,
        (Difficulty::Hard, false) => -1,
    }
}

/// One run through a category. All mutation goes through the methods
/// below, each taking the caller's notion of "now" so behavior is the
/// same whether time comes from the ticker thread or from a test.
#[derive(Debug)]
pub struct QuizSession {
    category: String,
    user_id: Option<String>,
    phase: Phase,
    questions: Vec<Question>,
    current: usize,
    clock: f64,
    /// Last point the clock was charged up to. Frozen while the terminal
    /// is hidden, so regaining focus charges the whole hidden span in one
    /// piece; None outside Active.
    checkpoint: Option<Instant>,
    hidden: bool,
    feedback: Option<AnswerFeedback>,
    advance_due: Option<Instant>,
    answers: Vec<AnswerRecord>,
    tally: ScoreTally,
    total_score: i32,
    loading_since: Instant,
    loaded: Option<Vec<Question>>,
    finish_reason: Option<FinishReason>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    report: Option<StatReport>,
}

impl QuizSession {
    pub fn new(category: String, user_id: Option<String>, now: Instant) -> Self {
        Self {
            category,
            user_id,
            phase: Phase::Loading,
            questions: Vec::new(),
            current: 0,
            clock: CLOCK_CEILING,
            checkpoint: None,
            hidden: false,
            feedback: None,
            advance_due: None,
            answers: Vec::new(),
            tally: ScoreTally::default(),
            total_score: 0,
            loading_since: now,
            loaded: None,
            finish_reason: None,
            started_at: None,
            finished_at: None,
            report: None,
        }
    }

    /// Hand over the fetched batch. The quiz begins on the next tick once
    /// the loading screen has been up for its minimum duration.
    pub fn on_questions(&mut self, batch: &QuestionBatch, now: Instant) {
        if self.phase != Phase::Loading {
            return;
        }
        self.loaded = Some(batch.ordered());
        self.try_activate(now);
    }

    /// Periodic heartbeat. Drives loading-to-active, clock depletion and
    /// the delayed advance after an answer.
    pub fn on_tick(&mut self, now: Instant) {
        match self.phase {
            Phase::Loading => self.try_activate(now),
            Phase::Active => {
                if !self.hidden {
                    self.deplete(now);
                }
                if self.phase == Phase::Active {
                    self.advance_if_due(now);
                }
            }
            Phase::Finished => {}
        }
    }

    /// Grade an answer for the question on screen. Returns None when the
    /// session is not accepting answers, including the window where an
    /// earlier selection is still being shown; the first selection wins.
    pub fn answer(&mut self, key: OptionKey, now: Instant) -> Option<AnswerFeedback> {
        if self.phase != Phase::Active || self.feedback.is_some() {
            return None;
        }
        if !self.hidden {
            self.deplete(now);
            if self.phase != Phase::Active {
                return None;
            }
        }
        let question = self.questions.get(self.current)?.clone();

        let correct = key == question.answer;
        let time = time_adjustment(question.level, correct);
        let score = score_delta(question.level, correct);

        self.answers.push(AnswerRecord {
            question_index: self.current,
            image: question.image.clone(),
            prompt: question.prompt.clone(),
            chosen_key: key,
            chosen_text: question.option_text(key).to_string(),
            correct_key: question.answer,
            correct_text: question.option_text(question.answer).to_string(),
            explanation: question.explanation.clone(),
        });
        self.tally.record(question.level, correct);
        self.total_score += score;
        self.clock = (self.clock + f64::from(time)).clamp(0.0, CLOCK_CEILING);

        let feedback = AnswerFeedback {
            key,
            correct,
            time_adjustment: time,
            score_delta: score,
        };
        self.feedback = Some(feedback);

        if self.clock <= CLOCK_EPSILON {
            // A penalty that empties the clock ends the quiz on the spot.
            self.clock = 0.0;
            self.finish(FinishReason::TimeExpired);
        } else {
            self.advance_due = Some(now + FEEDBACK_DELAY);
        }
        Some(feedback)
    }

    /// Terminal focus change. Losing focus charges the clock up to this
    /// moment and then pauses depletion; regaining focus charges the whole
    /// hidden span at once.
    pub fn on_focus_change(&mut self, visible: bool, now: Instant) {
        if visible {
            if !self.hidden {
                return;
            }
            self.hidden = false;
            if self.phase == Phase::Active {
                self.deplete(now);
            }
        } else {
            if self.hidden {
                return;
            }
            if self.phase == Phase::Active {
                self.deplete(now);
            }
            self.hidden = true;
        }
    }

    /// Move past an answered question once its feedback delay is over.
    /// Safe to call any time; does nothing until the deadline passes.
    pub fn advance_if_due(&mut self, now: Instant) {
        if self.phase != Phase::Active {
            return;
        }
        let Some(due) = self.advance_due else {
            return;
        };
        if now < due {
            return;
        }
        self.advance_due = None;
        self.feedback = None;
        self.current += 1;
        if self.current >= self.questions.len() {
            self.finish(FinishReason::Completed);
        }
    }

    /// The finish payload, yielded at most once.
    pub fn take_report(&mut self) -> Option<StatReport> {
        self.report.take()
    }

    fn try_activate(&mut self, now: Instant) {
        if now.saturating_duration_since(self.loading_since) < MIN_LOADING {
            return;
        }
        let Some(questions) = self.loaded.take() else {
            return;
        };
        self.questions = questions;
        self.phase = Phase::Active;
        self.clock = CLOCK_CEILING;
        self.checkpoint = Some(now);
        self.started_at = Some(Utc::now());
        if self.questions.is_empty() {
            self.finish(FinishReason::NoQuestions);
        }
    }

    /// Charge the clock for real time elapsed since the last checkpoint.
    fn deplete(&mut self, now: Instant) {
        if let Some(checkpoint) = self.checkpoint {
            let elapsed = now.saturating_duration_since(checkpoint).as_secs_f64();
            self.clock = (self.clock - elapsed).max(0.0);
        }
        self.checkpoint = Some(now);
        if self.phase == Phase::Active && self.clock <= CLOCK_EPSILON {
            self.clock = 0.0;
            self.finish(FinishReason::TimeExpired);
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        if self.phase == Phase::Finished {
            return;
        }
        self.phase = Phase::Finished;
        self.finish_reason = Some(reason);
        self.advance_due = None;
        self.feedback = None;
        self.checkpoint = None;
        self.finished_at = Some(Utc::now());
        self.report = Some(StatReport::new(
            &self.category,
            self.user_id.clone(),
            self.tally,
        ));
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn clock_ratio(&self) -> f64 {
        (self.clock / CLOCK_CEILING).clamp(0.0, 1.0)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn feedback(&self) -> Option<AnswerFeedback> {
        self.feedback
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn tally(&self) -> ScoreTally {
        self.tally
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }
}
