use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::{info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{QuestionBatch, StatReport, UserStat};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
}

/// Thin blocking client for the quiz platform. Cheap to clone; every
/// request runs on a worker thread so the event loop never blocks on the
/// network.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn fetch_questions(&self, category: &str) -> Result<QuestionBatch, ApiError> {
        let url = format!("{}/questions/{}", self.base, category);
        let resp = self.http.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json()?)
    }

    pub fn report_stats(&self, report: &StatReport) -> Result<UserStat, ApiError> {
        let url = format!("{}/stats/", self.base);
        let resp = self.http.post(&url).json(report).send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        let envelope: StatEnvelope = resp.json()?;
        Ok(envelope.data)
    }
}

#[derive(Debug, Deserialize)]
struct StatEnvelope {
    data: UserStat,
}

#[derive(Debug)]
pub enum FetchEvent {
    Loaded(QuestionBatch),
}

#[derive(Debug)]
pub enum ReportEvent {
    Acked(UserStat),
    Failed,
}

/// Fetch a category's questions in the background. Failures degrade to an
/// empty batch so the quiz can finish cleanly instead of crashing out of
/// the terminal UI.
pub fn spawn_fetch(client: ApiClient, category: String) -> mpsc::Receiver<FetchEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let batch = match client.fetch_questions(&category) {
            Ok(batch) => {
                info!(
                    "fetched {} questions for {:?} ({} in play order)",
                    batch.data.len(),
                    category,
                    batch.numbers.len()
                );
                batch
            }
            Err(e) => {
                warn!("question fetch for {:?} failed, starting empty: {}", category, e);
                QuestionBatch::default()
            }
        };
        let _ = tx.send(FetchEvent::Loaded(batch));
    });

    rx
}

/// Ship the finish-line score report in the background. Fire and forget:
/// a failure is logged and the summary simply goes without platform stats.
pub fn spawn_report(client: ApiClient, report: StatReport) -> mpsc::Receiver<ReportEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let event = match client.report_stats(&report) {
            Ok(stat) => {
                info!(
                    "score report for {:?} acknowledged (total {}, rank {})",
                    report.category, stat.total_score, stat.rank
                );
                ReportEvent::Acked(stat)
            }
            Err(e) => {
                warn!("score report for {:?} failed: {}", report.category, e);
                ReportEvent::Failed
            }
        };
        let _ = tx.send(event);
    });

    rx
}
