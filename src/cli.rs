use clap::Parser;

pub const SERVER_ENV: &str = "CODEQUIZ_SERVER";
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

#[derive(Parser, Debug)]
#[command(name = "codequiz", version, about = "Timed multiple-choice quizzes in the terminal")]
pub struct Cli {
    /// Question category to play (e.g. javascript, go, postgresql)
    pub category: String,

    /// Base URL of the quiz platform [env: CODEQUIZ_SERVER] [default: http://localhost:8000]
    #[arg(long, value_name = "url")]
    pub server: Option<String>,

    /// Identity to file the score report under
    #[arg(long, value_name = "id")]
    pub user: Option<String>,
}

impl Cli {
    /// Flag beats environment beats the localhost default.
    pub fn server_url(&self) -> String {
        self.server
            .clone()
            .or_else(|| std::env::var(SERVER_ENV).ok())
            .unwrap_or_else(|| DEFAULT_SERVER.to_string())
    }
}
