use clap::Parser;
use log::info;

use codequiz::api::ApiClient;
use codequiz::cli::Cli;
use codequiz::{timer, tui};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let server = cli.server_url();

    let client =
        ApiClient::new(&server).map_err(|e| format!("Cannot build HTTP client: {}", e))?;
    info!("playing {:?} against {}", cli.category, client.base());
    let app = tui::App::new(client, cli.category, cli.user);
    let tick_rx = timer::spawn_ticker();

    tui::run_tui(app, tick_rx)
}
