pub mod api;
pub mod cli;
pub mod model;
pub mod session;
pub mod timer;
pub mod tui;
pub mod ui;
