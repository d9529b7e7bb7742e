// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tally activity timer"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    /// Override the configured inactivity timeout
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Start tracking as soon as the daemon is up
    #[arg(long, action)]
    pub start: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Start tracking time")]
    Start,

    #[command(about = "Stop tracking time")]
    Stop,

    #[command(about = "Start or stop tracking")]
    Toggle,

    #[command(about = "Display elapsed time and inactivity state")]
    Info {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Stop the running Tally daemon")]
    Quit,
}

impl Command {
    /// Wire form sent over the control socket.
    pub fn to_ipc(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Stop => "stop",
            Command::Toggle => "toggle",
            Command::Info { json: true } => "info --json",
            Command::Info { json: false } => "info",
            Command::Quit => "quit",
        }
    }
}
