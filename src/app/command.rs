// Author: Dustin Pilgrim
// License: MIT

use crate::cli::Command;
use crate::ipc::handlers::NOT_RUNNING_JSON;

/// Client mode: forward one subcommand to the daemon and print the reply.
pub async fn run(cmd: &Command) -> eyre::Result<()> {
    match crate::ipc::client::send_raw(cmd.to_ipc()).await {
        Ok(resp) => {
            let out = resp.trim_end();
            if out.is_empty() {
                if let Some(fallback) = fallback_text(cmd) {
                    println!("{fallback}");
                }
            } else {
                println!("{out}");
            }
        }
        Err(e) => {
            if matches!(cmd, Command::Info { json: true }) {
                // Waybar needs valid JSON on stdout even when daemon isn't running.
                println!("{NOT_RUNNING_JSON}");
            } else {
                eprintln!("tally: {e}");
            }
        }
    }

    Ok(())
}

fn fallback_text(cmd: &Command) -> Option<&'static str> {
    match cmd {
        Command::Start => Some("Tracking started"),
        Command::Stop => Some("Tracking stopped"),
        Command::Quit => Some("Stopping tally"),
        Command::Toggle | Command::Info { .. } => None,
    }
}
