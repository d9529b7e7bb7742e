// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc;

use crate::core::manager_msg::{ControlCommand, ManagerMsg};
use crate::swarn;

use super::handlers::{handle_control, handle_info};

/// Routes incoming commands to appropriate handlers
pub async fn route_command(cmd: &str, tx: &mpsc::Sender<ManagerMsg>) -> String {
    if let Some(args) = cmd.strip_prefix("info") {
        if args.is_empty() || args.starts_with(char::is_whitespace) {
            let as_json = args.split_whitespace().any(|a| a == "--json");
            return handle_info(tx, as_json).await;
        }
    }

    match ControlCommand::parse(cmd) {
        Some(command) => handle_control(tx, command).await,
        None => {
            swarn!("Tally", "Unknown IPC command: {}", cmd);
            format!("ERROR: Unknown command '{cmd}'")
        }
    }
}
