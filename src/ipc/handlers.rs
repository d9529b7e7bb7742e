// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::manager_msg::{ControlCommand, ManagerMsg};

/// JSON waybar shows when the daemon cannot answer.
pub const NOT_RUNNING_JSON: &str =
    r#"{"text":"","alt":"not_running","class":"not_running","tooltip":"Tally not running"}"#;

/// Handle `start`, `stop`, `toggle` and `quit`.
///
/// Replies once the daemon has applied the command.
pub async fn handle_control(tx: &mpsc::Sender<ManagerMsg>, command: ControlCommand) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx
        .send(ManagerMsg::Control {
            command,
            reply: Some(reply_tx),
        })
        .await
        .is_err()
    {
        return "Tally daemon not running".to_string();
    }

    match reply_rx.await {
        Ok(Ok(msg)) => msg.trim_end().to_string(),
        Ok(Err(e)) => {
            let out = e.trim_end();
            if out.is_empty() {
                format!("ERROR: {} failed", command.as_str())
            } else {
                format!("ERROR: {out}")
            }
        }
        Err(_) => "ERROR: No response from daemon".to_string(),
    }
}

/// Handle `info` and `info --json`.
pub async fn handle_info(tx: &mpsc::Sender<ManagerMsg>, as_json: bool) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    let snapshot = match tx.send(ManagerMsg::GetInfo { reply: reply_tx }).await {
        Ok(()) => reply_rx.await.ok(),
        Err(_) => None,
    };

    match (snapshot, as_json) {
        (Some(s), true) => {
            serde_json::to_string(&s.waybar).unwrap_or_else(|_| NOT_RUNNING_JSON.to_string())
        }
        (Some(s), false) => s.pretty_text,
        (None, true) => NOT_RUNNING_JSON.to_string(),
        (None, false) => "ERROR: No response from daemon".to_string(),
    }
}
