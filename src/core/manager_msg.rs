// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::oneshot;

use crate::core::{events::InputKind, info::InfoSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Start,
    Stop,
    Toggle,
    Quit,
}

impl ControlCommand {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Some(ControlCommand::Start),
            "stop" => Some(ControlCommand::Stop),
            "toggle" => Some(ControlCommand::Toggle),
            "quit" | "exit" => Some(ControlCommand::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlCommand::Start => "start",
            ControlCommand::Stop => "stop",
            ControlCommand::Toggle => "toggle",
            ControlCommand::Quit => "quit",
        }
    }
}

pub type Reply = oneshot::Sender<Result<String, String>>;

/// Everything the daemon loop consumes. Timestamps are added on receipt.
#[derive(Debug)]
pub enum ManagerMsg {
    Input(InputKind),

    Tick { session: u64 },

    DeadlineElapsed { generation: u64 },

    Control {
        command: ControlCommand,
        reply: Option<Reply>,
    },

    GetInfo { reply: oneshot::Sender<InfoSnapshot> },
}
