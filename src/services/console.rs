// Author: Dustin Pilgrim
// License: MIT

use std::io::{BufRead, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::{
    collab::{DisplaySink, InputEmitter, InputSource},
    events::InputKind,
    info::DisplayFrame,
    manager_msg::{ControlCommand, ManagerMsg},
};
use crate::sdebug;

/// Terminal keyboard as an input source.
///
/// The reader thread runs for the whole daemon lifetime (it also carries control
/// commands); key presses are only forwarded while a subscription holds the slot.
#[derive(Debug, Clone, Default)]
pub struct ConsoleInput {
    slot: Arc<Mutex<Option<InputEmitter>>>,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit_key(&self) -> bool {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().is_some_and(|e| e.emit(InputKind::KeyPress))
    }
}

impl InputSource for ConsoleInput {
    fn subscribe(&self, emitter: InputEmitter) -> Option<JoinHandle<()>> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(emitter);
        None
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConsoleLine {
    Control(ControlCommand),
    Status,
    Key,
}

fn classify(line: &str) -> ConsoleLine {
    match line.trim().to_ascii_lowercase().as_str() {
        "status" | "info" => ConsoleLine::Status,
        "q" => ConsoleLine::Control(ControlCommand::Quit),
        "t" => ConsoleLine::Control(ControlCommand::Toggle),
        other => match ControlCommand::parse(other) {
            Some(cmd) => ConsoleLine::Control(cmd),
            None => ConsoleLine::Key,
        },
    }
}

/// Reads terminal lines on a plain thread until EOF.
///
/// Not a tokio task: a pending stdin read would otherwise hold the runtime open at exit.
pub fn spawn_console(tx: mpsc::Sender<ManagerMsg>, input: ConsoleInput) -> std::io::Result<()> {
    std::thread::Builder::new()
        .name("tally-console".to_string())
        .spawn(move || read_console(&tx, &input))?;
    Ok(())
}

fn read_console(tx: &mpsc::Sender<ManagerMsg>, input: &ConsoleInput) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                sdebug!("Tally", "console: read failed: {}", e);
                return;
            }
        };

        let sent = match classify(&line) {
            ConsoleLine::Control(command) => {
                // typing a command is still keyboard activity
                input.emit_key();
                tx.blocking_send(ManagerMsg::Control { command, reply: None }).is_ok()
            }
            ConsoleLine::Status => {
                let (reply, rx) = oneshot::channel();
                if tx.blocking_send(ManagerMsg::GetInfo { reply }).is_err() {
                    false
                } else {
                    if let Ok(snap) = rx.blocking_recv() {
                        println!("\n{}", snap.pretty_text);
                    }
                    true
                }
            }
            ConsoleLine::Key => {
                input.emit_key();
                !tx.is_closed()
            }
        };

        if !sent {
            return;
        }
    }

    sdebug!("Tally", "console: stdin closed");
}

/// Redraws a single status line on the terminal.
#[derive(Debug)]
pub struct ConsoleDisplay {
    enabled: bool,
    redraw: bool,
    last_inactive: Mutex<bool>,
}

impl ConsoleDisplay {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            redraw: std::io::stdout().is_terminal(),
            last_inactive: Mutex::new(false),
        }
    }
}

pub fn render_frame(frame: &DisplayFrame) -> String {
    let mut line = format!("Elapsed Time: {}", frame.elapsed);
    if !frame.tracking {
        line.push_str(" (stopped)");
    }
    if frame.inactive {
        line.push_str("  Inactivity detected. Screenshot taken.");
    }
    line
}

impl DisplaySink for ConsoleDisplay {
    fn show(&self, frame: &DisplayFrame) {
        if !self.enabled {
            return;
        }

        let mut last = self.last_inactive.lock().unwrap_or_else(|e| e.into_inner());
        let line = render_frame(frame);
        let mut out = std::io::stdout().lock();

        if self.redraw {
            // keep the inactivity notice on screen once it changes
            let sep = if *last != frame.inactive { "\n" } else { "\r\x1b[2K" };
            let _ = write!(out, "{sep}{line}");
        } else {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();

        *last = frame.inactive;
    }
}
