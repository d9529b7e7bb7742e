// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use eyre::{WrapErr, eyre};
use tokio::sync::{mpsc, watch};

use crate::cli::Args;
use crate::config::{TallyConfig, parser};
use crate::core::{
    collab::InputSource,
    manager::Manager,
    manager_msg::{ControlCommand, ManagerMsg},
};
use crate::daemon::{Collaborators, Daemon};
use crate::log::{self, LogPolicy};
use crate::services::{
    capture::CommandCapture,
    console::{ConsoleDisplay, ConsoleInput, spawn_console},
    notify::{DbusNotifications, DesktopAlert},
    wayland::WaylandInput,
};
use crate::{serror, sinfo, swarn};

const CHANNEL_CAPACITY: usize = 256;

pub async fn run(args: Args) -> eyre::Result<()> {
    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| eyre!(e))?;

    log::set_verbose(args.verbose);
    init_file_logging();

    sinfo!("Tally", "tally starting");

    let cfg = load_config(&args)?;
    let console = ConsoleInput::new();
    let collab = build_collaborators(&cfg, console.clone());

    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ipc
    let socket = crate::ipc::socket_path().map_err(|e| eyre!(e))?;
    let listener = crate::ipc::server::bind(&socket)
        .wrap_err_with(|| format!("failed to bind control socket {}", socket.display()))?;
    crate::ipc::server::spawn_ipc_socket_with_listener(tx.clone(), listener);

    if let Err(e) = spawn_console(tx.clone(), console) {
        swarn!("Tally", "console input disabled: {}", e);
    }

    if args.start {
        let _ = tx
            .send(ManagerMsg::Control {
                command: ControlCommand::Start,
                reply: None,
            })
            .await;
    }

    let mut daemon = Daemon::new(Manager::new(cfg.inactivity_timeout_ms), collab);

    let mut daemon_task = tokio::spawn({
        let tx = tx.clone();
        async move { daemon.run(tx, rx, shutdown_rx).await }
    });

    let result = tokio::select! {
        res = &mut daemon_task => res,

        _ = tokio::signal::ctrl_c() => {
            sinfo!("Tally", "received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);
            daemon_task.await
        }
    };

    let _ = std::fs::remove_file(&socket);
    println!();

    result.wrap_err("daemon task panicked")?
}

fn init_file_logging() {
    let Some(path) = crate::app::platform::default_log_path() else {
        return;
    };

    let needs_blank = match log::prepare_log_file(&path, LogPolicy::default()) {
        Ok(b) => b,
        Err(e) => {
            serror!("Tally", "failed to prepare log file {}: {}", path.display(), e);
            return;
        }
    };

    if needs_blank {
        let _ = log::write_raw_line(&path, "");
    }
    let _ = log::write_raw_line(&path, &log::run_header());

    log::set_log_file(Some(path.clone()));
    sinfo!("Tally", "file logging enabled: {}", path.display());
}

fn load_config(args: &Args) -> eyre::Result<TallyConfig> {
    let mut cfg = crate::config::load(args.config.as_deref())?;

    if let Some(ms) = args.timeout_ms {
        cfg.inactivity_timeout_ms = ms;
    }

    parser::validate(&cfg)?;
    Ok(cfg)
}

fn build_collaborators(cfg: &TallyConfig, console: ConsoleInput) -> Collaborators {
    Collaborators {
        capture: Arc::new(CommandCapture::from_config(cfg)),
        alert: Arc::new(DesktopAlert::new(DbusNotifications, cfg.notifications.into())),
        display: Arc::new(ConsoleDisplay::new(cfg.console_display)),
        inputs: vec![
            Arc::new(WaylandInput) as Arc<dyn InputSource>,
            Arc::new(console),
        ],
    }
}
