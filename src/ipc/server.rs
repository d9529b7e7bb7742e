// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc,
    time::{Duration, timeout},
};

use crate::core::manager_msg::ManagerMsg;
use crate::{sdebug, serror, sinfo};

use super::router::route_command;

/// Binds the control socket, replacing a stale one left by a crashed daemon.
///
/// Must only be called while holding the single-instance lock.
pub fn bind(path: &Path) -> std::io::Result<UnixListener> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if path.exists() {
        let _ = std::fs::remove_file(path);
    }

    let listener = UnixListener::bind(path)?;
    sinfo!("Tally", "ipc: listening on {}", path.display());
    Ok(listener)
}

/// Spawns the IPC socket server that listens for incoming commands
pub fn spawn_ipc_socket_with_listener(tx: mpsc::Sender<ManagerMsg>, listener: UnixListener) {
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut stream, _addr)) => {
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        let result = timeout(Duration::from_secs(10), async {
                            if let Err(e) = handle_connection(&mut stream, &tx).await {
                                serror!("Tally", "Error handling IPC connection: {}", e);
                            }
                        })
                        .await;

                        if result.is_err() {
                            serror!("Tally", "IPC connection timed out after 10 seconds");
                        }

                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => serror!("Tally", "Failed to accept IPC connection: {}", e),
            }
        }
    });
}

/// Handles a single IPC connection
async fn handle_connection(
    stream: &mut UnixStream,
    tx: &mpsc::Sender<ManagerMsg>,
) -> std::io::Result<()> {
    let mut buf = vec![0u8; 256];
    let n = stream.read(&mut buf).await?;

    if n == 0 {
        return Ok(());
    }

    let cmd = String::from_utf8_lossy(&buf[..n]).trim().to_string();

    // waybar polls `info --json`; keep it out of the debug log
    if !cmd.contains("--json") {
        sdebug!("Tally", "Received IPC command: {}", cmd);
    }

    let response = route_command(&cmd, tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
