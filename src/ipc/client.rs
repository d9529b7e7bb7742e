// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::UnixStream,
    time::{Duration, timeout},
};

const STEP_TIMEOUT: Duration = Duration::from_secs(2);

/// Sends one command to the running daemon and returns its reply.
pub async fn send_raw(cmd: &str) -> Result<String, String> {
    let path = crate::ipc::socket_path()?;
    request(&path, cmd).await
}

/// One request per connection: write, half-close, read until EOF.
pub async fn request(path: &Path, cmd: &str) -> Result<String, String> {
    if !path.exists() {
        return Err("daemon not running".to_string());
    }

    let mut stream = timeout(STEP_TIMEOUT, UnixStream::connect(path))
        .await
        .map_err(|_| "timeout connecting to daemon".to_string())?
        .map_err(|e| format!("failed to connect to {}: {e}", path.display()))?;

    timeout(STEP_TIMEOUT, async {
        stream.write_all(cmd.as_bytes()).await?;
        stream.shutdown().await
    })
    .await
    .map_err(|_| "timeout writing to daemon".to_string())?
    .map_err(|e| format!("write failed: {e}"))?;

    let mut resp = Vec::new();
    timeout(STEP_TIMEOUT, stream.read_to_end(&mut resp))
        .await
        .map_err(|_| "timeout reading response".to_string())?
        .map_err(|e| format!("read failed: {e}"))?;

    Ok(String::from_utf8_lossy(&resp).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::UnixListener;

    #[tokio::test]
    async fn missing_socket_means_not_running() {
        let dir = tempfile::tempdir().unwrap();
        let err = request(&dir.path().join("tally.sock"), "info").await.unwrap_err();
        assert_eq!(err, "daemon not running");
    }

    #[tokio::test]
    async fn reply_is_read_to_eof() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.sock");
        let listener = UnixListener::bind(&path).unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut cmd = String::new();
            stream.read_to_string(&mut cmd).await.unwrap();
            stream
                .write_all(format!("got {cmd}").as_bytes())
                .await
                .unwrap();
        });

        assert_eq!(request(&path, "toggle").await.unwrap(), "got toggle");
    }
}
