// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};
use std::process::Stdio;

use chrono::Local;
use futures::future::BoxFuture;
use tokio::process::Command;

use crate::config::TallyConfig;
use crate::core::{collab::Capture, error::CaptureError};
use crate::{sinfo, swarn};

/// Captures the screen by running a shell command that writes an image to stdout
/// (`grim -` on wlroots compositors).
#[derive(Debug, Clone)]
pub struct CommandCapture {
    command: Option<String>,
    save_dir: Option<PathBuf>,
}

impl CommandCapture {
    pub fn new(command: Option<String>, save_dir: Option<PathBuf>) -> Self {
        Self { command, save_dir }
    }

    /// Capture runs only when the image has somewhere to go.
    pub fn from_config(cfg: &TallyConfig) -> Self {
        let command = match (&cfg.capture_command, &cfg.capture_dir) {
            (None, _) => {
                swarn!("Tally", "capture disabled (empty capture_command)");
                None
            }
            (Some(_), None) => {
                swarn!("Tally", "capture disabled (no capture_dir)");
                None
            }
            (Some(cmd), Some(_)) => Some(cmd.clone()),
        };

        Self::new(command, cfg.capture_dir.clone())
    }

    async fn run(&self) -> Result<Vec<u8>, CaptureError> {
        let Some(command) = self.command.as_deref() else {
            return Err(CaptureError::Disabled);
        };

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(CaptureError::Spawn)?;

        if !output.status.success() {
            return Err(CaptureError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if output.stdout.is_empty() {
            return Err(CaptureError::Empty);
        }

        if let Some(dir) = &self.save_dir {
            let path = save_image(dir, &output.stdout).await?;
            sinfo!("Tally", "Screenshot saved: {}", path.display());
        }

        Ok(output.stdout)
    }
}

impl Capture for CommandCapture {
    fn capture(&self) -> BoxFuture<'_, Result<Vec<u8>, CaptureError>> {
        Box::pin(self.run())
    }
}

fn capture_file_name() -> String {
    format!("screenshot-{}.png", Local::now().format("%Y%m%d-%H%M%S"))
}

async fn save_image(dir: &Path, bytes: &[u8]) -> Result<PathBuf, CaptureError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(CaptureError::Save)?;

    let path = dir.join(capture_file_name());
    tokio::fs::write(&path, bytes)
        .await
        .map_err(CaptureError::Save)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stdout_is_the_image() {
        let cap = CommandCapture::new(Some("printf PNGDATA".to_string()), None);
        assert_eq!(cap.capture().await.unwrap(), b"PNGDATA".to_vec());
    }

    #[tokio::test]
    async fn disabled_without_command() {
        let cap = CommandCapture::new(None, None);
        assert!(matches!(cap.capture().await, Err(CaptureError::Disabled)));
    }

    #[tokio::test]
    async fn failing_command_reports_status() {
        let cap = CommandCapture::new(Some("echo boom >&2; exit 3".to_string()), None);

        match cap.capture().await {
            Err(CaptureError::Failed { status, stderr }) => {
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_output_is_an_error() {
        let cap = CommandCapture::new(Some("true".to_string()), None);
        assert!(matches!(cap.capture().await, Err(CaptureError::Empty)));
    }

    #[tokio::test]
    async fn configured_capture_saves_each_shot() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TallyConfig {
            capture_command: Some("printf abc".to_string()),
            capture_dir: Some(dir.path().to_path_buf()),
            ..TallyConfig::default()
        };

        CommandCapture::from_config(&cfg).capture().await.unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn no_capture_dir_disables_capture() {
        let cfg = TallyConfig {
            capture_command: Some("printf abc".to_string()),
            capture_dir: None,
            ..TallyConfig::default()
        };

        let cap = CommandCapture::from_config(&cfg);
        assert!(matches!(cap.capture().await, Err(CaptureError::Disabled)));
    }

    #[tokio::test]
    async fn saves_into_capture_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("shots");
        let cap = CommandCapture::new(Some("printf abc".to_string()), Some(target.clone()));

        cap.capture().await.unwrap();

        let saved: Vec<_> = std::fs::read_dir(&target).unwrap().collect();
        assert_eq!(saved.len(), 1);

        let entry = saved.into_iter().next().unwrap().unwrap();
        let name = entry.file_name().to_string_lossy().to_string();
        assert!(name.starts_with("screenshot-") && name.ends_with(".png"));
        assert_eq!(std::fs::read(entry.path()).unwrap(), b"abc");
    }
}
