// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;

use futures::future::BoxFuture;
use tokio::sync::Mutex;
use zbus::Connection;
use zvariant::Value;

use crate::config::model::NotificationPolicy;
use crate::core::{collab::Alert, error::AlertError};
use crate::{sdebug, sinfo, swarn};

const NOTIFY_DEST: &str = "org.freedesktop.Notifications";
const NOTIFY_PATH: &str = "/org/freedesktop/Notifications";
const NOTIFY_IFACE: &str = "org.freedesktop.Notifications";

const APP_NAME: &str = "Tally";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Undetermined,
}

impl From<NotificationPolicy> for Permission {
    fn from(policy: NotificationPolicy) -> Self {
        match policy {
            NotificationPolicy::Ask => Permission::Undetermined,
            NotificationPolicy::Always => Permission::Granted,
            NotificationPolicy::Never => Permission::Denied,
        }
    }
}

/// Where notifications actually go.
pub trait NotificationBackend: Send + Sync + 'static {
    /// Asks for permission to show notifications. Called only while undetermined.
    fn request_permission(&self) -> BoxFuture<'_, Permission>;

    fn show<'a>(&'a self, title: &'a str, body: &'a str) -> BoxFuture<'a, Result<(), AlertError>>;
}

/// Alert collaborator with a permission gate in front of the backend.
///
/// Granted: show. Denied: skip silently. Undetermined: request once, then act on the answer.
pub struct DesktopAlert<B> {
    backend: B,
    permission: Mutex<Permission>,
}

impl<B: NotificationBackend> DesktopAlert<B> {
    pub fn new(backend: B, initial: Permission) -> Self {
        Self {
            backend,
            permission: Mutex::new(initial),
        }
    }

    async fn deliver(&self, title: &str, body: &str) -> Result<bool, AlertError> {
        let permission = {
            // Held across the request so concurrent alerts share one prompt.
            let mut perm = self.permission.lock().await;
            if *perm == Permission::Undetermined {
                *perm = self.backend.request_permission().await;
                sinfo!("Tally", "Notification permission: {:?}", *perm);
            }
            *perm
        };

        match permission {
            Permission::Granted => {
                self.backend.show(title, body).await?;
                Ok(true)
            }
            Permission::Denied | Permission::Undetermined => {
                sdebug!("Tally", "Notification skipped ({:?})", permission);
                Ok(false)
            }
        }
    }
}

impl<B: NotificationBackend> Alert for DesktopAlert<B> {
    fn notify<'a>(&'a self, title: &'a str, body: &'a str) -> BoxFuture<'a, Result<bool, AlertError>> {
        Box::pin(self.deliver(title, body))
    }
}

/// freedesktop notifications over the session bus.
#[derive(Debug, Default, Clone)]
pub struct DbusNotifications;

impl DbusNotifications {
    async fn connect() -> Result<Connection, AlertError> {
        Connection::session()
            .await
            .map_err(|e| AlertError::Unavailable(e.to_string()))
    }

    async fn query_server(&self) -> Permission {
        let conn = match Self::connect().await {
            Ok(c) => c,
            Err(e) => return permission_from_reply(Err(e)),
        };

        let reply = conn
            .call_method(
                Some(NOTIFY_DEST),
                NOTIFY_PATH,
                Some(NOTIFY_IFACE),
                "GetServerInformation",
                &(),
            )
            .await
            .map(|_| ())
            .map_err(|e| AlertError::Unavailable(format!("notification server: {e}")));

        permission_from_reply(reply)
    }

    async fn send(&self, title: &str, body: &str) -> Result<(), AlertError> {
        let conn = Self::connect().await?;

        let actions: Vec<&str> = Vec::new();
        let hints: HashMap<&str, Value<'_>> = HashMap::new();

        conn.call_method(
            Some(NOTIFY_DEST),
            NOTIFY_PATH,
            Some(NOTIFY_IFACE),
            "Notify",
            &(APP_NAME, 0u32, "", title, body, actions, hints, -1i32),
        )
        .await
        .map_err(|e| AlertError::Rejected(e.to_string()))?;

        Ok(())
    }
}

/// A server that is not up yet leaves the question open; only `never` denies.
fn permission_from_reply(reply: Result<(), AlertError>) -> Permission {
    match reply {
        Ok(()) => Permission::Granted,
        Err(e) => {
            swarn!("Tally", "{}; will ask again on the next alert", e);
            Permission::Undetermined
        }
    }
}

impl NotificationBackend for DbusNotifications {
    fn request_permission(&self) -> BoxFuture<'_, Permission> {
        Box::pin(self.query_server())
    }

    fn show<'a>(&'a self, title: &'a str, body: &'a str) -> BoxFuture<'a, Result<(), AlertError>> {
        Box::pin(self.send(title, body))
    }
}
