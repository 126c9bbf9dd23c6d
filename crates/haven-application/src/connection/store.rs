use crate::identity::IdentityStore;
use crate::seed::supporter_directory;
use haven_core::connection::{Connection, ConnectionStatus, Message};
use haven_core::supporter::Supporter;
use haven_core::user::{Role, SessionUser};
use haven_core::{HavenError, Result, new_id, now_iso8601};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Support requests and their message threads.
///
/// The sender of every mutation is the identity store's current session.
pub struct ConnectionStore {
    connections: RwLock<Vec<Connection>>,
    identity: Arc<IdentityStore>,
    supporters: Vec<Supporter>,
}

impl ConnectionStore {
    pub fn new(identity: Arc<IdentityStore>) -> Self {
        Self::with_directory(identity, supporter_directory())
    }

    pub fn with_directory(identity: Arc<IdentityStore>, supporters: Vec<Supporter>) -> Self {
        Self {
            connections: RwLock::new(Vec::new()),
            identity,
            supporters,
        }
    }

    /// The vetted supporter directory.
    pub fn supporters(&self) -> &[Supporter] {
        &self.supporters
    }

    pub fn supporter(&self, id: &str) -> Option<&Supporter> {
        self.supporters.iter().find(|s| s.id == id)
    }

    /// Opens a pending connection from the signed-in survivor to a supporter,
    /// seeded with `message`.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` unless a survivor is signed in.
    pub async fn request_connection(&self, supporter_id: &str, message: &str) -> Result<Connection> {
        let user = self
            .identity
            .current_user()
            .await
            .filter(|user| user.role == Role::Survivor)
            .ok_or(HavenError::NoActiveSession)?;

        let now = now_iso8601();
        let connection = Connection {
            id: new_id("c"),
            survivor_id: user.id.clone(),
            supporter_id: supporter_id.to_string(),
            status: ConnectionStatus::Pending,
            survivor_alias: user.display_name().to_string(),
            messages: vec![Message {
                id: new_id("m"),
                sender_id: user.id.clone(),
                content: message.to_string(),
                timestamp: now.clone(),
            }],
            last_updated: now,
        };

        self.connections.write().await.push(connection.clone());
        tracing::info!(
            connection_id = %connection.id,
            supporter_id = %supporter_id,
            "[Connection] Requested"
        );
        Ok(connection)
    }

    /// Moves a connection to `status`.
    ///
    /// # Errors
    ///
    /// `ConnectionNotFound` for an unknown id, `IllegalTransition` unless the
    /// change is `pending→active`, `pending→closed` or `active→closed`.
    pub async fn update_connection_status(
        &self,
        connection_id: &str,
        status: ConnectionStatus,
    ) -> Result<Connection> {
        let mut connections = self.connections.write().await;
        let connection = connections
            .iter_mut()
            .find(|c| c.id == connection_id)
            .ok_or_else(|| HavenError::connection_not_found(connection_id))?;

        let from = connection.status;
        connection.status = from.transition(status)?;
        tracing::info!(
            connection_id = %connection_id,
            from = %from,
            to = %status,
            "[Connection] Status changed"
        );
        Ok(connection.clone())
    }

    /// Supporter accepts a pending request.
    pub async fn accept(&self, connection_id: &str) -> Result<Connection> {
        self.update_connection_status(connection_id, ConnectionStatus::Active)
            .await
    }

    /// Supporter declines a pending request, or either side ends an active one.
    pub async fn close(&self, connection_id: &str) -> Result<Connection> {
        self.update_connection_status(connection_id, ConnectionStatus::Closed)
            .await
    }

    /// Appends a message from the signed-in user.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` if nobody is signed in, `ConnectionNotFound` for an
    /// unknown id.
    pub async fn send_message(&self, connection_id: &str, content: &str) -> Result<Message> {
        let user = self.identity.require_user().await?;

        let mut connections = self.connections.write().await;
        let connection = connections
            .iter_mut()
            .find(|c| c.id == connection_id)
            .ok_or_else(|| HavenError::connection_not_found(connection_id))?;

        let message = Message {
            id: new_id("m"),
            sender_id: user.id,
            content: content.to_string(),
            timestamp: now_iso8601(),
        };
        connection.push_message(message.clone());
        tracing::debug!(connection_id = %connection_id, "[Connection] Message appended");
        Ok(message)
    }

    /// Snapshot of all connections, in request order.
    pub async fn connections(&self) -> Vec<Connection> {
        self.connections.read().await.clone()
    }

    pub async fn get(&self, connection_id: &str) -> Option<Connection> {
        self.connections
            .read()
            .await
            .iter()
            .find(|c| c.id == connection_id)
            .cloned()
    }

    /// Connections where `user` is the survivor or the supporter. Admins see all.
    pub async fn connections_for(&self, user: &SessionUser) -> Vec<Connection> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|c| user.role == Role::Admin || c.involves(&user.id))
            .cloned()
            .collect()
    }

    pub async fn reset(&self) {
        self.connections.write().await.clear();
    }
}
