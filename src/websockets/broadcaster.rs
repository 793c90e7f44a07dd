use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Transport-side fan-out: deliver an already-encoded event to a single
/// connection, a named group, or every connection. A room name doubles as a
/// group name. Sends to connections that are already gone are swallowed.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn add_connection(&self, conn_id: String, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, conn_id: &str);

    async fn join_group(&self, conn_id: &str, group: &str);

    async fn leave_group(&self, conn_id: &str, group: &str);

    async fn send_to(&self, conn_id: &str, message: &str);

    async fn send_to_group(&self, group: &str, message: &str);

    async fn send_to_group_except(&self, group: &str, skip_conn_id: &str, message: &str);

    async fn send_to_all(&self, message: &str);

    async fn send_to_all_except(&self, skip_conn_id: &str, message: &str);
}

pub struct InMemoryBroadcaster {
    // conn_id -> sender
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
    // group name -> member conn_ids
    groups: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl InMemoryBroadcaster {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            groups: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for InMemoryBroadcaster {
    async fn add_connection(&self, conn_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(conn_id, sender);
    }

    async fn remove_connection(&self, conn_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(conn_id);
        drop(connections);

        let mut groups = self.groups.write().await;
        for members in groups.values_mut() {
            members.remove(conn_id);
        }
        groups.retain(|_, members| !members.is_empty());
    }

    async fn join_group(&self, conn_id: &str, group: &str) {
        let mut groups = self.groups.write().await;
        groups
            .entry(group.to_string())
            .or_default()
            .insert(conn_id.to_string());
    }

    async fn leave_group(&self, conn_id: &str, group: &str) {
        let mut groups = self.groups.write().await;
        if let Some(members) = groups.get_mut(group) {
            members.remove(conn_id);
            if members.is_empty() {
                groups.remove(group);
            }
        }
    }

    async fn send_to(&self, conn_id: &str, message: &str) {
        let connections = self.connections.read().await;
        if let Some(sender) = connections.get(conn_id) {
            let _ = sender.send(message.to_string());
        }
    }

    async fn send_to_group(&self, group: &str, message: &str) {
        let groups = self.groups.read().await;
        let Some(members) = groups.get(group) else {
            return;
        };

        let connections = self.connections.read().await;
        for conn_id in members {
            if let Some(sender) = connections.get(conn_id) {
                let _ = sender.send(message.to_string());
            }
        }
    }

    async fn send_to_group_except(&self, group: &str, skip_conn_id: &str, message: &str) {
        let groups = self.groups.read().await;
        let Some(members) = groups.get(group) else {
            return;
        };

        let connections = self.connections.read().await;
        for conn_id in members {
            if conn_id == skip_conn_id {
                continue;
            }
            if let Some(sender) = connections.get(conn_id) {
                let _ = sender.send(message.to_string());
            }
        }
    }

    async fn send_to_all(&self, message: &str) {
        let connections = self.connections.read().await;
        for sender in connections.values() {
            let _ = sender.send(message.to_string());
        }
    }

    async fn send_to_all_except(&self, skip_conn_id: &str, message: &str) {
        let connections = self.connections.read().await;
        for (conn_id, sender) in connections.iter() {
            if conn_id == skip_conn_id {
                continue;
            }
            let _ = sender.send(message.to_string());
        }
    }
}
