use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;

const ROOM_CAPACITY: usize = 32;

/// Live notification pushed to a user's room.
#[derive(Debug, Clone, Serialize)]
pub struct SocketEvent {
    pub name: &'static str,
    pub payload: Value,
}

impl SocketEvent {
    pub fn notification(payload: Value) -> Self {
        Self {
            name: "notification:new",
            payload,
        }
    }
}

/// In-process fan-out hub. Rooms are keyed per user (`user:{id}`);
/// emission is fire-and-forget: a room with no subscribers drops the
/// event silently.
#[derive(Clone, Default)]
pub struct NotificationHub {
    rooms: Arc<RwLock<HashMap<Uuid, broadcast::Sender<SocketEvent>>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room_name(user_id: Uuid) -> String {
        format!("user:{}", user_id)
    }

    pub async fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<SocketEvent> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    pub async fn emit(&self, user_id: Uuid, event: SocketEvent) {
        let rooms = self.rooms.read().await;
        match rooms.get(&user_id) {
            Some(sender) => {
                let delivered = sender.send(event).unwrap_or(0);
                debug!(
                    room = %Self::room_name(user_id),
                    subscribers = delivered,
                    "Emitted notification"
                );
            }
            None => {
                debug!(room = %Self::room_name(user_id), "No subscribers, event dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let hub = NotificationHub::new();
        let user = Uuid::new_v4();

        let mut rx = hub.subscribe(user).await;
        hub.emit(user, SocketEvent::notification(json!({"type": "team_invite"})))
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, "notification:new");
        assert_eq!(event.payload["type"], "team_invite");
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_a_noop() {
        let hub = NotificationHub::new();
        // No panic, no error
        hub.emit(Uuid::new_v4(), SocketEvent::notification(json!({})))
            .await;
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        let hub = NotificationHub::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let mut rx_a = hub.subscribe(a).await;
        let _rx_b = hub.subscribe(b).await;

        hub.emit(b, SocketEvent::notification(json!({"for": "b"}))).await;

        assert!(rx_a.try_recv().is_err());
    }

    #[test]
    fn test_room_naming_convention() {
        let id = Uuid::nil();
        assert_eq!(
            NotificationHub::room_name(id),
            "user:00000000-0000-0000-0000-000000000000"
        );
    }
}
