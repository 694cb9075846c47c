//! Cross-component integration tests
//!
//! These tests wire the queue service, store and broadcaster together
//! the same way the server does, without starting an HTTP listener.

use std::sync::Arc;

use tokio::sync::mpsc;

use queue_ticket_service::broadcast::{ObserverRegistry, QueueBroadcaster};
use queue_ticket_service::error::AppError;
use queue_ticket_service::queue::{QueueService, TicketStatus};
use queue_ticket_service::store::MemoryStore;
use queue_ticket_service::websocket::{OutboundMessage, ServerMessage};

struct TestEnvironment {
    registry: Arc<ObserverRegistry>,
    broadcaster: Arc<QueueBroadcaster>,
    queue: Arc<QueueService>,
}

fn create_test_environment() -> TestEnvironment {
    let registry = Arc::new(ObserverRegistry::new());
    let broadcaster = Arc::new(QueueBroadcaster::new(registry.clone()));
    let queue = Arc::new(QueueService::new(
        Arc::new(MemoryStore::new()),
        broadcaster.clone(),
    ));

    TestEnvironment {
        registry,
        broadcaster,
        queue,
    }
}

/// Subscribe an observer the way the WebSocket handler does: register a
/// channel and immediately deliver the current projection.
async fn subscribe(env: &TestEnvironment) -> mpsc::Receiver<OutboundMessage> {
    let (tx, rx) = mpsc::channel(32);
    let handle = env.registry.register(tx);
    let status = env.queue.status().await;
    handle
        .send(OutboundMessage::Message(ServerMessage::queue_update(status)))
        .await
        .expect("initial snapshot delivery");
    rx
}

fn payload(msg: &OutboundMessage) -> serde_json::Value {
    let json: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
    assert_eq!(json["kind"], "QUEUE_UPDATE");
    json["payload"].clone()
}

// =============================================================================
// End-to-end queue lifecycle
// =============================================================================

#[tokio::test]
async fn test_full_queue_lifecycle() {
    let env = create_test_environment();
    let queue = &env.queue;

    // Issue three tickets, all waiting
    for expected in 1..=3 {
        let item = queue.issue_ticket().await.unwrap();
        assert_eq!(item.number, expected);
        assert_eq!(item.status, TicketStatus::Waiting);
    }

    // Call next: ticket 1 is served
    queue.call_next().await.unwrap();
    let status = queue.status().await;
    assert_eq!(status.current_number, 1);
    assert_eq!(status.next_numbers, vec![2, 3]);

    // Complete 1: status changes, current number stays
    queue.complete_number(1).await.unwrap();
    let status = queue.status().await;
    assert_eq!(status.current_number, 1);
    let first = status.queue_items.iter().find(|i| i.number == 1).unwrap();
    assert_eq!(first.status, TicketStatus::Completed);

    // Call next advances to 2
    queue.call_next().await.unwrap();
    let status = queue.status().await;
    assert_eq!(status.current_number, 2);
    assert_eq!(status.next_numbers, vec![3]);

    // Remove 3: waiting set empties
    queue.remove_number(3).await.unwrap();
    let status = queue.status().await;
    assert!(status.next_numbers.is_empty());
    assert_eq!(status.waiting_count, 0);

    // Reset: everything cleared, numbering restarts at 1
    queue.reset_queue().await.unwrap();
    let status = queue.status().await;
    assert!(status.queue_items.is_empty());
    assert_eq!(status.current_number, 0);

    let item = queue.issue_ticket().await.unwrap();
    assert_eq!(item.number, 1);
}

#[tokio::test]
async fn test_call_next_exhausts_queue() {
    let env = create_test_environment();
    env.queue.issue_ticket().await.unwrap();

    env.queue.call_next().await.unwrap();
    assert!(matches!(
        env.queue.call_next().await,
        Err(AppError::NoWaitingNumbers)
    ));
}

// =============================================================================
// Broadcast behavior
// =============================================================================

#[tokio::test]
async fn test_new_subscriber_receives_current_projection() {
    let env = create_test_environment();
    env.queue.issue_ticket().await.unwrap();
    env.queue.issue_ticket().await.unwrap();
    env.queue.call_next().await.unwrap();

    let mut rx = subscribe(&env).await;

    let initial = rx.recv().await.unwrap();
    let expected = serde_json::to_value(env.queue.status().await).unwrap();
    assert_eq!(payload(&initial), expected);
}

#[tokio::test]
async fn test_mutations_are_pushed_to_observers() {
    let env = create_test_environment();
    let mut rx = subscribe(&env).await;

    // Drain the initial snapshot
    rx.recv().await.unwrap();

    env.queue.issue_ticket().await.unwrap();
    let update = payload(&rx.recv().await.unwrap());
    assert_eq!(update["nextNumbers"], serde_json::json!([1]));
    assert_eq!(update["waitingCount"], 1);

    env.queue.call_next().await.unwrap();
    let update = payload(&rx.recv().await.unwrap());
    assert_eq!(update["currentNumber"], 1);
    assert_eq!(update["waitingCount"], 0);
    assert!(update.get("lastCalledAt").is_some());
}

#[tokio::test]
async fn test_disconnected_observer_does_not_block_others() {
    let env = create_test_environment();

    let mut rx_live = subscribe(&env).await;
    let rx_dead = subscribe(&env).await;
    rx_live.recv().await.unwrap();
    drop(rx_dead);

    env.queue.issue_ticket().await.unwrap();

    // The live observer still gets the update
    let update = payload(&rx_live.recv().await.unwrap());
    assert_eq!(update["waitingCount"], 1);

    let stats = env.broadcaster.stats();
    assert!(stats.dropped >= 1);
}

#[tokio::test]
async fn test_settings_toggles_broadcast_too() {
    let env = create_test_environment();
    let mut rx = subscribe(&env).await;
    rx.recv().await.unwrap();

    env.queue.set_sound_enabled(false).await.unwrap();
    // A broadcast fires even though the projection carries no settings;
    // clients refetch preferences on update
    assert!(rx.recv().await.is_some());
    assert!(!env.queue.settings().await.sound_enabled);
}

// =============================================================================
// Fairness and invariants
// =============================================================================

#[tokio::test]
async fn test_numbers_are_not_reused_within_an_epoch() {
    let env = create_test_environment();
    let queue = &env.queue;

    queue.issue_ticket().await.unwrap();
    queue.issue_ticket().await.unwrap();
    queue.remove_number(2).await.unwrap();

    // Removing the highest ticket does not free its number
    let item = queue.issue_ticket().await.unwrap();
    assert_eq!(item.number, 3);
}

#[tokio::test]
async fn test_call_specific_overrides_fifo_order() {
    let env = create_test_environment();
    let queue = &env.queue;

    for _ in 0..3 {
        queue.issue_ticket().await.unwrap();
    }

    queue.call_number(3).await.unwrap();
    let status = queue.status().await;
    assert_eq!(status.current_number, 3);
    // Tickets 1 and 2 are still waiting, in order
    assert_eq!(status.next_numbers, vec![1, 2]);

    // FIFO resumes from the smallest waiting number
    queue.call_next().await.unwrap();
    assert_eq!(queue.status().await.current_number, 1);
}
