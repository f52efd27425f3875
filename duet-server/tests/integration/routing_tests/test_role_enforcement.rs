use duet_core::Role;

use crate::integration::{create_rooms, init_tracing};
use crate::utils::{TestPeer, answer, offer, settle};

#[tokio::test]
async fn test_offer_from_viewer_is_not_forwarded() {
    init_tracing();

    let rooms = create_rooms();
    let mut sender = TestPeer::new();
    let mut viewer = TestPeer::new();

    sender.join(&rooms, Role::Sender, "demo").await;
    viewer.join(&rooms, Role::Viewer, "demo").await;
    sender.drain();

    viewer.send(&rooms, offer("v=0 wrong side")).await;
    sender.send(&rooms, answer("v=0 wrong side")).await;
    settle(&rooms).await;

    assert!(sender.drain().is_empty());
    assert_eq!(viewer.drain().len(), 1, "only the viewer's own joined");
}

#[tokio::test]
async fn test_offer_without_viewer_is_dropped() {
    init_tracing();

    let rooms = create_rooms();
    let mut sender = TestPeer::new();

    sender.join(&rooms, Role::Sender, "demo").await;
    let before = settle(&rooms).await;
    sender.drain();

    sender.send(&rooms, offer("v=0 nobody home")).await;
    let after = settle(&rooms).await;

    assert!(sender.drain().is_empty());
    assert_eq!(before, after);
}
