use super::*;

/// Tests writing to the outbox and reading pending items in order.
///
/// Expected: Ok with PENDING notifications, oldest first, capped by the limit
#[tokio::test]
async fn enqueues_pending_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = NotificationRepository::new(db);
    let first = repo.enqueue(message("a@example.com")).await?;
    let second = repo.enqueue(message("b@example.com")).await?;
    repo.enqueue(message("c@example.com")).await?;
    factory::notification::NotificationFactory::new(db)
        .status("SENT")
        .build()
        .await?;

    assert_eq!(first.status, NotificationStatus::Pending);
    assert_eq!(first.attempts, 0);

    let pending = repo.get_pending(2).await?;
    let ids: Vec<i32> = pending.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let for_a = repo.get_by_recipient("a@example.com").await?;
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].kind, NotificationKind::ReservationConfirmation);

    Ok(())
}
