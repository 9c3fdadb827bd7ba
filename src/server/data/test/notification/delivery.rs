use super::*;

/// Tests marking a notification as sent.
///
/// Expected: SENT with one attempt and a sent timestamp
#[tokio::test]
async fn marks_notification_sent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = NotificationRepository::new(db);
    let notification = repo.enqueue(message("a@example.com")).await?;
    repo.mark_sent(notification.id, Utc::now()).await?;

    let stored = repo.find_by_id(notification.id).await?.unwrap();

    assert_eq!(stored.status, NotificationStatus::Sent);
    assert_eq!(stored.attempts, 1);
    assert!(stored.sent_at.is_some());
    assert!(repo.get_pending(10).await?.is_empty());

    Ok(())
}

/// Tests that failures are retried until the attempt limit.
///
/// Expected: PENDING after the first failure, FAILED once attempts reach the limit
#[tokio::test]
async fn fails_after_max_attempts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let notification = factory::notification::NotificationFactory::new(db)
        .attempts(3)
        .build()
        .await?;

    let repo = NotificationRepository::new(db);
    let after_fourth = repo
        .record_failure(notification.id, "smtp timeout", 5)
        .await?;
    let after_fifth = repo
        .record_failure(notification.id, "smtp timeout", 5)
        .await?;

    assert_eq!(after_fourth, Some(NotificationStatus::Pending));
    assert_eq!(after_fifth, Some(NotificationStatus::Failed));

    let stored = repo.find_by_id(notification.id).await?.unwrap();
    assert_eq!(stored.attempts, 5);
    assert_eq!(stored.last_error.as_deref(), Some("smtp timeout"));
    assert!(repo.record_failure(999, "x", 5).await?.is_none());

    Ok(())
}
