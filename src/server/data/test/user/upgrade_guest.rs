use super::*;

/// Tests turning a guest account into a registered one.
///
/// Expected: Ok(Some) with a password hash and the new names, same id and email
#[tokio::test]
async fn registers_existing_guest() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let guest = factory::user::UserFactory::new(db)
        .email("guest@example.com")
        .guest()
        .build()
        .await?;

    let repo = UserRepository::new(db);
    assert!(!repo.find_by_id(guest.id).await?.unwrap().is_registered());

    let upgraded = repo
        .upgrade_guest(guest.id, new_user("guest@example.com"))
        .await?
        .unwrap();

    assert_eq!(upgraded.id, guest.id);
    assert_eq!(upgraded.first_name, "Nadia");
    assert!(upgraded.is_registered());

    Ok(())
}
