use super::*;

/// Tests that only provided fields change and an empty phone clears it.
///
/// Expected: Ok(Some) with new first name, unchanged last name and no phone
#[tokio::test]
async fn applies_partial_update() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::user::UserFactory::new(db)
        .last_name("Tazi")
        .phone("+212600000000")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_profile(
            user.id,
            UpdateProfileParams {
                first_name: Some("Karim".to_string()),
                last_name: None,
                phone: Some(String::new()),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.first_name, "Karim");
    assert_eq!(updated.last_name, "Tazi");
    assert!(updated.phone.is_none());

    Ok(())
}
