use super::*;

/// Tests paginating users ordered by name.
///
/// Expected: Ok with users sorted by last name and the full total
#[tokio::test]
async fn paginates_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    for last_name in ["Ziani", "Alaoui", "Mansouri"] {
        factory::user::UserFactory::new(db)
            .last_name(last_name)
            .build()
            .await?;
    }

    let repo = UserRepository::new(db);
    let (users, total) = repo.get_all_paginated(0, 2).await?;

    assert_eq!(total, 3);
    let names: Vec<&str> = users.iter().map(|u| u.last_name.as_str()).collect();
    assert_eq!(names, vec!["Alaoui", "Mansouri"]);

    Ok(())
}
