use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config, data::user::UserRepository, error::AppError, service::auth::AuthService,
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up to date before any request is
/// served. SQLite and Postgres URLs are both accepted.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Ensures an admin account exists.
///
/// When no admin exists and `ADMIN_EMAIL`/`ADMIN_PASSWORD` are configured, that account
/// is created or promoted. Without credentials a warning is logged, since admin-only
/// endpoints stay unreachable until someone is promoted in the database.
pub async fn check_for_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        if !UserRepository::new(db).admin_exists().await? {
            tracing::warn!("No admin account exists and ADMIN_EMAIL/ADMIN_PASSWORD are not set");
        }
        return Ok(());
    };

    let auth_service = AuthService::new(db, config.token_ttl);
    if let Some(admin) = auth_service.bootstrap_admin(email, password).await? {
        tracing::info!(user_id = admin.id, email = %admin.email, "Bootstrapped admin account");
    }

    Ok(())
}
