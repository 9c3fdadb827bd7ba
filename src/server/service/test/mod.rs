use std::sync::Mutex;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use test_utils::factory;

use crate::server::{
    error::AppError,
    mail::{MailError, Mailer, OutgoingMail},
    model::{car::Car, user::User},
};

mod reservation;

/// Mailer that keeps delivered mail in memory, or fails every delivery.
#[derive(Default)]
pub(super) struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("relay unreachable".to_string()));
        }

        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

pub(super) async fn registered_user(db: &DatabaseConnection) -> Result<User, AppError> {
    User::from_entity(factory::create_user(db).await?)
}

pub(super) async fn admin_user(db: &DatabaseConnection) -> Result<User, AppError> {
    User::from_entity(factory::user::create_admin(db).await?)
}

pub(super) async fn car_priced(
    db: &DatabaseConnection,
    price_per_day_cents: i64,
) -> Result<Car, AppError> {
    Car::from_entity(
        factory::car::CarFactory::new(db)
            .price_per_day_cents(price_per_day_cents)
            .build()
            .await?,
    )
}
