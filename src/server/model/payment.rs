//! Payment domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::payment::{CreatePaymentDto, PaginatedPaymentsDto, PaymentDto},
    server::{error::AppError, model::availability::PaymentOutcome},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub reservation_id: i32,
    pub amount_cents: i64,
    pub method: String,
    pub status: PaymentOutcome,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            reservation_id: entity.reservation_id,
            amount_cents: entity.amount_cents,
            method: entity.method,
            status: PaymentOutcome::from_stored(&entity.status)?,
            transaction_id: entity.transaction_id,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            reservation_id: self.reservation_id,
            amount_cents: self.amount_cents,
            method: self.method,
            status: self.status.as_str().to_string(),
            transaction_id: self.transaction_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePaymentParams {
    pub reservation_id: i32,
    pub amount_cents: i64,
    /// Uppercased, e.g. `CARD` or `CASH`.
    pub method: String,
    pub status: PaymentOutcome,
    pub transaction_id: Option<String>,
}

impl CreatePaymentParams {
    pub fn from_dto(dto: CreatePaymentDto) -> Result<Self, AppError> {
        let status = dto.status.parse::<PaymentOutcome>().map_err(|_| {
            AppError::BadRequest(format!("Unknown payment status '{}'", dto.status))
        })?;

        let method = dto.method.trim().to_uppercase();
        if method.is_empty() {
            return Err(AppError::BadRequest("Payment method is required".to_string()));
        }

        if dto.amount_cents <= 0 {
            return Err(AppError::BadRequest(
                "Payment amount must be positive".to_string(),
            ));
        }

        Ok(Self {
            reservation_id: dto.reservation_id,
            amount_cents: dto.amount_cents,
            method,
            status,
            transaction_id: dto.transaction_id.filter(|t| !t.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedPayments {
    pub payments: Vec<Payment>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedPayments {
    pub fn into_dto(self) -> PaginatedPaymentsDto {
        PaginatedPaymentsDto {
            payments: self.payments.into_iter().map(Payment::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
