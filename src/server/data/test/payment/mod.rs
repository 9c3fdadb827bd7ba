use crate::server::{
    data::payment::PaymentRepository,
    error::AppError,
    model::{availability::PaymentOutcome, payment::CreatePaymentParams},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod latest_for_reservation;

fn params(reservation_id: i32, status: PaymentOutcome) -> CreatePaymentParams {
    CreatePaymentParams {
        reservation_id,
        amount_cents: 75_000,
        method: "CARD".to_string(),
        status,
        transaction_id: Some(format!("txn-{}", reservation_id)),
    }
}
