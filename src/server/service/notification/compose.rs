//! Plain-text bodies for the outbox.

use crate::server::model::{
    car::Car,
    notification::{NewNotification, NotificationKind},
    reservation::Reservation,
};

/// Name and address a notification is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

const SIGNATURE: &str = "Best regards,\nThe CarRentalConnect team";

fn format_amount(cents: i64) -> String {
    format!("{}.{:02} MAD", cents / 100, cents % 100)
}

fn period(reservation: &Reservation) -> String {
    format!(
        "{} to {} ({} days)",
        reservation.range.start().format("%d/%m/%Y"),
        reservation.range.end().format("%d/%m/%Y"),
        reservation.range.days()
    )
}

/// Sent when a reservation is created, before payment.
pub fn reservation_confirmation(
    recipient: &Recipient,
    reservation: &Reservation,
    car: &Car,
) -> NewNotification {
    let body = format!(
        "Hello {},\n\n\
         Your reservation #{} has been received.\n\n\
         Car: {} ({})\n\
         Agency: {}\n\
         Period: {}\n\
         Total: {}\n\n\
         The reservation is held until payment is received.\n\n{}",
        recipient.name,
        reservation.id,
        car.display_name(),
        car.registration_number,
        car.agency,
        period(reservation),
        format_amount(reservation.total_price_cents),
        SIGNATURE
    );

    NewNotification {
        kind: NotificationKind::ReservationConfirmation,
        recipient: recipient.email.clone(),
        subject: format!("Reservation #{} received - CarRentalConnect", reservation.id),
        body,
    }
}

/// Sent when a successful payment confirms a reservation.
pub fn payment_confirmation(
    recipient: &Recipient,
    reservation: &Reservation,
    car: &Car,
    amount_cents: i64,
    method: &str,
) -> NewNotification {
    let body = format!(
        "Hello {},\n\n\
         We received your payment of {} by {} for reservation #{}.\n\n\
         Car: {}\n\
         Agency: {}\n\
         Period: {}\n\n\
         Your reservation is now confirmed.\n\n{}",
        recipient.name,
        format_amount(amount_cents),
        method,
        reservation.id,
        car.display_name(),
        car.agency,
        period(reservation),
        SIGNATURE
    );

    NewNotification {
        kind: NotificationKind::PaymentConfirmation,
        recipient: recipient.email.clone(),
        subject: format!("Payment received for reservation #{} - CarRentalConnect", reservation.id),
        body,
    }
}

/// Sent when a reservation is cancelled by its owner, an admin or hold expiry.
pub fn reservation_cancellation(
    recipient: &Recipient,
    reservation: &Reservation,
    car: Option<&Car>,
    refunded: bool,
) -> NewNotification {
    let car_line = car
        .map(|car| format!("Car: {}\n", car.display_name()))
        .unwrap_or_default();
    let refund_line = if refunded {
        format!(
            "A refund of {} will be issued.\n\n",
            format_amount(reservation.total_price_cents)
        )
    } else {
        String::new()
    };

    let body = format!(
        "Hello {},\n\n\
         Your reservation #{} has been cancelled.\n\n\
         {}Period: {}\n\n\
         {}{}",
        recipient.name,
        reservation.id,
        car_line,
        period(reservation),
        refund_line,
        SIGNATURE
    );

    NewNotification {
        kind: NotificationKind::ReservationCancellation,
        recipient: recipient.email.clone(),
        subject: format!("Reservation #{} cancelled - CarRentalConnect", reservation.id),
        body,
    }
}
