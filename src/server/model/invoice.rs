use chrono::{DateTime, Utc};

use crate::{
    model::invoice::InvoiceDto,
    server::model::{car::Car, payment::Payment, reservation::Reservation, user::User},
};

/// Everything printed on a reservation invoice.
#[derive(Debug, Clone)]
pub struct Invoice {
    pub reservation: Reservation,
    pub client: User,
    pub car: Car,
    pub last_payment: Option<Payment>,
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    /// Flattens the invoice. Guest contact details on the reservation take precedence
    /// over the linked account.
    pub fn into_dto(self) -> InvoiceDto {
        let (client_name, client_email, client_phone) = match &self.reservation.guest {
            Some(guest) => (
                format!("{} {}", guest.first_name, guest.last_name),
                guest.email.clone(),
                guest.phone.clone(),
            ),
            None => (
                self.client.full_name(),
                self.client.email.clone(),
                self.client.phone.clone(),
            ),
        };

        InvoiceDto {
            reservation_id: self.reservation.id,
            issued_at: self.issued_at,
            client_name,
            client_email,
            client_phone,
            car: self.car.display_name(),
            registration_number: self.car.registration_number,
            agency: self.car.agency,
            start_date: self.reservation.range.start(),
            end_date: self.reservation.range.end(),
            days: self.reservation.range.days(),
            price_per_day_cents: self.car.price_per_day_cents,
            total_cents: self.reservation.total_price_cents,
            reservation_status: self.reservation.status.as_str().to_string(),
            payment_status: self.reservation.payment_status.as_str().to_string(),
            payment_method: self.last_payment.map(|p| p.method),
        }
    }
}
