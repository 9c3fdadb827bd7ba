mod auth_token;
mod car;
mod payment;
mod reservation;
