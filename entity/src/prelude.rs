pub use super::auth_token::Entity as AuthToken;
pub use super::car::Entity as Car;
pub use super::notification::Entity as Notification;
pub use super::payment::Entity as Payment;
pub use super::reservation::Entity as Reservation;
pub use super::user::Entity as User;
