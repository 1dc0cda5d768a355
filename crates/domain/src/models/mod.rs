//! Domain models.

pub mod chat_message;
pub mod device;
pub mod rental_request;
pub mod user;

pub use chat_message::ChatMessage;
pub use device::Device;
pub use rental_request::{DecideAction, RentalRequest, RequestStatus};
pub use user::User;
