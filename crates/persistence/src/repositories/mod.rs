//! Repository implementations.

pub mod chat_message;
pub mod device;
pub mod rental_request;
pub mod session;
pub mod user;

pub use chat_message::ChatMessageRepository;
pub use device::DeviceRepository;
pub use rental_request::{BookingError, RentalRequestRepository};
pub use session::SessionRepository;
pub use user::UserRepository;
