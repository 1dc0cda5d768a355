//! Entity definitions (database row mappings).

pub mod chat_message;
pub mod device;
pub mod rental_request;
pub mod session;
pub mod user;

pub use chat_message::{ChatMessageEntity, ChatParticipants};
pub use device::DeviceEntity;
pub use rental_request::{
    ManagedRequestEntity, RentalRequestEntity, RentalWithDeviceEntity, RequestStatusDb,
};
pub use session::SessionEntity;
pub use user::UserEntity;
