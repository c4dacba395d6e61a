pub mod access;
pub mod booking;
pub mod booking_state;
pub mod commands;
pub mod errors;
pub mod item;
pub mod item_request;
pub mod user;
pub mod value_objects;

pub use booking::*;
pub use booking_state::*;
pub use errors::*;
pub use item::*;
pub use item_request::*;
pub use user::*;
pub use value_objects::*;
