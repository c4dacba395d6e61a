mod booking_query;
mod booking_service;
mod booking_summary;

pub use booking_query::{list_booker_bookings, list_bookings, list_owner_bookings};
pub use booking_service::{create_booking, get_booking_by_id, respond_to_booking};
pub use booking_summary::{BookingSummary, summarize_item_bookings};
