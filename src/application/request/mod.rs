mod request_service;

pub use request_service::{create_request, get_request, list_all_requests, list_own_requests};
