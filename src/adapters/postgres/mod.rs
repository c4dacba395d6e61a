pub mod booking_repository;
pub mod comment_repository;
pub mod item_repository;
pub mod item_request_repository;
mod rows;
pub mod user_repository;

// パブリックに型を再エクスポート
pub use booking_repository::BookingRepository as PostgresBookingRepository;
pub use comment_repository::CommentRepository as PostgresCommentRepository;
pub use item_repository::ItemRepository as PostgresItemRepository;
pub use item_request_repository::ItemRequestRepository as PostgresItemRequestRepository;
pub use user_repository::UserRepository as PostgresUserRepository;
