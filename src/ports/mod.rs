pub mod booking_repository;
pub mod comment_repository;
pub mod item_repository;
pub mod item_request_repository;
pub mod user_repository;

pub use booking_repository::*;
pub use comment_repository::*;
pub use item_repository::*;
pub use item_request_repository::*;
pub use user_repository::*;

/// ポート共通の Result型
///
/// アダプターの失敗はボックス化して返し、アプリケーション層で分類する。
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
