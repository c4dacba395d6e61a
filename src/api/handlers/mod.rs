pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use crate::application::ServiceDependencies;

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}
