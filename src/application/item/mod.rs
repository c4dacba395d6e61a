mod comment_service;
mod item_service;

pub use comment_service::add_comment;
pub use item_service::{
    create_item, delete_item, get_item, list_owner_items, search_items, update_item,
};
