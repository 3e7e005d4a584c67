pub mod api_model;
pub mod history_model;
pub mod user_model;

#[allow(unused_imports)]
pub use api_model::*;
pub use history_model::{ChatHistoryEntry, SummarySettings};
pub use user_model::{
    CachedOfflineUser, CurrentUser, OfflineUserInfo, OfflineUserView, UserProfile,
};
