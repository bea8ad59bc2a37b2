//! Data access objects, one per resource
//!
//! Each DAO is built once at startup from the shared store and handed to the
//! HTTP layer through [`AppState`](crate::core::app_state::AppState).

pub mod bookmark_dao;
pub mod dislike_dao;
pub mod follow_dao;
pub mod like_dao;
pub mod message_dao;
pub mod relationship;
pub mod tuit_dao;
pub mod unlike_dao;
pub mod user_dao;

pub use bookmark_dao::BookmarkDao;
pub use dislike_dao::DislikeDao;
pub use follow_dao::FollowDao;
pub use like_dao::LikeDao;
pub use message_dao::MessageDao;
pub use relationship::RelationshipDao;
pub use tuit_dao::TuitDao;
pub use unlike_dao::UnlikeDao;
pub use user_dao::UserDao;
