//! Application State Management
//!
//! This module defines the central AppState that holds the store, the
//! configuration and exactly one instance of every DAO. It is built once by
//! the factory and shared with every request handler.

use crate::core::config::Config;
use crate::daos::{
    BookmarkDao, DislikeDao, FollowDao, LikeDao, MessageDao, TuitDao, UnlikeDao, UserDao,
};
use crate::storage::SharedStore;

/// Central application state holding all services and components
pub struct AppState {
    /// Application configuration
    pub config: Config,

    /// Document store shared by every DAO
    pub store: SharedStore,

    pub users: UserDao,
    pub tuits: TuitDao,
    pub likes: LikeDao,
    pub dislikes: DislikeDao,
    pub unlikes: UnlikeDao,
    pub bookmarks: BookmarkDao,
    pub follows: FollowDao,
    pub messages: MessageDao,
}

impl AppState {
    /// Wire every DAO to the given store
    pub fn new(store: SharedStore, config: Config) -> Self {
        let tuits = TuitDao::new(store.clone());

        Self {
            config,
            users: UserDao::new(store.clone()),
            likes: LikeDao::new(store.clone(), tuits.clone()),
            dislikes: DislikeDao::new(store.clone(), tuits.clone()),
            unlikes: UnlikeDao::new(store.clone(), tuits.clone()),
            bookmarks: BookmarkDao::new(store.clone()),
            follows: FollowDao::new(store.clone()),
            messages: MessageDao::new(store.clone()),
            tuits,
            store,
        }
    }
}
