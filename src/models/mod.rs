//! Document models
//!
//! Every model maps onto one collection. Fields that point at other records
//! are [`Reference`]s: stored as the bare id and filled in by the join step
//! when a query asks for it.

use crate::core::types::{Id, Reference};
use crate::storage::Record;

pub mod bookmark;
pub mod dislike;
pub mod follow;
pub mod like;
pub mod message;
pub mod tuit;
pub mod unlike;
pub mod user;

pub use bookmark::Bookmark;
pub use dislike::Dislike;
pub use follow::Follow;
pub use like::Like;
pub use message::Message;
pub use tuit::{NewTuit, Tuit, TuitChanges};
pub use unlike::Unlike;
pub use user::{User, UserProfile};

/// A join document linking a source record to a target record, such as a
/// user liking a tuit or a user following another user.
pub trait Relationship: Record {
    /// The acting side (the liker, the follower, the bookmarking user)
    type Source: Record;
    /// The side acted upon
    type Target: Record;

    /// Document field holding the source id
    const SOURCE_FIELD: &'static str;
    /// Document field holding the target id
    const TARGET_FIELD: &'static str;

    /// A fresh, unsaved relationship
    fn new(source: Id, target: Id) -> Self;

    /// Mutable reference to the source record
    fn source_mut(&mut self) -> &mut Reference<Self::Source>;

    /// Mutable reference to the target record
    fn target_mut(&mut self) -> &mut Reference<Self::Target>;
}
