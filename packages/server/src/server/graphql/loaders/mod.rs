use dataloader::non_cached::Loader;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domains::member::loader::MemberLoader;
use crate::domains::member::models::member::Member;

/// Per-request dataloaders. List resolvers load counterpart profiles
/// through these so a page issues one member query instead of one per row.
#[derive(Clone)]
pub struct DataLoaders {
    pub member: Loader<Uuid, Option<Member>, MemberLoader>,
}

impl DataLoaders {
    pub fn new(db: Arc<PgPool>) -> Self {
        Self {
            member: Loader::new(MemberLoader::new(db)),
        }
    }
}
