use dataloader::BatchFn;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::common::MemberId;
use crate::domains::member::models::member::Member;

/// Batches Member lookups by ID.
#[derive(Clone)]
pub struct MemberLoader {
    pub db: Arc<PgPool>,
}

impl MemberLoader {
    pub fn new(db: Arc<PgPool>) -> Self {
        Self { db }
    }
}

impl BatchFn<Uuid, Option<Member>> for MemberLoader {
    fn load(
        &mut self,
        keys: &[Uuid],
    ) -> impl std::future::Future<Output = HashMap<Uuid, Option<Member>>> {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let ids: Vec<MemberId> = keys.iter().map(|id| MemberId::from_uuid(*id)).collect();
            let members = Member::find_many(&ids, db.as_ref())
                .await
                .unwrap_or_default();
            let mut map: HashMap<Uuid, Option<Member>> = members
                .into_iter()
                .map(|m| (m.id.into_uuid(), Some(m)))
                .collect();
            for id in &keys {
                map.entry(*id).or_insert(None);
            }
            map
        }
    }
}
