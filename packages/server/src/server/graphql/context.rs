use sqlx::PgPool;
use std::sync::Arc;

use crate::kernel::ServerDeps;
use crate::server::graphql::loaders::DataLoaders;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Contains shared resources available to all resolvers. Built once per
/// request by the context middleware; `auth_user` is `None` for
/// unauthenticated requests and resolvers reject as needed.
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub auth_user: Option<AuthUser>,
    pub loaders: DataLoaders,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(db_pool: PgPool, deps: Arc<ServerDeps>, auth_user: Option<AuthUser>) -> Self {
        let loaders = DataLoaders::new(Arc::new(db_pool.clone()));
        Self {
            db_pool,
            deps,
            auth_user,
            loaders,
        }
    }
}
