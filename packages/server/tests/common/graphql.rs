//! GraphQL client for integration testing.
//!
//! Executes GraphQL queries directly against the schema without HTTP overhead.

use duet_core::kernel::TestDependencies;
use duet_core::server::graphql::{create_schema, GraphQLContext, Schema};
use duet_core::server::middleware::AuthUser;
use juniper::Variables;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

impl GraphQLResult {
    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given JSON path.
    ///
    /// # Example
    /// ```ignore
    /// let name = result.get("me.displayName").as_str();
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }
}

impl GraphQLClient {
    /// Creates a new unauthenticated GraphQL client with default mocks.
    pub fn new(db_pool: PgPool) -> Self {
        Self::with_deps(db_pool, None, TestDependencies::new())
    }

    /// Creates a new GraphQL client authenticated as the given member.
    pub fn with_auth_user(db_pool: PgPool, member_id: uuid::Uuid) -> Self {
        Self::with_deps(db_pool, Some(member_id), TestDependencies::new())
    }

    /// Creates a new GraphQL client with explicit mock dependencies.
    ///
    /// Pass the same `TestDependencies` to several clients to share the
    /// session hub and recorded pushes across members in one test.
    pub fn with_deps(
        db_pool: PgPool,
        member_id: Option<uuid::Uuid>,
        deps: TestDependencies,
    ) -> Self {
        let auth_user = member_id.map(|id| AuthUser {
            member_id: duet_core::common::MemberId::from_uuid(id),
        });

        let server_deps = Arc::new(deps.into_deps(db_pool.clone()));
        let context = GraphQLContext::new(db_pool, server_deps, auth_user);

        Self {
            schema: create_schema(),
            context,
        }
    }

    /// Execute a GraphQL query/mutation.
    pub async fn execute(&self, query: &str) -> GraphQLResult {
        self.execute_with_vars(query, Variables::new()).await
    }

    /// Execute a GraphQL query/mutation with variables.
    pub async fn execute_with_vars(&self, query: &str, variables: Variables) -> GraphQLResult {
        let (result, errors) =
            juniper::execute(query, None, &self.schema, &variables, &self.context)
                .await
                .expect("GraphQL execution failed");

        // Convert juniper::Value to serde_json::Value
        let data = Some(serde_json::to_value(&result).expect("Failed to serialize GraphQL result"));

        let error_messages: Vec<String> = errors
            .iter()
            .map(|e| e.error().message().to_string())
            .collect();

        GraphQLResult {
            data,
            errors: error_messages,
        }
    }

    /// Execute a query and expect success, returning the data.
    pub async fn query(&self, query: &str) -> Value {
        self.execute(query).await.unwrap()
    }

    /// Execute a query with variables and expect success.
    pub async fn query_with_vars(&self, query: &str, variables: Variables) -> Value {
        self.execute_with_vars(query, variables).await.unwrap()
    }
}
