//! Relay-style cursor-based pagination types
//!
//! Implements the forward half of the GraphQL Cursor Connections
//! Specification: https://relay.dev/graphql/connections.htm
//!
//! # Usage
//!
//! ```rust,ignore
//! // In GraphQL query resolver
//! let args = PaginationArgs { first: Some(10), after: None };
//! let validated = args.validate()?;
//!
//! // In model
//! let items = Model::find_page(&validated, pool).await?;
//! let (items, has_more) = trim_results(items, validated.limit);
//! ```

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use juniper::GraphQLObject;
use uuid::Uuid;

// ============================================================================
// Cursor
// ============================================================================

/// Opaque cursor for pagination (base64-encoded UUID).
///
/// V7 UUIDs are time-ordered, so using just the ID provides stable ordering.
#[derive(Debug, Clone)]
pub struct Cursor(Uuid);

impl Cursor {
    /// Create a cursor from a UUID.
    pub fn new(id: Uuid) -> Self {
        Cursor(id)
    }

    /// Encode the cursor as a base64 string.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    /// Encode a UUID directly to a cursor string.
    pub fn encode_uuid(id: Uuid) -> String {
        Cursor::new(id).encode()
    }

    /// Decode a cursor string back to a Cursor.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .context("Invalid cursor: not valid base64")?;
        let uuid = Uuid::from_slice(&bytes).context("Invalid cursor: not a valid UUID")?;
        Ok(Cursor(uuid))
    }

    /// Get the underlying UUID.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

// ============================================================================
// PageInfo (Relay spec)
// ============================================================================

/// Page information for cursor-based pagination.
#[derive(Debug, Clone, GraphQLObject)]
#[graphql(description = "Information about pagination in a connection")]
pub struct PageInfo {
    /// When paginating forwards, are there more items?
    pub has_next_page: bool,
    /// Cursor of the first edge in the page.
    pub start_cursor: Option<String>,
    /// Cursor of the last edge in the page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Create empty page info (no items).
    pub fn empty() -> Self {
        PageInfo {
            has_next_page: false,
            start_cursor: None,
            end_cursor: None,
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Pagination Arguments
// ============================================================================

/// Input arguments for forward cursor-based pagination (first/after).
#[derive(Debug, Clone, Default)]
pub struct PaginationArgs {
    /// Returns the first n elements from the list.
    pub first: Option<i32>,
    /// Returns elements that come after the specified cursor.
    pub after: Option<String>,
}

impl PaginationArgs {
    /// Validate pagination arguments.
    ///
    /// Returns validated args with defaults applied and cursor decoded.
    pub fn validate(&self) -> Result<ValidatedPaginationArgs, &'static str> {
        // Get limit with default (25) and bounds (1-100)
        let limit = self.first.unwrap_or(25);
        let limit = limit.clamp(1, 100);

        // Decode cursor if present
        let cursor = self
            .after
            .as_ref()
            .map(|c| Cursor::decode(c))
            .transpose()
            .map_err(|_| "Invalid cursor")?
            .map(|c| c.into_uuid());

        Ok(ValidatedPaginationArgs { limit, cursor })
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone)]
pub struct ValidatedPaginationArgs {
    /// Number of items to fetch (1-100, default 25).
    pub limit: i32,
    /// Cursor UUID (if provided).
    pub cursor: Option<Uuid>,
}

impl ValidatedPaginationArgs {
    /// Get the SQL LIMIT value (limit + 1 to detect has_more).
    pub fn fetch_limit(&self) -> i64 {
        (self.limit + 1) as i64
    }
}

// ============================================================================
// Connection Builder Helpers
// ============================================================================

/// Build PageInfo from pagination results.
pub fn build_page_info(
    has_more: bool,
    start_cursor: Option<String>,
    end_cursor: Option<String>,
) -> PageInfo {
    PageInfo {
        has_next_page: has_more,
        start_cursor,
        end_cursor,
    }
}

/// Trim results to the requested limit and determine if there are more.
///
/// Database queries should fetch `limit + 1` items. This function trims
/// to the actual limit and returns whether there were more items.
pub fn trim_results<T>(results: Vec<T>, limit: i32) -> (Vec<T>, bool) {
    let has_more = results.len() > limit as usize;
    let results = if has_more {
        results.into_iter().take(limit as usize).collect()
    } else {
        results
    };
    (results, has_more)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_encode_decode() {
        let id = Uuid::new_v4();
        let cursor = Cursor::new(id);
        let encoded = cursor.encode();
        let decoded = Cursor::decode(&encoded).unwrap();
        assert_eq!(id, decoded.into_uuid());
    }

    #[test]
    fn test_cursor_decode_rejects_garbage() {
        assert!(Cursor::decode("not base64!!").is_err());
        assert!(Cursor::decode("aGVsbG8").is_err());
    }

    #[test]
    fn test_pagination_args_validate_defaults() {
        let args = PaginationArgs::default();
        let validated = args.validate().unwrap();
        assert_eq!(validated.limit, 25);
        assert!(validated.cursor.is_none());
    }

    #[test]
    fn test_pagination_args_validate_clamps() {
        let args = PaginationArgs {
            first: Some(200),
            ..Default::default()
        };
        let validated = args.validate().unwrap();
        assert_eq!(validated.limit, 100);

        let args = PaginationArgs {
            first: Some(0),
            ..Default::default()
        };
        let validated = args.validate().unwrap();
        assert_eq!(validated.limit, 1);
    }

    #[test]
    fn test_pagination_args_with_cursor() {
        let id = Uuid::new_v4();
        let cursor = Cursor::encode_uuid(id);
        let args = PaginationArgs {
            first: Some(10),
            after: Some(cursor),
        };
        let validated = args.validate().unwrap();
        assert_eq!(validated.cursor, Some(id));
    }

    #[test]
    fn test_trim_results() {
        let items: Vec<i32> = (1..=12).collect();
        let (trimmed, has_more) = trim_results(items, 10);
        assert_eq!(trimmed.len(), 10);
        assert!(has_more);

        let items: Vec<i32> = (1..=5).collect();
        let (trimmed, has_more) = trim_results(items, 10);
        assert_eq!(trimmed.len(), 5);
        assert!(!has_more);
    }
}
