//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod session_hub;
pub mod test_dependencies;
pub mod traits;

pub use deps::{CatalogAdapter, ExpoAdapter, ServerDeps};
pub use session_hub::SessionHub;
pub use test_dependencies::{MockCatalogService, MockPushNotificationService, TestDependencies};
pub use traits::*;
