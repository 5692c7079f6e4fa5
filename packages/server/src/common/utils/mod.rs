pub mod expo;
pub mod l10n;

pub use expo::*;
pub use l10n::*;
