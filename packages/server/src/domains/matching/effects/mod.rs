pub mod notifications;

pub use notifications::dispatch;
