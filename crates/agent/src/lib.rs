//! Query dispatcher
//!
//! Orchestrates one query end to end: classifier -> extractor ->
//! normalizer -> calculator -> formatted result. Every stage failure is
//! converted into a typed, user-facing error on the report; nothing here
//! panics or terminates the process.

pub mod dispatcher;
pub mod format;

pub use dispatcher::Dispatcher;
pub use format::format_usd;
