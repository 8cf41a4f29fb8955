//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs the operation against a [`FileDbApi`](crate::api::FileDbApi),
//! reporting through an [`OutputWriter`](crate::output::OutputWriter).

pub mod collection;
pub mod config;
pub mod delete;
pub mod nav;
pub mod random;
pub mod search;
pub mod show;
pub mod status;
pub mod tag;
pub mod tags;

// Re-export execute functions for convenience
pub use collection::execute as collection;
pub use config::execute as config;
pub use delete::execute as delete;
pub use nav::execute as nav;
pub use random::execute as random;
pub use search::execute as search;
pub use show::execute as show;
pub use status::execute as status;
pub use tags::execute as tags;
