//! Page sessions
//!
//! Each session owns the state of one view of the catalog: the search
//! listing ([`BrowseSession`]), a single file ([`FileSession`]), the list of
//! collections ([`CollectionIndex`]) and the server status
//! ([`StatusReport`]). Sessions talk to the server through
//! [`FileDbApi`](crate::api::FileDbApi) and persist through
//! [`StateStore`](crate::store::StateStore), so both can be replaced in tests.

pub mod browse;
pub mod collections;
pub mod error;
pub mod file;
pub mod status;

pub use browse::BrowseSession;
pub use collections::{CollectionEntry, CollectionIndex};
pub use error::SessionError;
pub use file::{Direction, FileSession, PendingChange, TagState};
pub use status::StatusReport;

/// Session result type
pub type Result<T> = std::result::Result<T, SessionError>;
