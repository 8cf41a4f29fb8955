//! Server status page

use super::Result;
use crate::api::{FileDbApi, StatusInfo, Version, VersionCompat};

/// Server and database versions with their compatibility
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    info: StatusInfo,
}

impl StatusReport {
    /// # Errors
    ///
    /// Returns an error if the status request fails.
    pub async fn load<A>(api: &A) -> Result<Self>
    where
        A: FileDbApi + ?Sized,
    {
        Ok(Self {
            info: api.status().await?,
        })
    }

    #[must_use]
    pub const fn server(&self) -> &Version {
        &self.info.version_info.file_db
    }

    #[must_use]
    pub const fn database(&self) -> &Version {
        &self.info.version_info.database
    }

    #[must_use]
    pub const fn compatibility(&self) -> VersionCompat {
        self.info.version_info.compatibility()
    }

    #[must_use]
    pub const fn in_safe_mode(&self) -> bool {
        self.info.in_safe_mode
    }
}
