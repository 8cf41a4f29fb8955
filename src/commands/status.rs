//! Status command - server and database versions

use crate::FdbError;
use crate::api::{FileDbApi, VersionCompat};
use crate::output::{self, OutputWriter};
use crate::session::StatusReport;

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the status command
///
/// # Errors
/// Returns an error if the status request fails
pub async fn execute<A>(api: &A, out: &dyn OutputWriter, quiet: bool) -> Result<()>
where
    A: FileDbApi + ?Sized,
{
    let report = StatusReport::load(api).await?;
    let compat = report.compatibility();

    if quiet {
        out.write(&report.server().string);
        out.write(&report.database().string);
    } else {
        out.write(&format!("Server:   {}", output::version(report.server())));
        out.write(&format!(
            "Database: {}{}",
            output::version(report.database()),
            output::compat_label(compat)
        ));
    }

    if compat == VersionCompat::Unsupported {
        out.warning("The database version is not supported by this server");
    }
    if report.in_safe_mode() {
        out.warning("Server is running in safe mode");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{StatusInfo, Version, VersionInfo};
    use crate::output::{BufferWriter, MessageLevel};
    use crate::testing::MockApi;

    fn version(major: i64, minor: i64) -> Version {
        Version {
            string: format!("{major}.{minor}r4"),
            code_name: "EcstacyInGrief".into(),
            major,
            minor,
            revision: 4,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_unsupported_database_warns() {
        let api = MockApi::new();
        api.state().status = Some(StatusInfo {
            version_info: VersionInfo { file_db: version(3, 0), database: version(2, 0) },
            in_safe_mode: false,
        });
        let out = BufferWriter::new();

        execute(&api, &out, false).await.unwrap();
        assert!(out.text().contains("EcstacyInGrief (3.0r4)"));
        assert!(out.text().contains("Unsupported"));
        assert_eq!(out.lines(MessageLevel::Warning).len(), 1);
    }

    #[tokio::test]
    async fn test_quiet_prints_version_strings() {
        let api = MockApi::new();
        api.state().status = Some(StatusInfo {
            version_info: VersionInfo { file_db: version(3, 1), database: version(3, 1) },
            in_safe_mode: true,
        });
        let out = BufferWriter::new();

        execute(&api, &out, true).await.unwrap();
        assert_eq!(out.lines(MessageLevel::Normal), ["3.1r4", "3.1r4"]);
        assert_eq!(out.lines(MessageLevel::Warning), ["Server is running in safe mode"]);
    }
}
