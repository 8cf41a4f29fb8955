//! Config command - read and write settings

use crate::FdbError;
use crate::cli::ConfigCommands;
use crate::config::FdbConfig;
use crate::output::OutputWriter;
use std::path::Path;

type Result<T> = std::result::Result<T, FdbError>;

/// Execute the config command
///
/// `set` writes the updated configuration to `path`.
///
/// # Errors
/// Returns an error if the key is unknown, the value doesn't parse, or the
/// configuration cannot be saved
pub fn execute(
    config: &mut FdbConfig,
    path: &Path,
    command: &ConfigCommands,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                FdbError::InvalidInput("Invalid format. Use: fdb config set key=value".into())
            })?;
            let (key, value) = (key.trim(), value.trim());

            config.set_value(key, value)?;
            config.save_to(path)?;
            if !quiet {
                out.success(&format!("Set {key} = {}", config.get_value(key)?));
            }
        }
        ConfigCommands::Get { key } => {
            out.write(&config.get_value(key)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{BufferWriter, MessageLevel};
    use tempfile::TempDir;

    #[test]
    fn test_set_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = FdbConfig::default();
        let out = BufferWriter::new();

        let set = ConfigCommands::Set { setting: "page_size = 120".into() };
        execute(&mut config, &path, &set, &out, false).unwrap();
        assert_eq!(out.lines(MessageLevel::Success), ["Set page_size = 120"]);
        assert_eq!(FdbConfig::load_from(&path).unwrap().page_size, 120);
    }

    #[test]
    fn test_get() {
        let dir = TempDir::new().unwrap();
        let mut config = FdbConfig::default();
        let out = BufferWriter::new();
        let get = ConfigCommands::Get { key: "server_url".into() };

        execute(&mut config, &dir.path().join("c.toml"), &get, &out, false).unwrap();
        assert_eq!(out.lines(MessageLevel::Normal), ["http://localhost:5555"]);
    }

    #[test]
    fn test_set_requires_equals() {
        let dir = TempDir::new().unwrap();
        let mut config = FdbConfig::default();
        let out = BufferWriter::new();
        let set = ConfigCommands::Set { setting: "quiet".into() };

        let err = execute(&mut config, &dir.path().join("c.toml"), &set, &out, false).unwrap_err();
        assert!(matches!(err, FdbError::InvalidInput(_)));
    }
}
