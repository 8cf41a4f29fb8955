//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when fdb is run for the first time.

use super::{DEFAULT_SERVER_URL, FdbConfig};
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};

/// Interactive first-time setup - prompts for the server and account
///
/// 1. Prompts for the server URL (default: `http://localhost:5555`)
/// 2. Prompts for the account cookie, which may be left empty
/// 3. Creates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<FdbConfig, ConfigError> {
    println!("Welcome to fdb! Let's connect to your FileDb server.\n");

    let server_url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Server URL")
        .default(DEFAULT_SERVER_URL.to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let cookie: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Account cookie (leave empty if the server has no login)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let mut config = FdbConfig::default();
    config.set_value("server_url", server_url.trim())?;
    config.set_value("account_cookie", cookie.trim())?;

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_signature() {
        let _: fn() -> Result<FdbConfig, ConfigError> = first_time_setup;
    }
}
