//! Config command - inspect configuration.

use crate::cli::ConfigAction;
use crate::config::Settings;
use crate::error::FlatripError;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)
                .map_err(|e| FlatripError::Config(e.to_string()))?;
            print!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }
    }

    Ok(())
}
