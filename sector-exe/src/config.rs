//! User configuration options.

use crate::{CLIOptions, BASE_DIR};
use dirs::config_dir;
use gameplay::{
    log::{error, info, warn},
    LevelOptions,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::{create_dir_all, File, OpenOptions},
    io::{self, Read, Write},
    path::PathBuf,
};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> io::Result<PathBuf> {
    let mut dir = config_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Couldn't find user config dir")
    })?;
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir_all(&dir)?;
    }
    dir.push("user.toml");
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Tics to run when neither the CLI nor the scenario says
    pub tics: u32,
    pub sfx_vol: i32,
    pub level: LevelOptions,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            tics: 35 * 10,
            sfx_vol: 80,
            level: LevelOptions::default(),
        }
    }
}

impl UserConfig {
    /// `load` will attempt to read the config, falling back to the defaults
    /// if it can't be read or parsed
    pub fn load() -> Self {
        let path = match get_cfg_file() {
            Ok(path) => path,
            Err(e) => {
                warn!(target: LOG_TAG, "{e}, using default config");
                return UserConfig::default();
            }
        };

        let mut file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) => {
                warn!(target: LOG_TAG, "Couldn't open {path:?}, {e}");
                return UserConfig::default();
            }
        };

        let mut buf = String::new();
        if let Ok(read_len) = file.read_to_string(&mut buf) {
            if read_len == 0 {
                return UserConfig::create_default(&mut file);
            } else {
                if let Ok(data) = toml::from_str(&buf) {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                warn!(target: LOG_TAG, "Could not deserialise {path:?} recreating config");
            }
        }
        UserConfig::create_default(&mut file)
    }

    fn create_default(file: &mut File) -> Self {
        let config = UserConfig::default();
        info!(target: LOG_TAG, "Created default user config file");
        match toml::to_string(&config) {
            Ok(data) => {
                if let Err(e) = file.write_all(data.as_bytes()) {
                    error!(target: LOG_TAG, "Could not write config: {e}");
                }
            }
            Err(e) => error!(target: LOG_TAG, "Could not serialise config: {e}"),
        }
        config
    }

    pub fn write(&self) {
        let data = match toml::to_string_pretty(self) {
            Ok(data) => data,
            Err(e) => {
                error!(target: LOG_TAG, "Could not serialise config: {e}");
                return;
            }
        };
        match get_cfg_file().and_then(File::create) {
            Ok(mut file) => file
                .write_all(data.as_bytes())
                .unwrap_or_else(|err| error!(target: LOG_TAG, "Could not write config: {err}")),
            Err(e) => error!(target: LOG_TAG, "Couldn't overwrite config: {e}"),
        }
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!(target: LOG_TAG, "Checking CLI options");

        if let Some(b) = cli.liquid_bob {
            if b != self.level.liquid_bob {
                self.level.liquid_bob = b;
                info!(target: LOG_TAG, "Liquid bob changed to: {b}");
            }
        } else {
            cli.liquid_bob = Some(self.level.liquid_bob);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UserConfig;
    use crate::CLIOptions;

    fn cli() -> CLIOptions {
        CLIOptions {
            verbose: None,
            scenario: None,
            tics: None,
            liquid_bob: None,
            profile: false,
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: UserConfig = toml::from_str("tics = 70").unwrap();
        assert_eq!(config.tics, 70);
        assert_eq!(config.sfx_vol, 80);
        assert!(config.level.liquid_bob);

        let config: UserConfig = toml::from_str("[level]\nliquid_bob = false").unwrap();
        assert!(!config.level.liquid_bob);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = UserConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<UserConfig>(&text).unwrap(), config);
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = UserConfig::default();
        let mut options = cli();
        options.liquid_bob = Some(false);
        config.sync_cli(&mut options);
        assert!(!config.level.liquid_bob);

        let mut options = cli();
        config.sync_cli(&mut options);
        assert_eq!(options.liquid_bob, Some(false));
    }
}
