use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{error::Error, fs, path::PathBuf};

/// Returns the path to the user's data directory for the switcher.
pub fn get_user_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|path| path.join(".local/share/game-switcher"))
}

/// Gets the full path to the config.toml file.
fn get_config_path() -> Result<PathBuf, Box<dyn Error>> {
    let mut config_path = get_user_data_dir().ok_or("Could not find user's data directory.")?;
    fs::create_dir_all(&config_path)?; // Create the directory if it doesn't exist
    config_path.push("config.toml");
    Ok(config_path)
}

/// How the emulator is started once a game is picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandoffMode {
    /// Write the command line to `queue_file` and exit. The wrapper script
    /// runs it with the display free, then starts the switcher again.
    Queue,
    /// Run the emulator as a child process with the window still open.
    Direct,
}

/// Where the emulator and its cores live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub binary: String,
    pub core_dir: PathBuf,
    /// Used when `legacy_config` does not exist.
    pub default_config: PathBuf,
    /// Older firmware keeps its own RetroArch build next to this config.
    pub legacy_binary: String,
    pub legacy_config: PathBuf,
    pub mode: HandoffMode,
    pub queue_file: PathBuf,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            binary: "retroarch".to_string(),
            core_dir: PathBuf::from("/mnt/mmc/MUOS/core"),
            default_config: PathBuf::from("/mnt/mmc/MUOS/retroarch/retroarch.cfg"),
            legacy_binary: "/mnt/mmc/MUOS/retroarch".to_string(),
            legacy_config: PathBuf::from("/mnt/mmc/MUOS/.retroarch/retroarch.cfg"),
            mode: HandoffMode::Queue,
            queue_file: PathBuf::from("/tmp/rom_go"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history_dir: PathBuf,
    pub favorite_dir: PathBuf,
    /// RetroArch config the save and screenshot directories are read from.
    pub emulator_config: PathBuf,
    /// Overrides the screenshot root taken from `emulator_config`.
    pub art_root: Option<PathBuf>,
    pub assets_dir: PathBuf,
    /// Browse only: nothing is written, launched or powered off.
    pub dry_run: bool,
    pub launcher: LauncherConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_dir: PathBuf::from("/mnt/mmc/MUOS/info/history"),
            favorite_dir: PathBuf::from("/mnt/mmc/MUOS/info/favourite"),
            emulator_config: PathBuf::from("/mnt/mmc/MUOS/retroarch/retroarch.cfg"),
            art_root: None,
            assets_dir: PathBuf::from("assets"),
            dry_run: false,
            launcher: LauncherConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from config.toml, or returns a default if it fails.
    pub fn load() -> Self {
        let config_path = match get_config_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("using default config: {e}");
                return Self::default();
            }
        };

        let mut config = match fs::read_to_string(&config_path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                warn!("ignoring {}: {e}", config_path.display());
                Self::default()
            }),
            Err(_) => {
                info!("no config at {}, writing defaults", config_path.display());
                let config = Self::default();
                config.save();
                config
            }
        };

        if cfg!(feature = "dev") {
            config.dry_run = true;
        }
        config
    }

    /// Parses a config file. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Saves the current configuration to config.toml.
    pub fn save(&self) {
        if let Ok(config_path) = get_config_path() {
            if let Ok(toml_string) = toml::to_string_pretty(self) {
                if let Err(e) = fs::write(&config_path, toml_string) {
                    warn!("could not write {}: {e}", config_path.display());
                }
            }
        }
    }
}
