//! Everything that talks to RetroArch: reading its config and starting it.

use log::{debug, info, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::catalog::GameRecord;
use crate::config::{Config, HandoffMode, LauncherConfig};
use crate::error::LaunchError;

/// Save directories from retroarch.cfg. Empty when the key is missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveDirs {
    pub savefile_dir: String,
    /// RetroArch also writes its screenshots here, one folder per core.
    pub savestate_dir: String,
}

/// Text between the first and last double quote, or `None` without two quotes.
fn quoted_value(line: &str) -> Option<&str> {
    let start = line.find('"')?;
    let end = line.rfind('"')?;
    (end > start).then(|| &line[start + 1..end])
}

/// Reads the save directories from a RetroArch config file.
pub fn read_save_dirs(path: &Path) -> SaveDirs {
    let mut dirs = SaveDirs::default();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            return dirs;
        }
    };

    for line in content.lines() {
        let target = if line.starts_with("savefile_directory") {
            &mut dirs.savefile_dir
        } else if line.starts_with("savestate_directory") {
            &mut dirs.savestate_dir
        } else {
            continue;
        };
        if let Some(value) = quoted_value(line) {
            *target = value.to_string();
        }
    }

    debug!("saves in '{}', states in '{}'", dirs.savefile_dir, dirs.savestate_dir);
    if dirs.savestate_dir.is_empty() {
        warn!("no savestate_directory in {}, screenshots disabled", path.display());
    }
    dirs
}

/// Screenshot root: the configured override, else RetroArch's savestate directory.
pub fn resolve_art_root(config: &Config) -> Option<PathBuf> {
    if let Some(root) = &config.art_root {
        return Some(root.clone());
    }
    let dirs = read_save_dirs(&config.emulator_config);
    (!dirs.savestate_dir.is_empty()).then(|| PathBuf::from(dirs.savestate_dir))
}

/// What the emulator needs to start one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchRequest {
    pub core_path: PathBuf,
    pub rom_path: String,
    pub config_path: PathBuf,
}

impl LaunchRequest {
    pub fn for_record(record: &GameRecord, launcher: &LauncherConfig) -> Self {
        let (_, config_path) = installation(launcher);
        LaunchRequest {
            core_path: launcher.core_dir.join(&record.core),
            rom_path: record.rom_path(),
            config_path,
        }
    }
}

/// What became of a launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launched {
    /// The emulator ran and has exited. Browsing can resume.
    Returned,
    /// The command was left for the wrapper script. The switcher must exit.
    Queued,
}

/// Starts the emulator for one game.
pub trait Launcher {
    fn launch(&self, request: &LaunchRequest) -> Result<Launched, LaunchError>;
}

/// Picks the legacy build when its config is present, the system one otherwise.
fn installation(launcher: &LauncherConfig) -> (String, PathBuf) {
    if launcher.legacy_config.exists() {
        (launcher.legacy_binary.clone(), launcher.legacy_config.clone())
    } else {
        (launcher.binary.clone(), launcher.default_config.clone())
    }
}

/// Arguments after the program name, rom last.
fn arguments(request: &LaunchRequest) -> [&OsStr; 5] {
    [
        OsStr::new("-c"),
        request.config_path.as_os_str(),
        OsStr::new("-L"),
        request.core_path.as_os_str(),
        OsStr::new(&request.rom_path),
    ]
}

/// Single-quotes `word` for `sh`.
fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// The launcher for the configured hand-off mode.
pub fn launcher_for(config: &LauncherConfig) -> Box<dyn Launcher> {
    let (program, _) = installation(config);
    match config.mode {
        HandoffMode::Direct => Box::new(RetroArchLauncher::new(program)),
        HandoffMode::Queue => Box::new(QueuedLauncher::new(program, &config.queue_file)),
    }
}

/// Runs RetroArch as a child process and waits for it.
pub struct RetroArchLauncher {
    program: String,
}

impl RetroArchLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        RetroArchLauncher { program: program.into() }
    }

    fn command(&self, request: &LaunchRequest) -> Command {
        let mut command = Command::new(&self.program);
        command.args(arguments(request));
        command
    }
}

impl Launcher for RetroArchLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<Launched, LaunchError> {
        info!(
            "starting {} with {} for {}",
            self.program,
            request.core_path.display(),
            request.rom_path
        );
        let status = self
            .command(request)
            .status()
            .map_err(|source| LaunchError::Spawn { program: self.program.clone(), source })?;

        // RetroArch exits non-zero for things like a core that fails to load.
        // The switcher keeps running either way.
        if status.success() {
            info!("{} returned", self.program);
        } else {
            warn!("{} exited with {status}", self.program);
        }
        Ok(Launched::Returned)
    }
}

/// Leaves the command line in a file for the wrapper script to run after the
/// switcher has exited and released the display.
pub struct QueuedLauncher {
    program: String,
    queue_file: PathBuf,
}

impl QueuedLauncher {
    pub fn new(program: impl Into<String>, queue_file: &Path) -> Self {
        QueuedLauncher { program: program.into(), queue_file: queue_file.to_path_buf() }
    }

    fn command_line(&self, request: &LaunchRequest) -> String {
        let mut line = shell_quote(&self.program);
        for arg in arguments(request) {
            line.push(' ');
            line.push_str(&shell_quote(&arg.to_string_lossy()));
        }
        line.push('\n');
        line
    }
}

impl Launcher for QueuedLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<Launched, LaunchError> {
        fs::write(&self.queue_file, self.command_line(request))
            .map_err(|source| LaunchError::Queue { path: self.queue_file.clone(), source })?;
        info!("queued {} in {}", request.rom_path, self.queue_file.display());
        Ok(Launched::Queued)
    }
}
