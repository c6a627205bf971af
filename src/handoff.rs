use log::info;

use crate::catalog::{history_record_path, GameRecord};
use crate::config::Config;
use crate::error::HandoffError;
use crate::retroarch::{LaunchRequest, Launched, Launcher};
use crate::system::sync_disks;

/// Moves the picked game to the top of the history and runs it.
///
/// In dry run nothing is written or started and browsing resumes.
pub fn hand_off(record: &GameRecord, config: &Config, launcher: &dyn Launcher) -> Result<Launched, HandoffError> {
    let history_path = history_record_path(&config.history_dir, record);
    if config.dry_run {
        info!("dry run, not writing {}", history_path.display());
    } else {
        record.write(&history_path)?;
    }
    sync_disks();

    let request = LaunchRequest::for_record(record, &config.launcher);
    let launched = if config.dry_run {
        info!("dry run, would launch {request:?}");
        Launched::Returned
    } else {
        launcher.launch(&request)?
    };
    sync_disks();
    Ok(launched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaunchError;
    use std::cell::RefCell;
    use std::io;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingLauncher {
        requests: RefCell<Vec<LaunchRequest>>,
        fail: bool,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&self, request: &LaunchRequest) -> Result<Launched, LaunchError> {
            self.requests.borrow_mut().push(request.clone());
            if self.fail {
                return Err(LaunchError::Spawn {
                    program: "retroarch".to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "missing"),
                });
            }
            Ok(Launched::Queued)
        }
    }

    fn tetris() -> GameRecord {
        GameRecord {
            active: true,
            name: "Tetris.gb".to_string(),
            core: "gambatte_libretro.so".to_string(),
            core_name: "Gambatte".to_string(),
            number: "3".to_string(),
            drive: "/mnt/sdcard".to_string(),
            folder: "/ROMS/GB".to_string(),
            file_name: "Tetris.gb".to_string(),
        }
    }

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config { history_dir: dir.to_path_buf(), ..Default::default() };
        config.launcher.legacy_config = dir.join("no-legacy.cfg");
        config
    }

    #[test]
    fn writes_history_then_launches() {
        let dir = tempdir().unwrap();
        let launcher = RecordingLauncher::default();

        let launched = hand_off(&tetris(), &config_in(dir.path()), &launcher).unwrap();

        assert_eq!(launched, Launched::Queued);
        assert_eq!(GameRecord::load(&dir.path().join("Tetris.cfg")), tetris());
        let requests = launcher.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].rom_path, "/mnt/sdcard/ROMS/GB/Tetris.gb");
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let config = Config { dry_run: true, ..config_in(dir.path()) };

        let launched = hand_off(&tetris(), &config, &launcher).unwrap();

        assert_eq!(launched, Launched::Returned);
        assert!(!dir.path().join("Tetris.cfg").exists());
        assert!(launcher.requests.borrow().is_empty());
    }

    #[test]
    fn unwritable_history_stops_before_launch() {
        let dir = tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let config = config_in(&dir.path().join("missing"));

        let result = hand_off(&tetris(), &config, &launcher);

        assert!(matches!(result, Err(HandoffError::Record(_))));
        assert!(launcher.requests.borrow().is_empty());
    }

    #[test]
    fn launch_failures_are_reported() {
        let dir = tempdir().unwrap();
        let launcher = RecordingLauncher { fail: true, ..Default::default() };

        let result = hand_off(&tetris(), &config_in(dir.path()), &launcher);

        assert!(matches!(result, Err(HandoffError::Launch(_))));
    }
}
