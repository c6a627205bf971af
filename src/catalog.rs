use log::{debug, warn};
use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::CatalogError;
use crate::utils::trim_extension;

/// Extension of the per-game record files in the history and favourite folders.
pub const RECORD_EXTENSION: &str = "cfg";
/// Every usable record points at a libretro core ending with this.
pub const CORE_SUFFIX: &str = "libretro.so";

/// One recent or favourite game, exactly as the frontend stores it on disk.
///
/// The file holds one field per line in declaration order. A record is only
/// `active` when its file could be read; inactive records have every field empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub active: bool,
    pub name: String,
    pub core: String,
    pub core_name: String,
    pub number: String,
    pub drive: String,
    pub folder: String,
    pub file_name: String,
}

impl GameRecord {
    /// Reads a record, returning an inactive one if the file can't be opened.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(record) => record,
            Err(e) => {
                warn!("{e}");
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let read_err = |source| CatalogError::Read { path: path.to_path_buf(), source };

        let file = fs::File::open(path).map_err(read_err)?;
        let mut record = GameRecord { active: true, ..Default::default() };

        // Lines past the seventh are ignored, missing ones stay empty.
        for (index, line) in io::BufReader::new(file).lines().enumerate() {
            let line = line.map_err(read_err)?;
            match record.field_mut(index) {
                Some(field) => *field = line,
                None => break,
            }
        }

        Ok(record)
    }

    /// Writes all seven fields and makes sure they reached the disk before returning.
    pub fn write(&self, path: &Path) -> Result<(), CatalogError> {
        let write_err = |source| CatalogError::Write { path: path.to_path_buf(), source };

        let file = fs::File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        for field in self.fields() {
            writeln!(writer, "{field}").map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        let file = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
        file.sync_all().map_err(write_err)?;
        Ok(())
    }

    /// Path of the file on the SD card holding the game, e.g. `/mnt/sdcard/ROMS/SNES/Metroid.sfc`.
    pub fn rom_path(&self) -> String {
        format!("{}{}/{}", self.drive, self.folder, self.file_name)
    }

    fn fields(&self) -> [&str; 7] {
        [
            &self.name,
            &self.core,
            &self.core_name,
            &self.number,
            &self.drive,
            &self.folder,
            &self.file_name,
        ]
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.core),
            2 => Some(&mut self.core_name),
            3 => Some(&mut self.number),
            4 => Some(&mut self.drive),
            5 => Some(&mut self.folder),
            6 => Some(&mut self.file_name),
            _ => None,
        }
    }
}

/// Loads every record in `dir` that points at a libretro core, sorted by core.
///
/// A missing directory is a normal state and yields an empty list.
pub fn scan_directory(dir: &Path) -> Vec<GameRecord> {
    let mut games = Vec::new();
    if !dir.exists() {
        debug!("catalog folder {} does not exist", dir.display());
        return games;
    }

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).into_iter().flatten() {
        let path = entry.path();
        let is_record = path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION);
        if !is_record {
            continue;
        }

        let record = GameRecord::load(path);
        if record.active && record.core.ends_with(CORE_SUFFIX) {
            games.push(record);
        }
    }

    games.sort_by(|a, b| a.core.cmp(&b.core));
    debug!("found {} games in {}", games.len(), dir.display());
    games
}

/// Where the selected game's record is written back before the emulator starts.
pub fn history_record_path(history_dir: &Path, record: &GameRecord) -> PathBuf {
    history_dir.join(format!("{}.{}", trim_extension(&record.name), RECORD_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str, core: &str) -> GameRecord {
        GameRecord {
            active: true,
            name: name.to_string(),
            core: core.to_string(),
            core_name: "Snes9x".to_string(),
            number: "12".to_string(),
            drive: "/mnt/sdcard".to_string(),
            folder: "/ROMS/SNES".to_string(),
            file_name: format!("{name}.sfc"),
        }
    }

    #[test]
    fn write_then_load_gives_back_the_same_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Metroid.cfg");
        let original = record("Super Metroid", "snes9x_libretro.so");

        original.write(&path).unwrap();
        let loaded = GameRecord::load(&path);

        assert_eq!(loaded, original);
        assert!(loaded.active);
    }

    #[test]
    fn short_file_leaves_trailing_fields_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.cfg");
        fs::write(&path, "Tetris\ngambatte_libretro.so\nGambatte\n3\n/mnt/mmc\n").unwrap();

        let loaded = GameRecord::load(&path);

        assert!(loaded.active);
        assert_eq!(loaded.name, "Tetris");
        assert_eq!(loaded.drive, "/mnt/mmc");
        assert_eq!(loaded.folder, "");
        assert_eq!(loaded.file_name, "");
    }

    #[test]
    fn extra_lines_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long.cfg");
        fs::write(&path, "a\nb\nc\nd\ne\nf\ng\nh\ni\n").unwrap();

        let loaded = GameRecord::load(&path);
        assert_eq!(loaded.file_name, "g");
    }

    #[test]
    fn missing_file_gives_inactive_record() {
        let dir = tempdir().unwrap();
        let loaded = GameRecord::load(&dir.path().join("nope.cfg"));
        assert_eq!(loaded, GameRecord::default());
        assert!(!loaded.active);
    }

    #[test]
    fn written_file_has_one_field_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.cfg");
        record("Chrono Trigger", "snes9x_libretro.so").write(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Chrono Trigger");
        assert_eq!(lines[6], "Chrono Trigger.sfc");
    }

    #[test]
    fn scan_filters_by_core_suffix_and_sorts_by_core() {
        let dir = tempdir().unwrap();
        record("Zelda", "snes9x_libretro.so").write(&dir.path().join("zelda.cfg")).unwrap();
        record("Pong", "atari800_libretro.so").write(&dir.path().join("pong.cfg")).unwrap();
        record("Doom", "prboom_libretro.dll").write(&dir.path().join("doom.cfg")).unwrap();
        record("Mario", "mgba_libretro.so").write(&dir.path().join("mario.cfg")).unwrap();
        // Right contents, wrong extension.
        record("Kirby", "gambatte_libretro.so").write(&dir.path().join("kirby.txt")).unwrap();

        let games = scan_directory(dir.path());
        let cores: Vec<&str> = games.iter().map(|g| g.core.as_str()).collect();

        assert_eq!(cores, vec!["atari800_libretro.so", "mgba_libretro.so", "snes9x_libretro.so"]);
    }

    #[test]
    fn scan_of_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        assert!(scan_directory(&dir.path().join("favourite")).is_empty());
    }

    #[test]
    fn history_path_replaces_extension() {
        let game = record("Super Metroid.sfc", "snes9x_libretro.so");
        let path = history_record_path(Path::new("/mnt/mmc/MUOS/info/history"), &game);
        assert_eq!(path, PathBuf::from("/mnt/mmc/MUOS/info/history/Super Metroid.cfg"));

        let plain = record("Tetris", "gambatte_libretro.so");
        let path = history_record_path(Path::new("/h"), &plain);
        assert_eq!(path, PathBuf::from("/h/Tetris.cfg"));
    }

    #[test]
    fn rom_path_joins_drive_folder_and_file() {
        let game = record("Metroid", "snes9x_libretro.so");
        assert_eq!(game.rom_path(), "/mnt/sdcard/ROMS/SNES/Metroid.sfc");
    }
}
