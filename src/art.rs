//! Finds the screenshot to show for a game.
//!
//! RetroArch keeps screenshots in one folder per core, but the folder names
//! ("Snes9x - Current", "mGBA") rarely match the core file names
//! ("snes9x_libretro.so"), so both sides are normalised before comparing.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::catalog::GameRecord;
use crate::utils::base_name;

/// Screenshots are only ever PNGs.
pub const ART_EXTENSION: &str = "png";

/// Resolved screenshot for one record. `path` is empty while unresolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameArtRef {
    pub active: bool,
    pub path: String,
}

/// Uppercases and drops spaces, hyphens and underscores.
pub fn normalize_folder_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_uppercase()
}

/// Like [`normalize_folder_name`], but first drops the last `_` segment
/// (`_libretro.so`, or a platform suffix) when there is more than one.
pub fn normalize_core_name(core: &str) -> String {
    let segments: Vec<&str> = core.split('_').collect();
    if segments.len() > 1 {
        normalize_folder_name(&segments[..segments.len() - 1].concat())
    } else {
        normalize_folder_name(core)
    }
}

/// Picks the folder for `normalized_core` out of `(folder, normalized name)` pairs.
///
/// An exact match wins immediately. Otherwise the *last* folder whose
/// normalised name starts with the core is used, in the order given.
fn choose_folder<I>(normalized_core: &str, folders: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = (PathBuf, String)>,
{
    let mut partial = None;
    for (path, normalized) in folders {
        if normalized == normalized_core {
            return Some(path);
        }
        if normalized.starts_with(normalized_core) {
            partial = Some(path);
        }
    }
    partial
}

fn core_folder(art_root: &Path, normalized_core: &str) -> Option<PathBuf> {
    let subdirectories = WalkDir::new(art_root)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| {
            let normalized = normalize_folder_name(&entry.file_name().to_string_lossy());
            (entry.into_path(), normalized)
        });

    choose_folder(normalized_core, subdirectories)
}

/// Screenshots in `folder`, newest first.
fn screenshots_newest_first(folder: &Path) -> Vec<(PathBuf, SystemTime)> {
    let mut shots: Vec<(PathBuf, SystemTime)> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some(ART_EXTENSION))
        .map(|entry| {
            let modified = fs::metadata(entry.path())
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (entry.into_path(), modified)
        })
        .collect();

    shots.sort_by(|a, b| b.1.cmp(&a.1));
    shots
}

/// Finds the newest screenshot of `record` under `art_root`.
///
/// Runs synchronously and touches the filesystem on every call.
pub fn resolve_art(record: &GameRecord, art_root: &Path) -> GameArtRef {
    if !record.active || record.core_name.is_empty() || record.file_name.is_empty() {
        return GameArtRef::default();
    }

    let normalized_core = normalize_core_name(&record.core);
    let Some(folder) = core_folder(art_root, &normalized_core) else {
        debug!("no screenshot folder for core {}", record.core);
        return GameArtRef::default();
    };

    let wanted = base_name(&record.file_name);
    for (path, _) in screenshots_newest_first(&folder) {
        let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if base_name(&file_name) == wanted {
            return GameArtRef {
                active: true,
                path: path.to_string_lossy().into_owned(),
            };
        }
    }

    debug!("no screenshot of {} in {}", record.file_name, folder.display());
    GameArtRef::default()
}
