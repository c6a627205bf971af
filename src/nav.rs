use std::path::PathBuf;

use crate::art::{resolve_art, GameArtRef};
use crate::camera::{Camera, CameraAxis};
use crate::catalog::GameRecord;

/// Pixels the picture view slides sideways when the selection moves.
pub const PICTURE_SLIDE: f32 = 32.0;
/// List rows skipped by a left/right press.
pub const LIST_JUMP: i32 = 4;

// List view layout, also used to follow the selection with the camera.
pub const LIST_LEFT_MARGIN: f32 = 32.0;
pub const LIST_TOP_MARGIN: f32 = 24.0;
pub const LIST_TITLE_MARGIN: f32 = 60.0;
pub const LIST_LINE_HEIGHT: f32 = 42.0;
const LIST_FOLLOW_OFFSET: f32 = 150.0;

/// Top of list row `index`, before the camera is applied.
pub fn list_row_y(index: i32) -> f32 {
    LIST_TITLE_MARGIN + LIST_TOP_MARGIN + index as f32 * LIST_LINE_HEIGHT
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    PictureRecent,
    ListRecent,
    ListFavorite,
}

impl View {
    const ALL: [View; 3] = [View::PictureRecent, View::ListRecent, View::ListFavorite];

    pub fn index(self) -> i32 {
        match self {
            View::PictureRecent => 0,
            View::ListRecent => 1,
            View::ListFavorite => 2,
        }
    }

    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(Self::ALL.len() as i32) as usize]
    }

    pub fn is_picture(self) -> bool {
        self == View::PictureRecent
    }

    pub fn title(self) -> &'static str {
        match self {
            View::PictureRecent => "",
            View::ListRecent => "Recent Games",
            View::ListFavorite => "Favorites",
        }
    }
}

/// The browsing state: which view is up, which list it shows and what is selected.
pub struct Navigator {
    recent: Vec<GameRecord>,
    favorite: Vec<GameRecord>,
    art_root: Option<PathBuf>,
    view: View,
    active_list: Vec<GameRecord>,
    selected_index: i32,
    selected: GameRecord,
    art: GameArtRef,
    art_for: Option<usize>,
    pub camera: Camera,
}

impl Navigator {
    /// `recent` and `favorite` come straight from the catalog scan. Without an
    /// art root the picture view never shows screenshots.
    pub fn new(recent: Vec<GameRecord>, favorite: Vec<GameRecord>, art_root: Option<PathBuf>) -> Self {
        let mut nav = Navigator {
            recent,
            favorite,
            art_root,
            view: View::PictureRecent,
            active_list: Vec::new(),
            selected_index: 0,
            selected: GameRecord::default(),
            art: GameArtRef::default(),
            art_for: None,
            camera: Camera::default(),
        };
        nav.set_view(View::PictureRecent);
        nav
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn active_list(&self) -> &[GameRecord] {
        &self.active_list
    }

    pub fn selected_index(&self) -> i32 {
        self.selected_index
    }

    pub fn selected(&self) -> &GameRecord {
        &self.selected
    }

    pub fn art(&self) -> &GameArtRef {
        &self.art
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.camera = Camera {
            x: CameraAxis::new(0.0, 0.0),
            y: CameraAxis::new(-25.0, 0.0),
        };
        self.selected_index = 0;
        self.selected = GameRecord::default();
        self.art = GameArtRef::default();
        self.art_for = None;

        self.active_list = match view {
            View::PictureRecent => self.recent.clone(),
            View::ListRecent => self.recent.clone(),
            View::ListFavorite => self.favorite.clone(),
        };
        if !view.is_picture() {
            self.active_list.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    pub fn advance_view(&mut self, step: i32) {
        self.set_view(View::from_index(self.view.index() + step));
    }

    /// Index into the active list after wrapping, `None` when the list is empty.
    pub fn effective_index(&self) -> Option<usize> {
        let len = self.active_list.len() as i32;
        if len == 0 {
            return None;
        }
        if self.view.is_picture() {
            Some(self.selected_index.rem_euclid(len) as usize)
        } else {
            Some(self.selected_index.clamp(0, len - 1) as usize)
        }
    }

    /// Applies one frame of moves and refreshes the selected record and art.
    pub fn update(&mut self, dx: i32, dy: i32) {
        let len = self.active_list.len() as i32;
        if self.view.is_picture() {
            self.selected_index += dx;
            self.camera.x.current -= dx as f32 * PICTURE_SLIDE;
        } else {
            self.selected_index -= dy;
            self.selected_index += dx * LIST_JUMP;
            self.selected_index = if len == 0 {
                0
            } else {
                self.selected_index.clamp(0, len - 1)
            };
        }

        let index = self.effective_index();
        self.selected = index
            .map(|i| self.active_list[i].clone())
            .unwrap_or_default();

        if !(self.view.is_picture() && self.selected.active) {
            self.art = GameArtRef::default();
            self.art_for = None;
        } else if self.art_for != index {
            self.art = match &self.art_root {
                Some(root) => resolve_art(&self.selected, root),
                None => GameArtRef::default(),
            };
            self.art_for = index;
        }
    }

    /// Points the camera at the selection for the current view.
    pub fn retarget_camera(&mut self) {
        if self.view.is_picture() {
            self.camera.set_target(0.0, 0.0);
        } else {
            let selected_y = list_row_y(self.selected_index);
            let follow = if selected_y > LIST_FOLLOW_OFFSET {
                selected_y - LIST_FOLLOW_OFFSET
            } else {
                0.0
            };
            self.camera.set_target(0.0, follow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn game(name: &str, core: &str) -> GameRecord {
        GameRecord {
            active: true,
            name: name.to_string(),
            core: core.to_string(),
            core_name: "Core".to_string(),
            file_name: format!("{name}.rom"),
            ..Default::default()
        }
    }

    fn recent() -> Vec<GameRecord> {
        vec![
            game("Zelda", "a_libretro.so"),
            game("Metroid", "b_libretro.so"),
            game("Castlevania", "c_libretro.so"),
        ]
    }

    fn names(list: &[GameRecord]) -> Vec<&str> {
        list.iter().map(|g| g.name.as_str()).collect()
    }

    fn list_nav(count: usize) -> Navigator {
        let games = (0..count).map(|i| game(&format!("Game {i}"), "x_libretro.so")).collect();
        let mut nav = Navigator::new(games, Vec::new(), None);
        nav.set_view(View::ListRecent);
        nav
    }

    #[test]
    fn starts_in_picture_view_with_catalog_order() {
        let nav = Navigator::new(recent(), Vec::new(), None);
        assert_eq!(nav.view(), View::PictureRecent);
        assert_eq!(names(nav.active_list()), vec!["Zelda", "Metroid", "Castlevania"]);
    }

    #[test]
    fn list_views_sort_by_name() {
        let favorites = vec![game("Tetris", "a_libretro.so"), game("Doom", "b_libretro.so")];
        let mut nav = Navigator::new(recent(), favorites, None);

        nav.set_view(View::ListRecent);
        assert_eq!(names(nav.active_list()), vec!["Castlevania", "Metroid", "Zelda"]);

        nav.set_view(View::ListFavorite);
        assert_eq!(names(nav.active_list()), vec!["Doom", "Tetris"]);

        nav.set_view(View::PictureRecent);
        assert_eq!(names(nav.active_list()), vec!["Zelda", "Metroid", "Castlevania"]);
    }

    #[test]
    fn set_view_resets_selection_and_camera() {
        let mut nav = Navigator::new(recent(), Vec::new(), None);
        nav.update(1, 0);
        nav.camera.set_target(50.0, 50.0);

        nav.set_view(View::ListRecent);

        assert_eq!(nav.selected_index(), 0);
        assert_eq!(nav.selected(), &GameRecord::default());
        assert_eq!(nav.camera.x, CameraAxis::new(0.0, 0.0));
        assert_eq!(nav.camera.y, CameraAxis::new(-25.0, 0.0));
    }

    #[test]
    fn advance_view_cycles_through_three_views() {
        let mut nav = Navigator::new(recent(), Vec::new(), None);
        nav.advance_view(1);
        assert_eq!(nav.view(), View::ListRecent);
        nav.advance_view(1);
        assert_eq!(nav.view(), View::ListFavorite);
        nav.advance_view(1);
        assert_eq!(nav.view(), View::PictureRecent);
        nav.advance_view(-1);
        assert_eq!(nav.view(), View::ListFavorite);
    }

    #[test]
    fn picture_view_wraps_when_reading() {
        let mut nav = Navigator::new(recent(), Vec::new(), None);
        nav.update(-1, 0);

        assert_eq!(nav.selected_index(), -1);
        assert_eq!(nav.effective_index(), Some(2));
        assert_eq!(nav.selected().name, "Castlevania");

        nav.update(1, 0);
        nav.update(1, 0);
        nav.update(1, 0);
        nav.update(1, 0);
        assert_eq!(nav.selected_index(), 3);
        assert_eq!(nav.selected().name, "Zelda");
    }

    #[test]
    fn picture_view_ignores_vertical_input() {
        let mut nav = Navigator::new(recent(), Vec::new(), None);
        nav.update(0, -1);
        assert_eq!(nav.selected_index(), 0);
    }

    #[test]
    fn picture_move_slides_the_camera() {
        let mut nav = Navigator::new(recent(), Vec::new(), None);
        nav.update(1, 0);
        assert_eq!(nav.camera.x.current, -PICTURE_SLIDE);
    }

    #[test]
    fn list_view_clamps_to_bounds() {
        let mut nav = list_nav(5);
        nav.update(0, 3);
        assert_eq!(nav.selected_index(), 0);

        nav.update(2, 1);
        assert_eq!(nav.selected_index(), 4);
        assert_eq!(nav.selected().name, "Game 4");
    }

    #[test]
    fn list_view_moves_down_and_jumps_sideways() {
        let mut nav = list_nav(20);
        nav.update(0, -1);
        assert_eq!(nav.selected_index(), 1);
        nav.update(1, 0);
        assert_eq!(nav.selected_index(), 5);
        nav.update(-1, 0);
        assert_eq!(nav.selected_index(), 1);
    }

    #[test]
    fn empty_lists_select_nothing() {
        let mut nav = Navigator::new(Vec::new(), Vec::new(), None);
        nav.update(-1, 0);
        assert_eq!(nav.effective_index(), None);
        assert!(!nav.selected().active);

        nav.set_view(View::ListFavorite);
        nav.update(1, -1);
        assert_eq!(nav.selected_index(), 0);
        assert!(!nav.selected().active);
    }

    #[test]
    fn list_camera_follows_selection_below_the_fold() {
        let mut nav = list_nav(20);
        nav.retarget_camera();
        assert_eq!(nav.camera.y.target, 0.0);

        for _ in 0..5 {
            nav.update(0, -1);
        }
        nav.retarget_camera();
        assert_eq!(nav.camera.y.target, list_row_y(5) - 150.0);
    }

    #[test]
    fn art_is_only_resolved_in_picture_view() {
        let root = tempdir().unwrap();
        let folder = root.path().join("Snes9x");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("Metroid.png"), b"png").unwrap();

        let games = vec![game("Metroid", "snes9x_libretro.so")];
        let mut nav = Navigator::new(games, Vec::new(), Some(root.path().to_path_buf()));

        nav.update(0, 0);
        assert!(nav.art().active);
        assert_eq!(PathBuf::from(&nav.art().path), folder.join("Metroid.png"));

        nav.set_view(View::ListRecent);
        nav.update(0, 0);
        assert!(!nav.art().active);
    }

    #[test]
    fn art_follows_the_selection() {
        let root = tempdir().unwrap();
        let folder = root.path().join("Snes9x");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("Metroid.png"), b"png").unwrap();

        let games = vec![
            game("Metroid", "snes9x_libretro.so"),
            game("Zelda", "snes9x_libretro.so"),
        ];
        let mut nav = Navigator::new(games, Vec::new(), Some(root.path().to_path_buf()));

        nav.update(0, 0);
        assert!(nav.art().active);
        nav.update(1, 0);
        assert!(!nav.art().active);

        // A screenshot taken while Zelda is selected shows up once the selection changes again.
        fs::write(folder.join("Zelda.png"), b"png").unwrap();
        nav.update(-1, 0);
        nav.update(1, 0);
        assert!(nav.art().active);
    }
}
