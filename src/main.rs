use log::{error, info};
use macroquad::prelude::*;

mod art;
mod camera;
mod catalog;
mod components;
mod config;
mod error;
mod gpu;
mod handoff;
mod input;
mod nav;
mod retroarch;
mod session;
mod system;
mod texture;
mod ui;
mod utils;

use crate::catalog::scan_directory;
use crate::config::Config;
use crate::gpu::MacroquadBackend;
use crate::handoff::hand_off;
use crate::input::InputState;
use crate::retroarch::{launcher_for, resolve_art_root, Launched};
use crate::session::{FramePacer, Session, SessionEnd, SystemClock};
use crate::texture::TextureCache;
use crate::ui::{Theme, SCREEN_HEIGHT, SCREEN_WIDTH};

fn window_conf() -> Conf {
    Conf {
        window_title: "game-switcher".to_owned(),
        window_resizable: false,
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        high_dpi: false,
        fullscreen: true,

        ..Default::default()
    }
}

/// Scans the catalogs and RetroArch config fresh, so games played since the
/// last session show up.
fn new_session(config: &Config) -> Session {
    let recent = scan_directory(&config.history_dir);
    let favorite = scan_directory(&config.favorite_dir);
    let art_root = resolve_art_root(config);
    info!(
        "{} recent games, {} favorites, screenshots in {}",
        recent.len(),
        favorite.len(),
        art_root.as_ref().map_or("nowhere".into(), |root| root.display().to_string())
    );
    Session::new(recent, favorite, art_root)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    if config.dry_run {
        info!("dry run: nothing will be written, launched or powered off");
    }

    let theme = Theme::load(&config.assets_dir).await;
    let mut textures = TextureCache::new(MacroquadBackend);
    let mut input = InputState::new();

    loop {
        let mut session = new_session(&config);
        let mut pacer = FramePacer::new(SystemClock::new());
        let mut delta_time = 0.0;

        // The frame that ends the session is still drawn, dimmed or black.
        while session.end().is_none() {
            let snapshot = input.poll();
            session.tick(&snapshot, delta_time);

            clear_background(BLACK);
            ui::render(&session, &mut textures, &theme);

            delta_time = pacer.pace();
            next_frame().await;
        }

        if let Some(end) = session.end() {
            std::thread::sleep(ui::closing_frame(end).1);
        }

        match session.into_end() {
            Some(SessionEnd::Launch(record)) => {
                info!("handing {} to the emulator ({:?})", record.name, config.launcher.mode);
                let launcher = launcher_for(&config.launcher);
                match hand_off(&record, &config, launcher.as_ref()) {
                    Ok(Launched::Returned) => {}
                    // The wrapper script starts the game, then the switcher again.
                    Ok(Launched::Queued) => break,
                    Err(e) => {
                        error!("could not start {}: {e}", record.name);
                        std::process::exit(1);
                    }
                }
            }
            Some(SessionEnd::Shutdown) => {
                system::power_off(config.dry_run);
                break;
            }
            Some(SessionEnd::Exit) | None => break,
        }
    }
}
