use log::info;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crate::catalog::GameRecord;
use crate::input::{InputRepeatTimer, InputSnapshot};
use crate::nav::Navigator;

/// How a browsing session finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Launch(GameRecord),
    Exit,
    Shutdown,
}

/// One pass of the switcher, from the catalog scan until something is picked.
pub struct Session {
    pub nav: Navigator,
    repeat: InputRepeatTimer,
    uptime: f32,
    power_hold: f32,
    end: Option<SessionEnd>,
}

impl Session {
    /// The menu button is ignored this soon after start, so the press that
    /// opened the switcher does not count toward a shutdown.
    pub const POWER_ARM_DELAY: f32 = 0.1;
    pub const POWER_OFF_HOLD: f32 = 0.9;
    /// Extra hold time per frame while the boost button is down.
    pub const POWER_BOOST: f32 = 1.0;

    pub fn new(recent: Vec<GameRecord>, favorite: Vec<GameRecord>, art_root: Option<PathBuf>) -> Self {
        Session {
            nav: Navigator::new(recent, favorite, art_root),
            repeat: InputRepeatTimer::new(),
            uptime: 0.0,
            power_hold: 0.0,
            end: None,
        }
    }

    pub fn end(&self) -> Option<&SessionEnd> {
        self.end.as_ref()
    }

    pub fn into_end(self) -> Option<SessionEnd> {
        self.end
    }

    /// Seconds the power button has counted as held, boosts included.
    pub fn power_hold(&self) -> f32 {
        self.power_hold
    }

    /// Advances the session by one frame. Once the session has ended further ticks do nothing.
    pub fn tick(&mut self, input: &InputSnapshot, delta_time: f32) {
        if self.end.is_some() {
            return;
        }
        self.uptime += delta_time;

        if input.cycle_view {
            self.nav.advance_view(1);
        }

        let (dx, dy) = self.repeat.update(input.dir_x, input.dir_y, delta_time);
        self.nav.update(dx, dy);
        self.nav.retarget_camera();
        self.nav.camera.step();

        // Decided on the selection this frame shows, after any move.
        if input.exit {
            info!("exit requested");
            self.end = Some(SessionEnd::Exit);
        } else if input.confirm && self.nav.selected().active {
            info!("selected {}", self.nav.selected().name);
            self.end = Some(SessionEnd::Launch(self.nav.selected().clone()));
        }

        self.update_power_hold(input, delta_time);
    }

    fn update_power_hold(&mut self, input: &InputSnapshot, delta_time: f32) {
        if !input.menu || self.uptime <= Self::POWER_ARM_DELAY {
            self.power_hold = 0.0;
            return;
        }

        self.power_hold += delta_time;
        if input.menu_boost {
            self.power_hold += Self::POWER_BOOST;
        }
        if self.power_hold > Self::POWER_OFF_HOLD && self.end.is_none() {
            info!("power button held, shutting down");
            self.end = Some(SessionEnd::Shutdown);
        }
    }
}

// ===================================
// FRAME PACING
// ===================================

/// Time source for [`FramePacer`].
pub trait Clock {
    /// Time since some fixed point, only ever compared with itself.
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Holds the loop near 60 Hz and measures the frame time.
pub struct FramePacer<C: Clock> {
    clock: C,
    last_frame: Duration,
}

impl<C: Clock> FramePacer<C> {
    pub const MIN_SLEEP: Duration = Duration::from_millis(4);
    pub const STEP: Duration = Duration::from_millis(1);
    pub const FRAME_TIME: Duration = Duration::from_millis(16);

    pub fn new(clock: C) -> Self {
        let last_frame = clock.now();
        FramePacer { clock, last_frame }
    }

    /// Sleeps out the rest of the frame and returns its length in seconds.
    pub fn pace(&mut self) -> f32 {
        self.clock.sleep(Self::MIN_SLEEP);
        while self.clock.now().saturating_sub(self.last_frame) < Self::FRAME_TIME {
            self.clock.sleep(Self::STEP);
        }

        let now = self.clock.now();
        let delta = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        delta.as_secs_f32()
    }
}
