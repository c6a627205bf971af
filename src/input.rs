use gilrs::{Axis, Button, EventType, Gilrs};
use log::warn;
use macroquad::prelude::*;

/// Everything the browser needs to know about the controls for one frame.
///
/// Directions are what is *held* right now (up is `+1` on `dir_y`);
/// `cycle_view` is an edge and only true on the frame the button went down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub dir_x: i32,
    pub dir_y: i32,
    pub cycle_view: bool,
    pub confirm: bool,
    pub exit: bool,
    pub menu: bool,
    pub menu_boost: bool,
}

// ===================================
// AUTO-REPEAT
// ===================================

/// Delayed auto-shift: one move on press, a pause, then a steady repeat.
///
/// Both axes share this one timer, driven by whichever direction is held, so
/// switching from left to up without releasing does not restart the delay.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputRepeatTimer {
    held_for: f32,
}

impl InputRepeatTimer {
    pub const INITIAL_DELAY: f32 = 0.2666;
    pub const REPEAT_INTERVAL: f32 = 0.1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the move to apply this frame, `(0, 0)` when nothing should fire.
    pub fn update(&mut self, dir_x: i32, dir_y: i32, delta_time: f32) -> (i32, i32) {
        if dir_x == 0 && dir_y == 0 {
            self.held_for = 0.0;
            return (0, 0);
        }

        let mut fired = (0, 0);
        if self.held_for <= 0.0 {
            fired = (dir_x, dir_y);
        } else if self.held_for > Self::INITIAL_DELAY {
            fired = (dir_x, dir_y);
            self.held_for -= Self::REPEAT_INTERVAL;
        }
        self.held_for += delta_time;
        fired
    }
}

// ===================================
// POLLING
// ===================================

pub struct InputState {
    gilrs: Option<Gilrs>,
}

impl InputState {
    const ANALOG_DEADZONE: f32 = 0.5;

    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                warn!("gamepad support unavailable, keyboard only: {e}");
                None
            }
        };
        InputState { gilrs }
    }

    /// Reads keyboard and gamepads for this frame.
    pub fn poll(&mut self) -> InputSnapshot {
        let mut right = is_key_down(KeyCode::Right);
        let mut left = is_key_down(KeyCode::Left);
        let mut up = is_key_down(KeyCode::Up);
        let mut down = is_key_down(KeyCode::Down);

        let mut snapshot = InputSnapshot {
            cycle_view: is_key_pressed(KeyCode::B),
            confirm: is_key_down(KeyCode::Space),
            exit: is_key_down(KeyCode::X),
            menu: is_key_down(KeyCode::Escape),
            ..Default::default()
        };

        if let Some(gilrs) = self.gilrs.as_mut() {
            // Only the button-down edge matters for cycling views.
            while let Some(ev) = gilrs.next_event() {
                if let EventType::ButtonPressed(Button::East | Button::Select, _) = ev.event {
                    snapshot.cycle_view = true;
                }
            }

            for (_, gamepad) in gilrs.gamepads() {
                right |= gamepad.is_pressed(Button::DPadRight);
                left |= gamepad.is_pressed(Button::DPadLeft);
                up |= gamepad.is_pressed(Button::DPadUp);
                down |= gamepad.is_pressed(Button::DPadDown);

                let x = gamepad.value(Axis::LeftStickX);
                let y = gamepad.value(Axis::LeftStickY);
                right |= x > Self::ANALOG_DEADZONE;
                left |= x < -Self::ANALOG_DEADZONE;
                up |= y > Self::ANALOG_DEADZONE;
                down |= y < -Self::ANALOG_DEADZONE;

                snapshot.confirm |= gamepad.is_pressed(Button::South);
                snapshot.exit |= gamepad.is_pressed(Button::North);
                snapshot.menu |= gamepad.is_pressed(Button::Start) || gamepad.is_pressed(Button::Mode);
                snapshot.menu_boost |= gamepad.is_pressed(Button::Select);
            }
        }

        snapshot.dir_x = direction(right, left);
        // Down wins over up.
        snapshot.dir_y = -direction(down, up);
        snapshot
    }
}

/// Folds two opposing buttons into -1/0/1, `positive` winning when both are held.
fn direction(positive: bool, negative: bool) -> i32 {
    if positive {
        1
    } else if negative {
        -1
    } else {
        0
    }
}
