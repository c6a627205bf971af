/// How far the camera moves toward its target each frame.
pub const CAMERA_EASING: f32 = 0.1;
/// The camera never trails its target by more than this many pixels.
pub const CAMERA_MAX_LAG: f32 = 200.0;

/// One axis of the scrolling camera.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraAxis {
    pub current: f32,
    pub target: f32,
}

impl CameraAxis {
    pub fn new(current: f32, target: f32) -> Self {
        Self { current, target }
    }

    /// Eases toward the target by a fixed fraction per frame, independent of frame time.
    pub fn step(&mut self) {
        self.current += (self.target - self.current) * CAMERA_EASING;
        self.current = self
            .current
            .clamp(self.target - CAMERA_MAX_LAG, self.target + CAMERA_MAX_LAG);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: CameraAxis,
    pub y: CameraAxis,
}

impl Camera {
    pub fn step(&mut self) {
        self.x.step();
        self.y.step();
    }

    pub fn set_target(&mut self, x: f32, y: f32) {
        self.x.target = x;
        self.y.target = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_a_tenth_of_the_way() {
        let mut axis = CameraAxis::new(0.0, 100.0);
        axis.step();
        assert!((axis.current - 10.0).abs() < 1e-4);
        axis.step();
        assert!((axis.current - 19.0).abs() < 1e-4);
    }

    #[test]
    fn large_jumps_are_clamped_after_one_step() {
        for target in [-5000.0, -201.0, 250.0, 1_000.0, 123_456.0] {
            let mut axis = CameraAxis::new(0.0, target);
            axis.step();
            assert!((axis.current - target).abs() <= CAMERA_MAX_LAG);
        }
    }

    #[test]
    fn clamped_jump_lands_exactly_on_the_bound() {
        let mut axis = CameraAxis::new(0.0, 1_000.0);
        axis.step();
        assert_eq!(axis.current, 800.0);
    }

    #[test]
    fn settles_on_target() {
        let mut axis = CameraAxis::new(-25.0, 0.0);
        for _ in 0..200 {
            axis.step();
        }
        assert!(axis.current.abs() < 1e-3);
    }

    #[test]
    fn axes_move_independently() {
        let mut camera = Camera {
            x: CameraAxis::new(0.0, 0.0),
            y: CameraAxis::new(0.0, 0.0),
        };
        camera.set_target(0.0, 300.0);
        camera.step();
        assert_eq!(camera.x.current, 0.0);
        assert!((camera.y.current - 100.0).abs() < 1e-4);
    }
}
