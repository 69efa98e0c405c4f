use cgmath::{Vector2, Vector3};

/// Ping-pongs a color channel between 0 and 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorPulse {
    value: f32,
    increment: f32,
}

impl ColorPulse {
    pub const STEP: f32 = 0.05;

    pub fn new(value: f32) -> Self {
        ColorPulse {
            value,
            increment: Self::STEP,
        }
    }

    /// Advances one frame and returns the new value. The direction only
    /// changes once the value has left `[0, 1]`, so it can overshoot by up to
    /// one step.
    pub fn step(&mut self) -> f32 {
        if self.value > 1.0 {
            self.increment = -Self::STEP;
        } else if self.value < 0.0 {
            self.increment = Self::STEP;
        }
        self.value += self.increment;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Default for ColorPulse {
    fn default() -> Self {
        ColorPulse::new(0.0)
    }
}

/// A translation that bounces around the rectangle `[0, width] x [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bouncer {
    pub translation: Vector3<f32>,
    pub speed: Vector2<i32>,
    direction: Vector2<f32>,
    bounds: Vector2<f32>,
}

impl Bouncer {
    pub fn new(translation: Vector3<f32>, speed: Vector2<i32>, width: f32, height: f32) -> Self {
        Bouncer {
            translation,
            speed,
            direction: Vector2::new(1.0, 1.0),
            bounds: Vector2::new(width, height),
        }
    }

    /// Moves one frame. An axis turns around when it is on or past either
    /// edge, before moving.
    pub fn step(&mut self) -> Vector3<f32> {
        if self.translation.x >= self.bounds.x || self.translation.x <= 0.0 {
            self.direction.x *= -1.0;
        }
        if self.translation.y >= self.bounds.y || self.translation.y <= 0.0 {
            self.direction.y *= -1.0;
        }

        self.translation.x += self.direction.x * self.speed.x as f32;
        self.translation.y += self.direction.y * self.speed.y as f32;
        self.translation
    }

    pub fn direction(&self) -> Vector2<f32> {
        self.direction
    }

    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.bounds = Vector2::new(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pulse_rises_from_zero() {
        let mut pulse = ColorPulse::default();
        assert_relative_eq!(pulse.step(), 0.05, epsilon = 1e-5);
        assert_relative_eq!(pulse.step(), 0.10, epsilon = 1e-5);
    }

    #[test]
    fn pulse_turns_around_after_overshooting() {
        let mut pulse = ColorPulse::new(1.02);
        assert_relative_eq!(pulse.step(), 0.97, epsilon = 1e-5);
        assert_relative_eq!(pulse.step(), 0.92, epsilon = 1e-5);

        let mut pulse = ColorPulse::new(-0.01);
        pulse.increment = -ColorPulse::STEP;
        assert_relative_eq!(pulse.step(), 0.04, epsilon = 1e-5);
    }

    #[test]
    fn pulse_stays_near_unit_range() {
        let mut pulse = ColorPulse::default();
        for _ in 0..1000 {
            let v = pulse.step();
            assert!(v > -0.1 && v < 1.1, "{} escaped", v);
        }
    }

    #[test]
    fn bouncer_starting_at_edge_flips_first() {
        // sitting on y = 0 flips y before the first move, so it goes down
        let mut b = Bouncer::new(Vector3::new(50.0, 0.0, 0.0), Vector2::new(2, 3), 960.0, 540.0);
        let t = b.step();
        assert_relative_eq!(t.x, 52.0);
        assert_relative_eq!(t.y, -3.0);

        // now below zero, it flips back up
        let t = b.step();
        assert_relative_eq!(t.y, 0.0);
    }

    #[test]
    fn bouncer_reverses_at_far_edge() {
        let mut b = Bouncer::new(Vector3::new(958.0, 100.0, 0.0), Vector2::new(2, 2), 960.0, 540.0);
        assert_relative_eq!(b.step().x, 960.0);
        assert_relative_eq!(b.step().x, 958.0);
        assert_relative_eq!(b.direction().x, -1.0);
    }

    #[test]
    fn bouncer_keeps_z() {
        let mut b = Bouncer::new(Vector3::new(100.0, 100.0, 0.5), Vector2::new(-4, 7), 960.0, 540.0);
        for _ in 0..500 {
            assert_relative_eq!(b.step().z, 0.5);
        }
    }

    #[test]
    fn zero_speed_stays_put() {
        let mut b = Bouncer::new(Vector3::new(10.0, 10.0, 0.0), Vector2::new(0, 0), 960.0, 540.0);
        assert_eq!(b.step(), Vector3::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn quads_move_independently_with_their_own_speeds() {
        let mut a = Bouncer::new(Vector3::new(50.0, 50.0, 0.0), Vector2::new(1, 1), 960.0, 540.0);
        let mut b = Bouncer::new(Vector3::new(600.0, 50.0, 0.0), Vector2::new(1, 1), 960.0, 540.0);
        for _ in 0..10 {
            a.step();
            b.step();
        }
        assert_eq!(a.translation, Vector3::new(60.0, 60.0, 0.0));
        assert_eq!(b.translation, Vector3::new(610.0, 60.0, 0.0));

        // a slider edit only changes the quad it belongs to
        b.speed = Vector2::new(-5, 0);
        a.step();
        b.step();
        assert_eq!(a.translation, Vector3::new(61.0, 61.0, 0.0));
        assert_eq!(b.translation, Vector3::new(605.0, 60.0, 0.0));
    }
}
