//! The oscillating hammer position on the 0..100 track.
use crate::constants::{TRACK_MAX, TRACK_MIN};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Slider {
    pub value: f64,
    pub direction: Direction,
}

impl Slider {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: TRACK_MIN,
            direction: Direction::Forward,
        }
    }

    /// Move by `delta` along the current direction, bouncing off either end.
    ///
    /// A single call never wraps past a bound: overshoot is discarded, the
    /// value pins to the bound and the direction flips.
    pub fn advance(&mut self, delta: f64) {
        if !delta.is_finite() || delta <= 0.0 {
            return;
        }
        let next = self.direction.sign().mul_add(delta, self.value);
        if next >= TRACK_MAX {
            self.value = TRACK_MAX;
            self.direction = Direction::Backward;
        } else if next <= TRACK_MIN {
            self.value = TRACK_MIN;
            self.direction = Direction::Forward;
        } else {
            self.value = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_forward_until_the_far_bound() {
        let mut slider = Slider::new();
        slider.advance(30.0);
        assert!((slider.value - 30.0).abs() < 1e-9);
        assert_eq!(slider.direction, Direction::Forward);
        slider.advance(75.0);
        assert!((slider.value - TRACK_MAX).abs() < 1e-9);
        assert_eq!(slider.direction, Direction::Backward);
    }

    #[test]
    fn bounces_back_off_zero() {
        let mut slider = Slider {
            value: 4.0,
            direction: Direction::Backward,
        };
        slider.advance(10.0);
        assert!(slider.value.abs() < 1e-9);
        assert_eq!(slider.direction, Direction::Forward);
        slider.advance(2.5);
        assert!((slider.value - 2.5).abs() < 1e-9);
    }

    #[test]
    fn stays_within_track_over_many_ticks() {
        let mut slider = Slider::new();
        let mut flips = 0;
        let mut last = slider.direction;
        for _ in 0..2_000 {
            slider.advance(1.15);
            assert!((TRACK_MIN..=TRACK_MAX).contains(&slider.value));
            if slider.direction != last {
                flips += 1;
                last = slider.direction;
            }
        }
        assert!(flips >= 20);
    }

    #[test]
    fn ignores_non_positive_and_non_finite_steps() {
        let mut slider = Slider {
            value: 50.0,
            direction: Direction::Forward,
        };
        slider.advance(0.0);
        slider.advance(-3.0);
        slider.advance(f64::NAN);
        assert!((slider.value - 50.0).abs() < 1e-9);
    }
}
