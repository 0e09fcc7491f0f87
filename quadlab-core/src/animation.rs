//! Per-frame color animation fed to the fragment shader's color uniform.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Which color channel a [`ColorPulse`] animates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Red,
    Green,
    Blue,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// A color whose selected channel bounces between 0 and 1 by a fixed step
/// every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPulse {
    color: Vec4,
    channel: Channel,
    step: f32,
}

impl Default for ColorPulse {
    fn default() -> Self {
        Self::new(Vec4::new(0.2, 0.3, 0.8, 1.0), Channel::Red, 0.05)
    }
}

impl ColorPulse {
    pub fn new(color: Vec4, channel: Channel, step: f32) -> Self {
        Self {
            color,
            channel,
            step,
        }
    }

    /// The color to upload this frame.
    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Moves one frame forward. The direction flips once the channel has
    /// left `[0, 1]`, so it overshoots by at most one step.
    pub fn advance(&mut self) {
        let i = self.channel.index();
        let value = self.color[i];
        if value > 1.0 {
            self.step = -self.step.abs();
        } else if value < 0.0 {
            self.step = self.step.abs();
        }
        self.color[i] = value + self.step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_initial_color() {
        let pulse = ColorPulse::default();
        assert_eq!(pulse.color(), Vec4::new(0.2, 0.3, 0.8, 1.0));
        assert_eq!(pulse.step(), 0.05);
    }

    #[test]
    fn test_advance_moves_only_selected_channel() {
        let mut pulse = ColorPulse::new(Vec4::new(0.5, 0.5, 0.5, 1.0), Channel::Green, 0.1);
        pulse.advance();
        let color = pulse.color();
        assert_eq!(color.x, 0.5);
        assert!((color.y - 0.6).abs() < 1e-6);
        assert_eq!(color.z, 0.5);
        assert_eq!(color.w, 1.0);
    }

    #[test]
    fn test_pulse_bounces_within_range() {
        let mut pulse = ColorPulse::default();
        let mut saw_falling = false;
        let mut saw_rising_again = false;
        for _ in 0..200 {
            pulse.advance();
            let red = pulse.color().x;
            assert!(red >= -0.05 - 1e-4 && red <= 1.05 + 1e-4, "red out of range: {red}");
            if pulse.step() < 0.0 {
                saw_falling = true;
            } else if saw_falling {
                saw_rising_again = true;
            }
        }
        assert!(saw_falling);
        assert!(saw_rising_again);
    }

    #[test]
    fn test_channel_serde_names() {
        let channel: Channel = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(channel, Channel::Blue);
    }
}
