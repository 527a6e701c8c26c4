//! Cosmetic board tilt. Kept apart from navigation state so tilt input can
//! never move the player.

/// Largest tilt in either direction, in degrees.
pub const MAX_TILT: f32 = 15.0;
const NUDGE_STEP: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Rotation about the horizontal axis.
    pub x: f32,
    /// Rotation about the vertical axis.
    pub y: f32,
}

impl Tilt {
    pub fn nudge(&mut self, nudge: Nudge) {
        match nudge {
            Nudge::Up => self.x = (self.x + NUDGE_STEP).min(MAX_TILT),
            Nudge::Down => self.x = (self.x - NUDGE_STEP).max(-MAX_TILT),
            Nudge::Left => self.y = (self.y - NUDGE_STEP).max(-MAX_TILT),
            Nudge::Right => self.y = (self.y + NUDGE_STEP).min(MAX_TILT),
        }
    }

    /// Leans the board toward a pointer at fractional position `(fx, fy)`
    /// over it, where `(0.5, 0.5)` is the centre.
    pub fn follow_pointer(&mut self, fx: f32, fy: f32) {
        let fx = fx.clamp(0.0, 1.0);
        let fy = fy.clamp(0.0, 1.0);
        self.y = (fx - 0.5) * MAX_TILT;
        self.x = (fy - 0.5) * -MAX_TILT;
    }

    pub fn level(&mut self) {
        *self = Tilt::default();
    }
}
