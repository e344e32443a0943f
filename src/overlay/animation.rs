/*
 *  overlay/animation.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Per-widget opacity fades
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

/// Default time for a full 0.0 -> 1.0 fade, in seconds.
pub const DEFAULT_FADE_SECS: f32 = 0.5;

/// A scalar that moves toward a target a bounded step per frame tick.
///
/// Drives widget opacity. Both `current` and `target` live in 0.0..=1.0;
/// `tick` clamps at the target so a fade can never overshoot, and a
/// retarget mid-fade simply reverses direction from wherever the value is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedFloat {
    current: f32,
    target: f32,
}

impl AnimatedFloat {
    pub fn new(value: f32) -> Self {
        let v = value.clamp(0.0, 1.0);
        Self { current: v, target: v }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target.clamp(0.0, 1.0);
    }

    /// True while a fade is still in flight.
    #[inline]
    pub fn animating(&self) -> bool {
        self.current != self.target
    }

    /// Advance by at most `step` (dt / fade duration) toward the target.
    pub fn tick(&mut self, step: f32) {
        let step = step.max(0.0);
        if self.current < self.target {
            self.current = (self.current + step).min(self.target);
        } else if self.current > self.target {
            self.current = (self.current - step).max(self.target);
        }
    }
}

/// Where a widget sits in its fade cycle.
///
/// Derived from (current, target); transitions happen only through
/// `set_enabled` retargeting and `tick` reaching the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

impl AnimatedFloat {
    pub fn fade_state(&self) -> FadeState {
        if self.current < self.target {
            FadeState::FadingIn
        } else if self.current > self.target {
            FadeState::FadingOut
        } else if self.current > 0.0 {
            FadeState::Visible
        } else {
            FadeState::Hidden
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rises_monotonically_and_clamps() {
        let mut a = AnimatedFloat::new(0.0);
        a.set_target(1.0);
        let mut last = 0.0;
        for _ in 0..100 {
            a.tick(0.033);
            assert!(a.current() >= last);
            assert!(a.current() <= 1.0);
            last = a.current();
        }
        assert_eq!(a.current(), 1.0);
        assert_eq!(a.fade_state(), FadeState::Visible);
    }

    #[test]
    fn falls_monotonically_and_clamps() {
        let mut a = AnimatedFloat::new(1.0);
        a.set_target(0.0);
        let mut last = 1.0;
        for _ in 0..100 {
            a.tick(0.033);
            assert!(a.current() <= last);
            assert!(a.current() >= 0.0);
            last = a.current();
        }
        assert_eq!(a.current(), 0.0);
        assert_eq!(a.fade_state(), FadeState::Hidden);
    }

    #[test]
    fn retarget_mid_fade_reverses() {
        let mut a = AnimatedFloat::new(0.0);
        a.set_target(1.0);
        a.tick(0.3);
        assert_eq!(a.fade_state(), FadeState::FadingIn);
        a.set_target(0.0);
        assert_eq!(a.fade_state(), FadeState::FadingOut);
        a.tick(0.1);
        assert!((a.current() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn starts_hidden() {
        assert_eq!(AnimatedFloat::new(0.0).fade_state(), FadeState::Hidden);
    }

    #[test]
    fn zero_step_is_a_no_op() {
        let mut a = AnimatedFloat::new(0.0);
        a.set_target(1.0);
        a.tick(0.0);
        assert_eq!(a.current(), 0.0);
    }
}
