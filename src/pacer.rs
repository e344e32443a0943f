/*
 *  pacer.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Frame pacing for the simulator loop
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

use std::time::{Duration, Instant};

pub struct Pacer {
    next_deadline: Instant,
    frame: Duration,
}

impl Pacer {
    pub fn new(target_fps: u32) -> Self {
        let frame = Duration::from_micros((1_000_000u32 / target_fps.max(1)) as u64);
        Self { next_deadline: Instant::now(), frame }
    }

    #[inline]
    pub fn set_fps(&mut self, fps: u32) {
        self.frame = Duration::from_micros((1_000_000u32 / fps.max(1)) as u64);
    }

    /// Nominal frame time in seconds, the `dt` handed to the overlay tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.frame.as_secs_f32()
    }

    /// Returns true if a frame is due; if true, it also schedules the
    /// next deadline.
    #[inline]
    pub fn should_tick(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.next_deadline {
            self.next_deadline = now + self.frame;
            true
        } else {
            false
        }
    }

    /// Sleep until the next deadline. Keeps the loop from spinning
    /// between frames.
    pub fn wait(&self) {
        let now = Instant::now();
        if self.next_deadline > now {
            std::thread::sleep(self.next_deadline - now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_matches_fps() {
        let pacer = Pacer::new(60);
        assert!((pacer.dt() - 1.0 / 60.0).abs() < 1e-4);
    }

    #[test]
    fn first_tick_is_due_immediately() {
        let mut pacer = Pacer::new(30);
        assert!(pacer.should_tick());
        assert!(!pacer.should_tick());
    }
}
