/*
 *  overlay/color.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Gauge colors and the bus-debugger color snapshot
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

/// Linear RGB color with components in 0.0..=1.0.
///
/// Activity monitors carry one of these per widget; the renderer combines
/// it with the widget's fade alpha when drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    // The bus debugger's muted palette
    pub const RED: Rgb = Rgb::new(1.0, 0.4, 0.4);
    pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.4);
    pub const GREEN: Rgb = Rgb::new(0.4, 1.0, 0.4);
    pub const CYAN: Rgb = Rgb::new(0.4, 1.0, 1.0);
    pub const BLUE: Rgb = Rgb::new(0.4, 0.4, 1.0);
    pub const MAGENTA: Rgb = Rgb::new(1.0, 0.4, 1.0);
    pub const GRAY: Rgb = Rgb::new(0.7, 0.7, 0.7);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Mix toward white by `weight` (0.0 = unchanged, 1.0 = white).
    ///
    /// Used to derive the gradient tints a gauge fill is shaded with.
    pub fn shade(self, weight: f32) -> Self {
        let w = weight.clamp(0.0, 1.0);
        Self {
            r: self.r + (1.0 - self.r) * w,
            g: self.g + (1.0 - self.g) * w,
            b: self.b + (1.0 - self.b) * w,
        }
    }
}

/// One-time color snapshot taken from the emulation core's bus debugger.
///
/// Queried once when the monitor set is built. The core's palette is
/// treated as immutable for the overlay's lifetime; hosts that let the
/// user recolor DMA channels mid-session call
/// [`MonitorOverlay::refresh_colors`](crate::overlay::MonitorOverlay::refresh_colors)
/// on their palette-change notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmaColorScheme {
    pub copper: Rgb,
    pub blitter: Rgb,
    pub disk: Rgb,
    pub audio: Rgb,
    pub sprite: Rgb,
    pub bitplane: Rgb,
}

impl Default for DmaColorScheme {
    fn default() -> Self {
        Self {
            copper: Rgb::BLUE,
            blitter: Rgb::GREEN,
            disk: Rgb::YELLOW,
            audio: Rgb::BLUE,
            sprite: Rgb::MAGENTA,
            bitplane: Rgb::RED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_full_weight_is_white() {
        assert_eq!(Rgb::RED.shade(1.0), Rgb::WHITE);
    }

    #[test]
    fn shade_zero_weight_is_identity() {
        assert_eq!(Rgb::CYAN.shade(0.0), Rgb::CYAN);
    }

    #[test]
    fn shade_clamps_weight() {
        assert_eq!(Rgb::GREEN.shade(2.0), Rgb::WHITE);
        assert_eq!(Rgb::GREEN.shade(-1.0), Rgb::GREEN);
    }
}
