/*
 *  overlay/layout.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Grid tables and the normalized-coordinate layout engine
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

use serde::{Deserialize, Serialize};

use super::error::OverlayError;

/// Number of activity monitors. Fixed: 6 DMA gauges, 4 memory gauges,
/// 2 waveform gauges.
pub const MONITOR_COUNT: usize = 12;

/// Vertical half-extent of the monitor band in normalized view space.
pub const Y_HALF_EXTENT: f64 = 0.365;

/// Gap between adjacent grid cells.
pub const CELL_GAP: f64 = 0.02;

/// One of the six fixed arrangements of the 12 monitors around the
/// emulated-display viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    TopAndBottom,
    TopOnly,
    BottomOnly,
    LeftAndRight,
    LeftOnly,
    RightOnly,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 6] = [
        LayoutMode::TopAndBottom,
        LayoutMode::TopOnly,
        LayoutMode::BottomOnly,
        LayoutMode::LeftAndRight,
        LayoutMode::LeftOnly,
        LayoutMode::RightOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::TopAndBottom => "top_and_bottom",
            LayoutMode::TopOnly => "top",
            LayoutMode::BottomOnly => "bottom",
            LayoutMode::LeftAndRight => "left_and_right",
            LayoutMode::LeftOnly => "left",
            LayoutMode::RightOnly => "right",
        }
    }
}

/// Preference files store the mode as an integer 0-5; anything else is
/// rejected here, before it can reach the grid tables.
impl TryFrom<u8> for LayoutMode {
    type Error = OverlayError;

    fn try_from(value: u8) -> Result<Self, OverlayError> {
        match value {
            0 => Ok(LayoutMode::TopAndBottom),
            1 => Ok(LayoutMode::TopOnly),
            2 => Ok(LayoutMode::BottomOnly),
            3 => Ok(LayoutMode::LeftAndRight),
            4 => Ok(LayoutMode::LeftOnly),
            5 => Ok(LayoutMode::RightOnly),
            other => Err(OverlayError::UnknownLayoutMode(other)),
        }
    }
}

/// Which edge of a widget's rect is its baseline, i.e. the edge the
/// bar fill or waveform trace grows away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSide {
    Upper,
    Lower,
    Left,
    Right,
}

/// Cell assignment for one monitor within the 6x6 logical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    pub col: u8,
    pub row: u8,
    pub side: AnchorSide,
}

const fn slot(col: u8, row: u8, side: AnchorSide) -> GridSlot {
    GridSlot { col, row, side }
}

use AnchorSide::{Left, Lower, Right, Upper};

// The inner-row/column order [1,2,3,4,0,5] is not lexicographic: the four
// memory gauges sit between the Copper and Bitplane gauges so related
// widgets stay visually adjacent.

static TOP_AND_BOTTOM: [GridSlot; MONITOR_COUNT] = [
    slot(0, 0, Lower), slot(1, 0, Lower), slot(2, 0, Lower),
    slot(3, 0, Lower), slot(4, 0, Lower), slot(5, 0, Lower),
    slot(1, 5, Upper), slot(2, 5, Upper), slot(3, 5, Upper), slot(4, 5, Upper),
    slot(0, 5, Upper), slot(5, 5, Upper),
];

static TOP_ONLY: [GridSlot; MONITOR_COUNT] = [
    slot(0, 5, Upper), slot(1, 5, Upper), slot(2, 5, Upper),
    slot(3, 5, Upper), slot(4, 5, Upper), slot(5, 5, Upper),
    slot(1, 4, Upper), slot(2, 4, Upper), slot(3, 4, Upper), slot(4, 4, Upper),
    slot(0, 4, Upper), slot(5, 4, Upper),
];

static BOTTOM_ONLY: [GridSlot; MONITOR_COUNT] = [
    slot(0, 0, Lower), slot(1, 0, Lower), slot(2, 0, Lower),
    slot(3, 0, Lower), slot(4, 0, Lower), slot(5, 0, Lower),
    slot(1, 1, Lower), slot(2, 1, Lower), slot(3, 1, Lower), slot(4, 1, Lower),
    slot(0, 1, Lower), slot(5, 1, Lower),
];

static LEFT_AND_RIGHT: [GridSlot; MONITOR_COUNT] = [
    slot(0, 5, Left), slot(0, 4, Left), slot(0, 3, Left),
    slot(0, 2, Left), slot(0, 1, Left), slot(0, 0, Left),
    slot(5, 4, Right), slot(5, 3, Right), slot(5, 2, Right), slot(5, 1, Right),
    slot(5, 5, Right), slot(5, 0, Right),
];

static LEFT_ONLY: [GridSlot; MONITOR_COUNT] = [
    slot(0, 5, Left), slot(0, 4, Left), slot(0, 3, Left),
    slot(0, 2, Left), slot(0, 1, Left), slot(0, 0, Left),
    slot(1, 4, Left), slot(1, 3, Left), slot(1, 2, Left), slot(1, 1, Left),
    slot(1, 5, Left), slot(1, 0, Left),
];

static RIGHT_ONLY: [GridSlot; MONITOR_COUNT] = [
    slot(5, 5, Right), slot(5, 4, Right), slot(5, 3, Right),
    slot(5, 2, Right), slot(5, 1, Right), slot(5, 0, Right),
    slot(4, 4, Right), slot(4, 3, Right), slot(4, 2, Right), slot(4, 1, Right),
    slot(4, 5, Right), slot(4, 0, Right),
];

/// Cell assignments for all 12 monitors under `mode`, in monitor order
/// (slot i belongs to monitor i).
pub fn slots_for(mode: LayoutMode) -> &'static [GridSlot; MONITOR_COUNT] {
    match mode {
        LayoutMode::TopAndBottom => &TOP_AND_BOTTOM,
        LayoutMode::TopOnly => &TOP_ONLY,
        LayoutMode::BottomOnly => &BOTTOM_ONLY,
        LayoutMode::LeftAndRight => &LEFT_AND_RIGHT,
        LayoutMode::LeftOnly => &LEFT_ONLY,
        LayoutMode::RightOnly => &RIGHT_ONLY,
    }
}

/// Axis-aligned rectangle in normalized view coordinates, origin at the
/// viewport center. x grows right, y grows up; (x, y) is the lower-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Validate window geometry before it enters the layout math.
pub fn check_aspect(aspect_ratio: f64) -> Result<(), OverlayError> {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        Ok(())
    } else {
        Err(OverlayError::BadAspect(aspect_ratio))
    }
}

/// Compute the rect and anchor side of every monitor for one mode and
/// aspect ratio.
///
/// Pure: identical inputs always yield bit-identical outputs. The band
/// spans a fixed +-0.365 vertically, so cell height is independent of the
/// aspect ratio; the horizontal extent scales with it. O(12) and run
/// unconditionally on every resize, mode change, or fullscreen
/// transition rather than diffed.
pub fn placements(
    mode: LayoutMode,
    aspect_ratio: f64,
) -> [(Rect, AnchorSide); MONITOR_COUNT] {
    //    w  d  w  d  w  d  w  d  w  d  w
    //   ___   ___   ___   ___   ___   ___
    //  |   |-|   |-|   |-|   |-|   |-|   | h
    //   ---   ---   ---   ---   ---   ---

    let ymax = Y_HALF_EXTENT;
    let ymin = -ymax;
    let yspan = ymax - ymin;

    let xmax = ymax * aspect_ratio;
    let xmin = -xmax;
    let xspan = xmax - xmin;

    let d = CELL_GAP;
    let w = (xspan - 5.0 * d) / 6.0;
    let h = (yspan - 5.0 * d) / 6.0;

    let slots = *slots_for(mode);
    slots.map(|s| {
        let rect = Rect {
            x: xmin + f64::from(s.col) * (w + d),
            y: ymin + f64::from(s.row) * (h + d),
            width: w,
            height: h,
        };
        (rect, s.side)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_twelve_distinct_cells() {
        for mode in LayoutMode::ALL {
            let slots = slots_for(mode);
            assert_eq!(slots.len(), MONITOR_COUNT);
            for i in 0..slots.len() {
                for j in (i + 1)..slots.len() {
                    assert!(
                        (slots[i].col, slots[i].row) != (slots[j].col, slots[j].row),
                        "{mode:?}: slots {i} and {j} share a cell"
                    );
                }
            }
        }
    }

    #[test]
    fn mode_round_trips_from_integer() {
        for (i, mode) in LayoutMode::ALL.iter().enumerate() {
            assert_eq!(LayoutMode::try_from(i as u8).unwrap(), *mode);
        }
        assert!(LayoutMode::try_from(6).is_err());
        assert!(LayoutMode::try_from(255).is_err());
    }

    #[test]
    fn cell_height_is_aspect_independent() {
        for aspect in [0.5, 1.0, 16.0 / 9.0, 3.2] {
            let rects = placements(LayoutMode::TopOnly, aspect);
            for (rect, _) in rects {
                assert!((rect.height - 0.105).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn widescreen_worked_example() {
        let aspect = 16.0 / 9.0;
        let rects = placements(LayoutMode::TopAndBottom, aspect);

        let xmax = Y_HALF_EXTENT * aspect;
        assert!((xmax - 0.648888888888889).abs() < 1e-12);

        let (r0, side0) = rects[0];
        assert_eq!(side0, AnchorSide::Lower);
        assert!((r0.x - -xmax).abs() < 1e-12);
        assert!((r0.y - -Y_HALF_EXTENT).abs() < 1e-12);
        assert!((r0.width - (2.0 * xmax - 0.10) / 6.0).abs() < 1e-12);
    }

    #[test]
    fn rects_stay_inside_the_band() {
        for mode in LayoutMode::ALL {
            for aspect in [0.3, 1.0, 1.6, 4.0] {
                let xmax = Y_HALF_EXTENT * aspect;
                for (rect, _) in placements(mode, aspect) {
                    assert!(rect.width > 0.0 && rect.height > 0.0);
                    assert!(rect.x >= -xmax - 1e-12);
                    assert!(rect.x + rect.width <= xmax + 1e-12);
                    assert!(rect.y >= -Y_HALF_EXTENT - 1e-12);
                    assert!(rect.y + rect.height <= Y_HALF_EXTENT + 1e-12);
                }
            }
        }
    }

    #[test]
    fn placements_are_deterministic() {
        let a = placements(LayoutMode::LeftAndRight, 1.333);
        let b = placements(LayoutMode::LeftAndRight, 1.333);
        assert_eq!(a, b);
    }

    #[test]
    fn bad_aspect_is_rejected() {
        assert!(check_aspect(0.0).is_err());
        assert!(check_aspect(-1.0).is_err());
        assert!(check_aspect(f64::NAN).is_err());
        assert!(check_aspect(f64::INFINITY).is_err());
        assert!(check_aspect(1.777).is_ok());
    }
}
