/*
 *  lib.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
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

//! Activity-monitor overlay engine for an emulator debug HUD.
//!
//! Places twelve telemetry gauges (six DMA-channel bar charts, four
//! split-view memory bar charts, two stereo waveform traces) around the
//! emulated display, in normalized view coordinates, under six layout
//! arrangements, with per-widget opacity fades. Rasterization is the
//! host renderer's job; this crate emits positions, colors, alphas, and
//! per-widget render instructions.
//!
//! Single-threaded by contract: all mutation happens on the host's
//! render callback.

pub mod config;
pub mod overlay;
pub mod pacer;
pub mod telemetry;

pub use overlay::animation::{AnimatedFloat, FadeState};
pub use overlay::color::{DmaColorScheme, Rgb};
pub use overlay::error::OverlayError;
pub use overlay::layout::{AnchorSide, GridSlot, LayoutMode, Rect, MONITOR_COUNT};
pub use overlay::widget::RenderInstr;
pub use overlay::{MonitorDraw, MonitorOverlay};
pub use telemetry::{AudioChannel, DmaChannel, MemoryBank, TelemetrySource};
