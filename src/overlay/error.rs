/*
 *  overlay/error.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Error types for the overlay engine
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

use thiserror::Error;

/// Errors surfaced at the overlay's configuration boundary.
///
/// Once inputs have passed this boundary the engine is total: layout
/// recomputation and animation ticks cannot fail. A missing metric
/// sample is not an error either; widgets keep their last-known data
/// (see [`TelemetrySource`](crate::telemetry::TelemetrySource)).
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A layout selector outside 0..=5 reached the engine. Indicates a
    /// stale preference file or a host-side defect; the caller decides
    /// whether to fall back to a default mode or reject the config.
    #[error("unknown layout mode {0} (expected 0-5)")]
    UnknownLayoutMode(u8),

    /// Window geometry produced a nonsensical aspect ratio.
    #[error("aspect ratio must be finite and positive, got {0}")]
    BadAspect(f64),
}
