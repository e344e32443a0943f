/*
 *  telemetry.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  The read-only seam between the overlay and the emulation core
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

use crate::overlay::color::DmaColorScheme;

/// Hardware bus-access category measured by one DMA gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaChannel {
    Copper,
    Blitter,
    Disk,
    Audio,
    Sprite,
    Bitplane,
}

impl DmaChannel {
    pub const ALL: [DmaChannel; 6] = [
        DmaChannel::Copper,
        DmaChannel::Blitter,
        DmaChannel::Disk,
        DmaChannel::Audio,
        DmaChannel::Sprite,
        DmaChannel::Bitplane,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DmaChannel::Copper => "Copper DMA",
            DmaChannel::Blitter => "Blitter DMA",
            DmaChannel::Disk => "Disk DMA",
            DmaChannel::Audio => "Audio DMA",
            DmaChannel::Sprite => "Sprite DMA",
            DmaChannel::Bitplane => "Bitplane DMA",
        }
    }
}

/// Memory region whose CPU accesses are measured by one split-view gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryBank {
    Chip,
    Slow,
    Fast,
    Rom,
}

impl MemoryBank {
    pub const ALL: [MemoryBank; 4] = [
        MemoryBank::Chip,
        MemoryBank::Slow,
        MemoryBank::Fast,
        MemoryBank::Rom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MemoryBank::Chip => "CPU (Chip Ram)",
            MemoryBank::Slow => "CPU (Slow Ram)",
            MemoryBank::Fast => "CPU (Fast Ram)",
            MemoryBank::Rom => "CPU (Rom)",
        }
    }
}

/// Stereo channel a waveform gauge is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioChannel {
    Left,
    Right,
}

impl AudioChannel {
    pub fn name(&self) -> &'static str {
        match self {
            AudioChannel::Left => "Left Audio",
            AudioChannel::Right => "Right Audio",
        }
    }
}

/// Non-blocking metric reads from the emulation core.
///
/// Every method returns `None` when no fresh sample exists for the current
/// frame (core paused, warp transition). That is never an error: gauges
/// render their last-known history instead. The core owns the
/// thread-safety of the counters these reads touch; implementations must
/// not block.
pub trait TelemetrySource {
    /// Current bus-debugger palette. Sampled once when the monitor set is
    /// built.
    fn dma_colors(&self) -> DmaColorScheme;

    /// Fraction of the last frame's bus cycles consumed by `channel`,
    /// in 0.0..=1.0.
    fn dma_load(&self, channel: DmaChannel) -> Option<f64>;

    /// CPU accesses to `bank` over the last frame, split into
    /// (reads, writes), each in 0.0..=1.0.
    fn memory_load(&self, bank: MemoryBank) -> Option<(f64, f64)>;

    /// Copy the most recent audio-output amplitudes for `channel` into
    /// `buf` and return how many samples were written.
    fn audio_window(&self, channel: AudioChannel, buf: &mut [f32]) -> Option<usize>;
}
