/*
 *  overlay/mod.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  The monitor set: registry, visibility animation, frame contract
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

pub mod animation;
pub mod color;
pub mod error;
pub mod layout;
pub mod widget;

use log::info;

use animation::{AnimatedFloat, FadeState, DEFAULT_FADE_SECS};
use color::Rgb;
use error::OverlayError;
use layout::{check_aspect, placements, AnchorSide, LayoutMode, Rect, MONITOR_COUNT};
use widget::{BarSource, Monitor, RenderInstr};

use crate::telemetry::{AudioChannel, DmaChannel, MemoryBank, TelemetrySource};

/// One monitor together with its animation state.
///
/// Widget, opacity, and enabled flag live in a single record per slot, so
/// the three can never fall out of step the way parallel arrays can.
#[derive(Debug, Clone)]
pub struct MonitorSlot {
    pub monitor: Monitor,
    alpha: AnimatedFloat,
    enabled: bool,
}

/// Everything the renderer needs to draw one monitor this frame.
#[derive(Debug, Clone, Copy)]
pub struct MonitorDraw<'a> {
    pub name: &'static str,
    pub rect: Rect,
    pub side: AnchorSide,
    pub color: Rgb,
    pub alpha: f32,
    pub enabled: bool,
    pub instr: RenderInstr<'a>,
}

/// The fixed set of 12 activity monitors around the emulated display.
///
/// Built once when the overlay is first needed, lives for the session.
/// All mutation happens on the host's render callback; nothing here
/// blocks, suspends, or touches another thread's state.
#[derive(Debug, Clone)]
pub struct MonitorOverlay {
    slots: Vec<MonitorSlot>,
    mode: LayoutMode,
    aspect_ratio: f64,
    fade_secs: f32,
}

impl MonitorOverlay {
    /// Construct the 12 monitors in fixed order (6 DMA gauges, 4 memory
    /// gauges, 2 waveform gauges), take the one-time color snapshot from
    /// the core's bus debugger, and compute starting rects so the set is
    /// drawable before the first resize event arrives.
    ///
    /// All monitors start logically enabled but fully transparent; the
    /// host fades them in with [`set_enabled`](Self::set_enabled) or
    /// [`set_all_enabled`](Self::set_all_enabled).
    pub fn build(
        source: &dyn TelemetrySource,
        mode: LayoutMode,
        aspect_ratio: f64,
    ) -> Result<Self, OverlayError> {
        check_aspect(aspect_ratio)?;

        let colors = source.dma_colors();
        let mut monitors = Vec::with_capacity(MONITOR_COUNT);

        // DMA gauges. Copper and Blitter loads span several orders of
        // magnitude, so those two plot log-scale.
        for channel in DmaChannel::ALL {
            let log_scale = matches!(channel, DmaChannel::Copper | DmaChannel::Blitter);
            monitors.push(Monitor::bar_chart(
                channel.name(),
                BarSource::Dma(channel),
                log_scale,
                false,
                dma_color(&colors, channel),
            ));
        }

        // Memory gauges, reads and writes as a split view.
        for bank in MemoryBank::ALL {
            monitors.push(Monitor::bar_chart(
                bank.name(),
                BarSource::Memory(bank),
                false,
                true,
                Rgb::GRAY,
            ));
        }

        // Waveform gauges.
        monitors.push(Monitor::waveform(
            AudioChannel::Left.name(),
            AudioChannel::Left,
            Rgb::WHITE,
        ));
        monitors.push(Monitor::waveform(
            AudioChannel::Right.name(),
            AudioChannel::Right,
            Rgb::WHITE,
        ));

        debug_assert_eq!(monitors.len(), MONITOR_COUNT);

        let slots = monitors
            .into_iter()
            .map(|monitor| MonitorSlot {
                monitor,
                alpha: AnimatedFloat::new(0.0),
                enabled: true,
            })
            .collect();

        let mut overlay = Self {
            slots,
            mode,
            aspect_ratio,
            fade_secs: DEFAULT_FADE_SECS,
        };
        overlay.recompute_layout();

        info!(
            "monitor overlay built: {} monitors, layout {}, aspect {:.3}",
            overlay.slots.len(),
            mode.as_str(),
            aspect_ratio
        );
        Ok(overlay)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Seconds for a full fade. Values below one frame are clamped up so
    /// a fade is always observable.
    pub fn set_fade_secs(&mut self, secs: f32) {
        self.fade_secs = secs.max(1.0 / 60.0);
    }

    /// Switch the arrangement. Recomputes all 12 placements immediately.
    pub fn set_layout(&mut self, mode: LayoutMode) {
        self.mode = mode;
        self.recompute_layout();
        info!("monitor layout -> {}", mode.as_str());
    }

    /// New window geometry (resize or completed fullscreen transition).
    pub fn resize(&mut self, aspect_ratio: f64) -> Result<(), OverlayError> {
        check_aspect(aspect_ratio)?;
        self.aspect_ratio = aspect_ratio;
        self.recompute_layout();
        Ok(())
    }

    /// Overwrite every monitor's rect and anchor side from the current
    /// (mode, aspect ratio). Total overwrite of all 12 slots, so there is
    /// no partial-update state to protect.
    fn recompute_layout(&mut self) {
        let placed = placements(self.mode, self.aspect_ratio);
        for (slot, (rect, side)) in self.slots.iter_mut().zip(placed) {
            slot.monitor.set_position(rect, side);
        }
    }

    /// Toggle one monitor. Retargets its fade regardless of the previous
    /// flag value, so this is also how the host triggers the initial
    /// fade-in after build.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        let slot = &mut self.slots[index];
        slot.enabled = enabled;
        slot.alpha.set_target(if enabled { 1.0 } else { 0.0 });
    }

    pub fn set_all_enabled(&mut self, enabled: bool) {
        for i in 0..self.slots.len() {
            self.set_enabled(i, enabled);
        }
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.slots[index].enabled
    }

    pub fn alpha(&self, index: usize) -> f32 {
        self.slots[index].alpha.current()
    }

    pub fn fade_state(&self, index: usize) -> FadeState {
        self.slots[index].alpha.fade_state()
    }

    /// True while any monitor still has visible pixels. Hosts skip the
    /// overlay render pass entirely when this goes false.
    pub fn any_visible(&self) -> bool {
        self.slots.iter().any(|s| s.alpha.current() > 0.0)
    }

    /// Advance every fade by `dt` seconds. Runs once per rendered frame,
    /// independent of layout recomputation.
    pub fn tick(&mut self, dt: f32) {
        let step = dt / self.fade_secs;
        for slot in &mut self.slots {
            slot.alpha.tick(step);
        }
    }

    /// Pull one metric snapshot per monitor. Stale monitors keep their
    /// previous data; returns how many sampled fresh.
    pub fn sample(&mut self, source: &dyn TelemetrySource) -> usize {
        let mut fresh = 0;
        for slot in &mut self.slots {
            if slot.monitor.sample(source) {
                fresh += 1;
            }
        }
        fresh
    }

    /// The once-per-frame update: advance fades, then sample.
    pub fn frame(&mut self, source: &dyn TelemetrySource, dt: f32) {
        self.tick(dt);
        self.sample(source);
    }

    /// Draw tuples for all 12 monitors, in monitor order.
    pub fn draws(&self) -> Vec<MonitorDraw<'_>> {
        self.slots
            .iter()
            .map(|slot| MonitorDraw {
                name: slot.monitor.name(),
                rect: slot.monitor.rect(),
                side: slot.monitor.side(),
                color: slot.monitor.color(),
                alpha: slot.alpha.current(),
                enabled: slot.enabled,
                instr: slot.monitor.render_instr(),
            })
            .collect()
    }

    /// Re-take the bus-debugger color snapshot. For hosts whose core
    /// allows recoloring DMA channels mid-session.
    pub fn refresh_colors(&mut self, source: &dyn TelemetrySource) {
        let colors = source.dma_colors();
        for (slot, channel) in self.slots.iter_mut().zip(DmaChannel::ALL) {
            slot.monitor.set_color(dma_color(&colors, channel));
        }
    }
}

fn dma_color(colors: &color::DmaColorScheme, channel: DmaChannel) -> Rgb {
    match channel {
        DmaChannel::Copper => colors.copper,
        DmaChannel::Blitter => colors.blitter,
        DmaChannel::Disk => colors.disk,
        DmaChannel::Audio => colors.audio,
        DmaChannel::Sprite => colors.sprite,
        DmaChannel::Bitplane => colors.bitplane,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::DmaColorScheme;

    struct QuietSource;

    impl TelemetrySource for QuietSource {
        fn dma_colors(&self) -> DmaColorScheme {
            DmaColorScheme::default()
        }
        fn dma_load(&self, _channel: DmaChannel) -> Option<f64> {
            Some(0.1)
        }
        fn memory_load(&self, _bank: MemoryBank) -> Option<(f64, f64)> {
            Some((0.2, 0.3))
        }
        fn audio_window(&self, _channel: AudioChannel, buf: &mut [f32]) -> Option<usize> {
            buf.fill(0.0);
            Some(buf.len())
        }
    }

    #[test]
    fn build_creates_twelve_slots_in_fixed_order() {
        let overlay = MonitorOverlay::build(&QuietSource, LayoutMode::TopAndBottom, 1.0).unwrap();
        assert_eq!(overlay.len(), MONITOR_COUNT);

        let draws = overlay.draws();
        assert_eq!(draws[0].name, "Copper DMA");
        assert_eq!(draws[5].name, "Bitplane DMA");
        assert_eq!(draws[6].name, "CPU (Chip Ram)");
        assert_eq!(draws[9].name, "CPU (Rom)");
        assert_eq!(draws[10].name, "Left Audio");
        assert_eq!(draws[11].name, "Right Audio");

        for draw in &draws {
            assert_eq!(draw.alpha, 0.0);
            assert!(draw.enabled);
        }
        assert!(!overlay.any_visible());
    }

    #[test]
    fn dma_gauges_take_debugger_colors() {
        let overlay = MonitorOverlay::build(&QuietSource, LayoutMode::TopOnly, 1.6).unwrap();
        let draws = overlay.draws();
        let scheme = DmaColorScheme::default();
        assert_eq!(draws[0].color, scheme.copper);
        assert_eq!(draws[2].color, scheme.disk);
        assert_eq!(draws[5].color, scheme.bitplane);
        assert_eq!(draws[6].color, Rgb::GRAY);
        assert_eq!(draws[10].color, Rgb::WHITE);
    }

    #[test]
    fn build_rejects_bad_aspect() {
        assert!(MonitorOverlay::build(&QuietSource, LayoutMode::TopOnly, 0.0).is_err());
        assert!(MonitorOverlay::build(&QuietSource, LayoutMode::TopOnly, f64::NAN).is_err());
    }

    #[test]
    fn resize_moves_every_monitor() {
        let mut overlay = MonitorOverlay::build(&QuietSource, LayoutMode::TopAndBottom, 1.0).unwrap();
        let before: Vec<Rect> = overlay.draws().iter().map(|d| d.rect).collect();
        overlay.resize(2.0).unwrap();
        let after: Vec<Rect> = overlay.draws().iter().map(|d| d.rect).collect();
        for (b, a) in before.iter().zip(&after) {
            assert_ne!(b.width, a.width);
            // height never depends on aspect
            assert_eq!(b.height, a.height);
        }
    }

    #[test]
    fn fade_in_then_out() {
        let mut overlay = MonitorOverlay::build(&QuietSource, LayoutMode::BottomOnly, 1.3).unwrap();
        overlay.set_enabled(3, true);
        assert_eq!(overlay.fade_state(3), FadeState::FadingIn);

        // default fade is 0.5 s; 60 frames at 60 fps is ample
        for _ in 0..60 {
            overlay.tick(1.0 / 60.0);
        }
        assert_eq!(overlay.alpha(3), 1.0);
        assert_eq!(overlay.fade_state(3), FadeState::Visible);
        assert!(overlay.any_visible());

        overlay.set_enabled(3, false);
        overlay.tick(1.0 / 60.0);
        assert_eq!(overlay.fade_state(3), FadeState::FadingOut);
        for _ in 0..60 {
            overlay.tick(1.0 / 60.0);
        }
        assert_eq!(overlay.alpha(3), 0.0);
        assert!(!overlay.any_visible());
    }

    #[test]
    fn frame_samples_every_monitor() {
        let mut overlay = MonitorOverlay::build(&QuietSource, LayoutMode::RightOnly, 1.78).unwrap();
        overlay.frame(&QuietSource, 1.0 / 60.0);
        for draw in overlay.draws() {
            match draw.instr {
                RenderInstr::Bars { values, .. } => assert_eq!(values.len(), 1),
                RenderInstr::Trace { samples } => {
                    assert_eq!(samples.len(), widget::WAVEFORM_WINDOW)
                }
            }
        }
    }
}
