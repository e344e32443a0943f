/*
 *  overlay/widget.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Bar-chart and waveform gauge widgets
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

use log::debug;

use super::color::Rgb;
use super::layout::{AnchorSide, Rect};
use crate::telemetry::{AudioChannel, DmaChannel, MemoryBank, TelemetrySource};

/// Samples a bar chart keeps per series.
pub const BAR_HISTORY: usize = 20;

/// Amplitude samples a waveform gauge shows per frame.
pub const WAVEFORM_WINDOW: usize = 128;

// Input range compressed by the log scale; one frame's bus cycles.
const LOG_SCALE_RANGE: f32 = 255.0;

/// Logarithmic compression applied before a value enters a log-scale
/// gauge's history. Maps 0..=1 onto 0..=1 with low loads expanded so
/// single-digit bus utilization stays visible.
#[inline]
pub fn log_compress(value: f32) -> f32 {
    (1.0 + value.clamp(0.0, 1.0) * LOG_SCALE_RANGE).ln() / (1.0 + LOG_SCALE_RANGE).ln()
}

/// Where a bar chart pulls its per-frame scalar from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarSource {
    Dma(DmaChannel),
    Memory(MemoryBank),
}

/// Fixed-capacity sample history, oldest first.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    values: Vec<f32>,
}

impl BarSeries {
    fn push(&mut self, value: f32) {
        if self.values.len() == BAR_HISTORY {
            self.values.remove(0);
        }
        self.values.push(value);
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Bus-utilization bar gauge.
///
/// `split_view` gauges plot two independent sub-series (reads and writes)
/// sharing one rect split in half along the growth axis; the memory
/// gauges use it, the DMA gauges do not.
#[derive(Debug, Clone)]
pub struct BarChart {
    source: BarSource,
    log_scale: bool,
    split_view: bool,
    primary: BarSeries,
    secondary: BarSeries,
}

impl BarChart {
    pub fn new(source: BarSource, log_scale: bool, split_view: bool) -> Self {
        Self {
            source,
            log_scale,
            split_view,
            primary: BarSeries::default(),
            secondary: BarSeries::default(),
        }
    }

    pub fn log_scale(&self) -> bool {
        self.log_scale
    }

    pub fn split_view(&self) -> bool {
        self.split_view
    }

    fn store(&mut self, primary: f32, secondary: f32) {
        let log_scale = self.log_scale;
        let scale = move |v: f32| if log_scale { log_compress(v) } else { v.clamp(0.0, 1.0) };
        self.primary.push(scale(primary));
        if self.split_view {
            self.secondary.push(scale(secondary));
        }
    }

    /// Pull one fresh scalar (or read/write pair) from the core.
    /// Returns false when the sample was stale.
    fn sample(&mut self, source: &dyn TelemetrySource) -> bool {
        match self.source {
            BarSource::Dma(channel) => match source.dma_load(channel) {
                Some(v) => {
                    self.store(v as f32, 0.0);
                    true
                }
                None => false,
            },
            BarSource::Memory(bank) => match source.memory_load(bank) {
                Some((reads, writes)) => {
                    self.store(reads as f32, writes as f32);
                    true
                }
                None => false,
            },
        }
    }
}

/// Stereo waveform gauge bound to one audio channel.
#[derive(Debug, Clone)]
pub struct Waveform {
    channel: AudioChannel,
    trace: Vec<f32>,
}

impl Waveform {
    pub fn new(channel: AudioChannel) -> Self {
        Self {
            channel,
            trace: vec![0.0; WAVEFORM_WINDOW],
        }
    }

    pub fn channel(&self) -> AudioChannel {
        self.channel
    }

    /// Copy the latest amplitude window from the core. Samples beyond
    /// what the core delivered are zeroed so a short window never leaves
    /// stale tail data in the trace.
    fn sample(&mut self, source: &dyn TelemetrySource) -> bool {
        match source.audio_window(self.channel, &mut self.trace) {
            Some(written) => {
                for v in &mut self.trace[written..] {
                    *v = 0.0;
                }
                true
            }
            None => false,
        }
    }
}

/// The two gauge variants share nothing but position, color, and the
/// per-frame sample step, so they are a plain tagged variant rather
/// than a trait object.
#[derive(Debug, Clone)]
pub enum MonitorKind {
    BarChart(BarChart),
    Waveform(Waveform),
}

/// One activity monitor: a gauge widget plus its placement and color.
///
/// Rect and side are overwritten in place on every layout-triggering
/// event; kind is fixed at construction; color changes only through an
/// explicit palette refresh.
#[derive(Debug, Clone)]
pub struct Monitor {
    name: &'static str,
    kind: MonitorKind,
    color: Rgb,
    rect: Rect,
    side: AnchorSide,
}

/// Variant-specific drawing payload handed to the renderer, alongside
/// the rect/side/color/alpha tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderInstr<'a> {
    /// Bar history, oldest first. `split` carries the second sub-series
    /// of a split-view gauge.
    Bars {
        values: &'a [f32],
        split: Option<&'a [f32]>,
    },
    /// Amplitude trace to plot as a continuous line.
    Trace { samples: &'a [f32] },
}

impl Monitor {
    pub fn bar_chart(
        name: &'static str,
        source: BarSource,
        log_scale: bool,
        split_view: bool,
        color: Rgb,
    ) -> Self {
        Self {
            name,
            kind: MonitorKind::BarChart(BarChart::new(source, log_scale, split_view)),
            color,
            rect: Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 },
            side: AnchorSide::Lower,
        }
    }

    pub fn waveform(name: &'static str, channel: AudioChannel, color: Rgb) -> Self {
        Self {
            name,
            kind: MonitorKind::Waveform(Waveform::new(channel)),
            color,
            rect: Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 },
            side: AnchorSide::Lower,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &MonitorKind {
        &self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn side(&self) -> AnchorSide {
        self.side
    }

    pub fn set_position(&mut self, rect: Rect, side: AnchorSide) {
        self.rect = rect;
        self.side = side;
    }

    /// Pull exactly one fresh metric snapshot from the core. Never
    /// blocks; on a stale frame the previous history/trace is kept and
    /// the miss is logged.
    pub fn sample(&mut self, source: &dyn TelemetrySource) -> bool {
        let fresh = match &mut self.kind {
            MonitorKind::BarChart(chart) => chart.sample(source),
            MonitorKind::Waveform(wave) => wave.sample(source),
        };
        if !fresh {
            debug!("{}: no sample this frame, keeping last data", self.name);
        }
        fresh
    }

    pub fn render_instr(&self) -> RenderInstr<'_> {
        match &self.kind {
            MonitorKind::BarChart(chart) => RenderInstr::Bars {
                values: chart.primary.values(),
                split: chart.split_view.then(|| chart.secondary.values()),
            },
            MonitorKind::Waveform(wave) => RenderInstr::Trace {
                samples: &wave.trace,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::color::DmaColorScheme;

    struct FixedSource {
        dma: Option<f64>,
        memory: Option<(f64, f64)>,
        audio: Option<Vec<f32>>,
    }

    impl TelemetrySource for FixedSource {
        fn dma_colors(&self) -> DmaColorScheme {
            DmaColorScheme::default()
        }
        fn dma_load(&self, _channel: DmaChannel) -> Option<f64> {
            self.dma
        }
        fn memory_load(&self, _bank: MemoryBank) -> Option<(f64, f64)> {
            self.memory
        }
        fn audio_window(&self, _channel: AudioChannel, buf: &mut [f32]) -> Option<usize> {
            let window = self.audio.as_ref()?;
            let n = window.len().min(buf.len());
            buf[..n].copy_from_slice(&window[..n]);
            Some(n)
        }
    }

    #[test]
    fn history_is_bounded() {
        let mut m = Monitor::bar_chart(
            "Disk DMA",
            BarSource::Dma(DmaChannel::Disk),
            false,
            false,
            Rgb::YELLOW,
        );
        let source = FixedSource { dma: Some(0.5), memory: None, audio: None };
        for _ in 0..(BAR_HISTORY * 3) {
            assert!(m.sample(&source));
        }
        match m.render_instr() {
            RenderInstr::Bars { values, split } => {
                assert_eq!(values.len(), BAR_HISTORY);
                assert!(split.is_none());
                assert!(values.iter().all(|v| (*v - 0.5).abs() < 1e-6));
            }
            _ => panic!("expected bars"),
        }
    }

    #[test]
    fn stale_frame_keeps_history() {
        let mut m = Monitor::bar_chart(
            "Audio DMA",
            BarSource::Dma(DmaChannel::Audio),
            false,
            false,
            Rgb::BLUE,
        );
        let live = FixedSource { dma: Some(0.8), memory: None, audio: None };
        let paused = FixedSource { dma: None, memory: None, audio: None };

        assert!(m.sample(&live));
        assert!(!m.sample(&paused));
        match m.render_instr() {
            RenderInstr::Bars { values, .. } => assert_eq!(values, &[0.8]),
            _ => panic!("expected bars"),
        }
    }

    #[test]
    fn split_view_carries_both_series() {
        let mut m = Monitor::bar_chart(
            "CPU (Chip Ram)",
            BarSource::Memory(MemoryBank::Chip),
            false,
            true,
            Rgb::GRAY,
        );
        let source = FixedSource { dma: None, memory: Some((0.25, 0.75)), audio: None };
        assert!(m.sample(&source));
        match m.render_instr() {
            RenderInstr::Bars { values, split } => {
                assert_eq!(values, &[0.25]);
                assert_eq!(split.unwrap(), &[0.75]);
            }
            _ => panic!("expected bars"),
        }
    }

    #[test]
    fn log_compress_is_monotone_and_bounded() {
        assert_eq!(log_compress(0.0), 0.0);
        assert!((log_compress(1.0) - 1.0).abs() < 1e-6);
        let mut last = 0.0;
        for i in 1..=100 {
            let v = log_compress(i as f32 / 100.0);
            assert!(v >= last && v <= 1.0);
            last = v;
        }
        // low loads get expanded
        assert!(log_compress(0.05) > 0.05);
    }

    #[test]
    fn short_audio_window_zeroes_the_tail() {
        let mut m = Monitor::waveform("Left Audio", AudioChannel::Left, Rgb::WHITE);
        let full = FixedSource { dma: None, memory: None, audio: Some(vec![0.9; WAVEFORM_WINDOW]) };
        let short = FixedSource { dma: None, memory: None, audio: Some(vec![0.4; 16]) };

        assert!(m.sample(&full));
        assert!(m.sample(&short));
        match m.render_instr() {
            RenderInstr::Trace { samples } => {
                assert_eq!(samples.len(), WAVEFORM_WINDOW);
                assert!(samples[..16].iter().all(|v| (*v - 0.4).abs() < 1e-6));
                assert!(samples[16..].iter().all(|v| *v == 0.0));
            }
            _ => panic!("expected trace"),
        }
    }
}
