/*
 *  bin/overlay-sim.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Runs the overlay engine against a simulated emulation core and logs
 *  what a renderer would draw. Exercises resize, mode cycling, and fades.
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

use std::cell::RefCell;

use anyhow::Context;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use amimon::config;
use amimon::overlay::MonitorOverlay;
use amimon::pacer::Pacer;
use amimon::telemetry::{AudioChannel, DmaChannel, MemoryBank, TelemetrySource};
use amimon::{DmaColorScheme, LayoutMode, RenderInstr};

/// Stand-in for the emulation core: random bus loads, a sine-ish audio
/// signal, and a periodic "paused" phase to exercise the stale path.
struct SimCore {
    rng: RefCell<StdRng>,
    frame: RefCell<u64>,
    paused: RefCell<bool>,
}

impl SimCore {
    fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
            frame: RefCell::new(0),
            paused: RefCell::new(false),
        }
    }

    fn advance(&self) {
        let mut frame = self.frame.borrow_mut();
        *frame += 1;
        // pause for a second out of every five
        *self.paused.borrow_mut() = (*frame / 60) % 5 == 4;
    }
}

impl TelemetrySource for SimCore {
    fn dma_colors(&self) -> DmaColorScheme {
        DmaColorScheme::default()
    }

    fn dma_load(&self, channel: DmaChannel) -> Option<f64> {
        if *self.paused.borrow() {
            return None;
        }
        let base: f64 = match channel {
            DmaChannel::Bitplane => 0.6,
            DmaChannel::Copper => 0.2,
            _ => 0.1,
        };
        Some((base + self.rng.borrow_mut().random_range(0.0..0.3)).min(1.0))
    }

    fn memory_load(&self, _bank: MemoryBank) -> Option<(f64, f64)> {
        if *self.paused.borrow() {
            return None;
        }
        let mut rng = self.rng.borrow_mut();
        Some((rng.random_range(0.0..0.8), rng.random_range(0.0..0.4)))
    }

    fn audio_window(&self, channel: AudioChannel, buf: &mut [f32]) -> Option<usize> {
        if *self.paused.borrow() {
            return None;
        }
        let frame = *self.frame.borrow();
        let phase = if matches!(channel, AudioChannel::Right) { 0.5 } else { 0.0 };
        let len = buf.len();
        for (i, v) in buf.iter_mut().enumerate() {
            let t = (frame as f32 * 0.02) + (i as f32 / len as f32) + phase;
            *v = (t * std::f32::consts::TAU).sin() * 0.8;
        }
        Some(buf.len())
    }
}

fn main() -> anyhow::Result<()> {
    let (cfg, cli) = config::load().context("loading configuration")?;

    let filter = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    let core = SimCore::new(0xA500);
    let mut overlay = MonitorOverlay::build(&core, cfg.layout_mode(), 16.0 / 9.0)
        .context("building monitor overlay")?;
    overlay.set_fade_secs(cfg.fade_secs());

    if cfg.autoshow() {
        overlay.set_all_enabled(true);
    }

    let frames = cli.frames.unwrap_or(600);
    let mut pacer = Pacer::new(cfg.fps());

    info!(
        "simulating {frames} frames at {} fps, layout {}",
        cfg.fps(),
        overlay.mode().as_str()
    );

    let mut n: u64 = 0;
    while n < frames {
        if !pacer.should_tick() {
            pacer.wait();
            continue;
        }
        n += 1;
        core.advance();

        // a resize and a mode change partway through the run
        if n == frames / 3 {
            overlay.resize(4.0 / 3.0)?;
            info!("resized to 4:3");
        }
        if n == frames / 2 {
            let next = LayoutMode::ALL
                [(overlay.mode() as usize + 1) % LayoutMode::ALL.len()];
            overlay.set_layout(next);
        }
        // fade half the set out near the end
        if n == frames * 3 / 4 {
            for i in 0..overlay.len() / 2 {
                overlay.set_enabled(i, false);
            }
            info!("fading out the DMA gauges");
        }

        overlay.frame(&core, pacer.dt());

        if n % 60 == 0 {
            for draw in overlay.draws() {
                let detail = match draw.instr {
                    RenderInstr::Bars { values, split } => format!(
                        "bars last={:.2} split={}",
                        values.last().copied().unwrap_or(0.0),
                        split.is_some()
                    ),
                    RenderInstr::Trace { samples } => {
                        format!("trace n={}", samples.len())
                    }
                };
                info!(
                    "{:<16} rect=({:+.3},{:+.3} {:.3}x{:.3}) side={:?} alpha={:.2} {}",
                    draw.name,
                    draw.rect.x,
                    draw.rect.y,
                    draw.rect.width,
                    draw.rect.height,
                    draw.side,
                    draw.alpha,
                    detail
                );
            }
        }
    }

    info!("done: {n} frames, any_visible={}", overlay.any_visible());
    Ok(())
}
