//! Burst FX - trigger-driven particle burst overlay
//! A transparent, always-on-top, click-through surface that fires short-lived
//! particle bursts wherever an external trigger points. The surface shows
//! itself on the first live particle and hides again once the burst decays.

mod clock;
mod compositor;
mod config;
mod engine;
mod particle;
mod style;
mod trigger;

use std::io::BufRead;
use std::time::Instant;

use crossbeam_channel::Receiver;
use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use clock::SimulationClock;
use config::AppConfig;
use engine::ParticleEngine;
use trigger::{Burst, TriggerEvent, TriggerHandle};

struct BurstApp {
    config: AppConfig,
    engine: ParticleEngine,
    clock: SimulationClock,
    rng: StdRng,
    trigger_rx: Receiver<TriggerEvent>,
    surface_visible: bool,
}

impl BurstApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load_or_default(config::CONFIG_FILE);
        if !std::path::Path::new(config::CONFIG_FILE).exists() {
            if let Err(err) = config.save(config::CONFIG_FILE) {
                tracing::debug!(%err, "default config not written");
            }
        }
        info!(tick_ms = config.tick_ms, "overlay ready");

        let (handle, trigger_rx) = trigger::channel(cc.egui_ctx.clone());
        spawn_stdin_trigger(handle);

        let clock = SimulationClock::new(std::time::Duration::from_millis(config.tick_ms));
        let engine = ParticleEngine::with_max_pool(config.max_pool);

        Self {
            config,
            engine,
            clock,
            rng: StdRng::from_entropy(),
            trigger_rx,
            surface_visible: false,
        }
    }

    fn fire_burst(&mut self, burst: Burst, ctx: &egui::Context) {
        let style = burst.style.or(self.config.forced_style);
        let spawned = self.engine.explode(burst.origin, style, &mut self.rng);
        if spawned > 0 {
            self.clock.start(Instant::now());
            self.set_surface_visible(ctx, true);
        }
    }

    /// Show or hide the one long-lived overlay surface. Never recreated; a
    /// fresh window per burst would pay the surface allocation every time.
    fn set_surface_visible(&mut self, ctx: &egui::Context, visible: bool) {
        if self.surface_visible != visible {
            self.surface_visible = visible;
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(visible));
        }
    }
}

impl eframe::App for BurstApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Hand-offs from detection threads land here, on the render thread.
        while let Ok(event) = self.trigger_rx.try_recv() {
            if let Some(burst) = event.validate() {
                self.fire_burst(burst, ctx);
            }
        }

        let ticks = self.clock.advance(Instant::now());
        for _ in 0..ticks {
            self.engine.tick(&mut self.rng);
        }

        if self.clock.is_running() && self.engine.is_empty() {
            // Natural decay is the sole termination condition.
            self.clock.stop();
            self.set_surface_visible(ctx, false);
            info!("pool drained, overlay hidden");
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::TRANSPARENT))
            .show(ctx, |ui| {
                compositor::render(
                    self.engine.particles(),
                    ui.painter(),
                    self.config.shimmer_enabled,
                    &mut self.rng,
                );
            });

        if self.clock.is_running() {
            ctx.request_repaint_after(self.clock.period());
        }
        // Idle: sleep until a TriggerHandle wakes us.
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

/// Minimal demo host: reads `x y [style]` lines from stdin and fires them as
/// triggers. Real detection components (clipboard watchers etc.) use the same
/// `TriggerHandle` from their own threads.
fn spawn_stdin_trigger(handle: TriggerHandle) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let x = parts.next().and_then(|s| s.parse::<f32>().ok());
            let y = parts.next().and_then(|s| s.parse::<f32>().ok());
            let style_hint = parts.next().map(str::to_string);
            let pos = match (x, y) {
                (Some(x), Some(y)) => Some((x, y)),
                _ => None,
            };
            handle.fire(TriggerEvent { pos, style_hint });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::BurstStyle;
    use std::time::Duration;

    // Clock/pool interplay without a window: the clock must stop exactly when
    // the pool drains and restart on the next burst.
    #[test]
    fn test_clock_follows_pool_occupancy() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut engine = ParticleEngine::new();
        let mut clock = SimulationClock::new(Duration::from_millis(16));
        let t0 = Instant::now();

        engine.explode(egui::Vec2::new(100.0, 100.0), Some(BurstStyle::Lightning), &mut rng);
        clock.start(t0);
        assert!(clock.is_running());

        let mut now = t0;
        let mut frames = 0;
        while !engine.is_empty() {
            now += Duration::from_millis(16);
            for _ in 0..clock.advance(now) {
                engine.tick(&mut rng);
            }
            frames += 1;
            assert!(frames < 100);
        }
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.advance(now + Duration::from_secs(1)), 0);

        // Next burst restarts the cadence.
        engine.explode(egui::Vec2::new(50.0, 50.0), Some(BurstStyle::Matrix), &mut rng);
        clock.start(now + Duration::from_secs(2));
        assert!(clock.is_running());
        assert_eq!(engine.len(), 15);
    }

    #[test]
    fn test_forced_style_override_applies() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut engine = ParticleEngine::new();
        let config = AppConfig {
            forced_style: Some(BurstStyle::Heart),
            ..Default::default()
        };
        // Trigger without a hint: forced style wins over random.
        let style = None.or(config.forced_style);
        engine.explode(egui::Vec2::ZERO, style, &mut rng);
        assert_eq!(engine.len(), 60);
        assert!(engine.particles().iter().all(|p| p.style == BurstStyle::Heart));
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_transparent(true)
            .with_decorations(false)
            .with_always_on_top()
            .with_mouse_passthrough(true)
            .with_fullscreen(true)
            .with_visible(false),
        vsync: false,
        ..Default::default()
    };

    eframe::run_native(
        "Burst FX",
        options,
        Box::new(|cc| Box::new(BurstApp::new(cc))),
    )
}
