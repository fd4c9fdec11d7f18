//! Particle physics for Burst FX
//! One record per particle plus the fourteen per-style spawn and update rules.
//! A particle is dead the instant its alpha reaches zero; `update` reports
//! liveness so the pool can drop it before the next render.

use egui::{Color32, Vec2};
use rand::{Rng, RngCore};
use std::f32::consts::{PI, TAU};

use crate::style::BurstStyle;

/// Two-phase state for the `void` style: particles are pulled into the burst
/// origin, then detonate outward. The transition is one-way.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoidPhase {
    Suck,
    Boom,
}

/// Spawn-time parameters shared by every particle of one burst.
pub struct SpawnParams {
    pub origin: Vec2,
    /// Position of this particle within the burst, for parametric styles.
    pub index: usize,
    pub count: usize,
}

/// Individual particle state.
#[derive(Clone, Debug)]
pub struct Particle {
    pub style: BurstStyle,
    pub pos: Vec2,
    /// Burst origin; dna oscillates around it, void collapses into it,
    /// lightning anchors its polyline on it.
    pub origin: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
    pub drag: f32,
    pub size: f32,
    pub color: Color32,
    pub alpha: f32,
    pub decay: f32,
    pub age: u32,
    // Style extras; only meaningful for the styles that set them.
    pub phase: f32,
    pub amplitude: f32,
    pub glyph: char,
    pub rotation: f32,
    pub spin: f32,
    pub width_factor: f32,
    pub waypoints: Vec<Vec2>,
    pub void_phase: VoidPhase,
    pub shimmer: bool,
    pub shimmer_rate: f32,
}

impl Particle {
    /// Construct one particle of a burst. Base fields are set to the shared
    /// defaults, then the style's init rule specialises them.
    pub fn new(
        origin: Vec2,
        style: BurstStyle,
        index: usize,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut p = Self {
            style,
            pos: origin,
            origin,
            vel: Vec2::ZERO,
            gravity: 0.0,
            drag: 0.92,
            size: rng.gen_range(1.5..3.5),
            color: Color32::WHITE,
            alpha: 255.0,
            decay: 4.0,
            age: 0,
            phase: 0.0,
            amplitude: 0.0,
            glyph: ' ',
            rotation: 0.0,
            spin: 0.0,
            width_factor: 1.0,
            waypoints: Vec::new(),
            void_phase: VoidPhase::Suck,
            shimmer: true,
            shimmer_rate: rng.gen_range(0.3..0.8),
        };
        let params = SpawnParams { origin, index, count };
        (style.behavior().init)(&mut p, &params, rng);
        p
    }

    /// Advance one tick. Returns whether the particle is still alive.
    pub fn update(&mut self, rng: &mut dyn RngCore) -> bool {
        (self.style.behavior().update)(self, rng)
    }
}

fn polar(rng: &mut dyn RngCore, angle_range: std::ops::Range<f32>, speed_range: std::ops::Range<f32>) -> Vec2 {
    let angle = rng.gen_range(angle_range);
    let speed = rng.gen_range(speed_range);
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

fn random_hue(rng: &mut dyn RngCore, saturation: f32) -> Color32 {
    let hsva = egui::ecolor::Hsva::new(rng.gen::<f32>(), saturation, 1.0, 1.0);
    Color32::from(hsva)
}

// ---------------------------------------------------------------------------
// Spawn rules
// ---------------------------------------------------------------------------

/// Shared rule for neon, gold and quantum: a plain radial burst.
pub(crate) fn init_default(p: &mut Particle, _params: &SpawnParams, rng: &mut dyn RngCore) {
    p.vel = polar(rng, 0.0..TAU, 1.0..5.0);
    p.gravity = 0.15;
    if p.style == BurstStyle::Gold {
        p.color = Color32::from_rgb(255, 235, 100);
        p.gravity = 0.25;
    } else {
        p.color = random_hue(rng, 220.0 / 255.0);
    }
}

pub(crate) fn init_butterfly(p: &mut Particle, _params: &SpawnParams, rng: &mut dyn RngCore) {
    p.vel = polar(rng, 0.0..TAU, 1.0..3.0);
    p.gravity = 0.01;
    p.drag = 0.96;
    p.color = random_hue(rng, 220.0 / 255.0);
    p.size = rng.gen_range(3.0..5.0);
    p.decay = 2.0;
    p.phase = rng.gen_range(0.0..PI);
}

pub(crate) fn init_matrix(p: &mut Particle, _params: &SpawnParams, rng: &mut dyn RngCore) {
    const GLYPHS: [char; 7] = ['0', '1', 'C', 'O', 'P', 'Y', 'X'];
    p.glyph = GLYPHS[rng.gen_range(0..GLYPHS.len())];
    p.vel.y = rng.gen_range(3.0..6.0);
    p.color = Color32::from_rgb(0, 255, 70);
    p.size = rng.gen_range(8..=12) as f32;
    p.decay = 5.0;
    // Code rain stays crisp; no flicker.
    p.shimmer = false;
}

pub(crate) fn init_dna(p: &mut Particle, params: &SpawnParams, rng: &mut dyn RngCore) {
    p.vel.y = -rng.gen_range(1.0..3.0);
    p.phase = (params.index as f32 / params.count as f32) * 4.0 * PI;
    p.amplitude = rng.gen_range(10.0..15.0);
    p.decay = 3.0;
    // Alternating strands.
    p.color = if params.index % 2 == 0 {
        Color32::from_rgb(0, 200, 255)
    } else {
        Color32::from_rgb(255, 0, 150)
    };
}

pub(crate) fn init_lightning(p: &mut Particle, params: &SpawnParams, rng: &mut dyn RngCore) {
    let angle = rng.gen_range(0.0..TAU);
    let dist = rng.gen_range(20.0..60.0);
    let target = params.origin + Vec2::new(angle.cos() * dist, angle.sin() * dist);
    let steps = 4;
    p.waypoints = (1..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            params.origin
                + (target - params.origin) * t
                + Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0))
        })
        .collect();
    p.color = Color32::from_rgb(220, 220, 255);
    p.decay = 20.0;
    p.shimmer = true;
}

pub(crate) fn init_confetti(p: &mut Particle, _params: &SpawnParams, rng: &mut dyn RngCore) {
    p.vel = polar(rng, 0.0..TAU, 2.0..6.0);
    p.gravity = 0.2;
    p.drag = 0.92;
    p.spin = rng.gen_range(-0.2..0.2);
    p.color = random_hue(rng, 200.0 / 255.0);
    p.size = rng.gen_range(4.0..7.0);
}

pub(crate) fn init_void(p: &mut Particle, params: &SpawnParams, rng: &mut dyn RngCore) {
    let angle = rng.gen_range(0.0..TAU);
    let dist = rng.gen_range(40.0..80.0);
    p.pos = params.origin + Vec2::new(angle.cos() * dist, angle.sin() * dist);
    p.vel = (params.origin - p.pos) * 0.15;
    p.color = Color32::from_rgb(150, 0, 255);
    p.decay = 0.0;
    p.void_phase = VoidPhase::Suck;
}

pub(crate) fn init_heart(p: &mut Particle, params: &SpawnParams, rng: &mut dyn RngCore) {
    let t = (params.index as f32 / params.count as f32) * TAU;
    let scale = rng.gen_range(1.0..1.8);
    p.vel.x = 16.0 * t.sin().powi(3) * 0.1 * scale;
    p.vel.y = -(13.0 * t.cos()
        - 5.0 * (2.0 * t).cos()
        - 2.0 * (3.0 * t).cos()
        - (4.0 * t).cos())
        * 0.1
        * scale;
    p.gravity = 0.02;
    p.color = Color32::from_rgb(255, 80, 150);
    p.decay = 3.0;
}

pub(crate) fn init_galaxy(p: &mut Particle, params: &SpawnParams, rng: &mut dyn RngCore) {
    let arm = (params.index % 3) as f32;
    let angle = arm * 2.09 + params.index as f32 / params.count as f32 + rng.gen_range(-0.2..0.2);
    let speed = rng.gen_range(1.0..3.0);
    p.vel = Vec2::new(angle.cos() * speed, angle.sin() * speed);
    let hue = rng.gen_range(200.0..300.0) / 360.0;
    p.color = Color32::from(egui::ecolor::Hsva::new(hue, 220.0 / 255.0, 1.0, 1.0));
    p.decay = 4.0;
}

pub(crate) fn init_frozen(p: &mut Particle, _params: &SpawnParams, rng: &mut dyn RngCore) {
    p.vel = polar(rng, 0.0..TAU, 5.0..12.0);
    p.gravity = 0.05;
    p.drag = 0.80;
    p.color = Color32::from_rgb(200, 255, 255);
    p.decay = 5.0;
}

pub(crate) fn init_phoenix(p: &mut Particle, _params: &SpawnParams, rng: &mut dyn RngCore) {
    // Downward-biased cone; negative gravity makes the embers rise.
    p.vel = polar(rng, (PI + 0.5)..(TAU - 0.5), 1.0..4.0);
    p.gravity = -0.1;
    p.color = Color32::from_rgb(255, rng.gen_range(150..=255), 50);
    p.decay = 4.0;
}

pub(crate) fn init_chaos(p: &mut Particle, _params: &SpawnParams, rng: &mut dyn RngCore) {
    p.vel = Vec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
    p.drag = 0.98;
    p.color = Color32::from_rgb(255, 50, 50);
    p.decay = 6.0;
}

// ---------------------------------------------------------------------------
// Update rules
// ---------------------------------------------------------------------------

fn integrate(p: &mut Particle) {
    p.pos += p.vel;
    p.vel.y += p.gravity;
    p.vel *= p.drag;
}

/// Standard integrator shared by every style that does not override it.
pub(crate) fn update_default(p: &mut Particle, _rng: &mut dyn RngCore) -> bool {
    integrate(p);
    p.alpha -= p.decay;
    p.age += 1;
    p.alpha > 0.0
}

pub(crate) fn update_butterfly(p: &mut Particle, _rng: &mut dyn RngCore) -> bool {
    integrate(p);
    // Lateral flutter on top of the ballistic path.
    p.pos.x += (p.age as f32 * 0.2 + p.phase).sin() * 0.8;
    p.alpha -= p.decay;
    p.age += 1;
    p.alpha > 0.0
}

pub(crate) fn update_matrix(p: &mut Particle, _rng: &mut dyn RngCore) -> bool {
    p.pos.y += p.vel.y;
    p.alpha -= p.decay;
    p.age += 1;
    p.alpha > 0.0
}

pub(crate) fn update_dna(p: &mut Particle, _rng: &mut dyn RngCore) -> bool {
    p.pos.y += p.vel.y;
    p.age += 1;
    let offset = (p.pos.y * 0.05 + p.phase).sin() * p.amplitude;
    p.pos.x = p.origin.x + offset;
    // Front strand bright, back strand dim; a two-level function of the
    // oscillation sign rather than a decay ramp.
    p.alpha = if offset > 0.0 { 255.0 } else { 100.0 };
    if p.age > 60 {
        p.alpha = 0.0;
    }
    p.alpha > 0.0
}

pub(crate) fn update_lightning(p: &mut Particle, _rng: &mut dyn RngCore) -> bool {
    p.alpha -= p.decay;
    p.age += 1;
    p.alpha > 0.0
}

pub(crate) fn update_confetti(p: &mut Particle, _rng: &mut dyn RngCore) -> bool {
    integrate(p);
    p.rotation += p.spin;
    p.width_factor = p.rotation.cos().abs();
    p.alpha -= 2.0;
    p.age += 1;
    p.alpha > 0.0
}

pub(crate) fn update_void(p: &mut Particle, rng: &mut dyn RngCore) -> bool {
    match p.void_phase {
        VoidPhase::Suck => {
            p.pos += p.vel;
            if (p.pos - p.origin).length() < 5.0 {
                p.void_phase = VoidPhase::Boom;
                p.vel = polar(rng, 0.0..TAU, 2.0..8.0);
                p.color = Color32::WHITE;
            }
        }
        VoidPhase::Boom => {
            p.pos += p.vel;
            p.alpha -= 5.0;
        }
    }
    p.age += 1;
    p.alpha > 0.0
}

pub(crate) fn update_phoenix(p: &mut Particle, _rng: &mut dyn RngCore) -> bool {
    integrate(p);
    // Embers cool from yellow toward red.
    if p.age > 10 && p.color.g() > 50 {
        p.color = Color32::from_rgb(p.color.r(), p.color.g() - 5, p.color.b());
    }
    p.alpha -= p.decay;
    p.age += 1;
    p.alpha > 0.0
}
