//! Compositor for Burst FX
//! Draws the live pool onto the overlay painter each frame. Per-style draw
//! routines plus the shimmer jitter. Additive-looking glow is approximated by
//! layering premultiplied fills, since the egui painter has no blend-mode
//! switch.

use egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, Vec2};
use rand::{Rng, RngCore};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::particle::Particle;

/// Draw every live particle. A missing painter is the caller's concern: when
/// the surface is unavailable the caller simply skips this and the pool still
/// drains on its own.
pub fn render(particles: &[Particle], painter: &Painter, shimmer_enabled: bool, rng: &mut dyn RngCore) {
    for p in particles {
        let alpha = rendered_alpha(p, shimmer_enabled, rng);
        if alpha < 3 {
            continue;
        }
        let color = Color32::from_rgba_premultiplied(p.color.r(), p.color.g(), p.color.b(), alpha);
        (p.style.behavior().draw)(p, painter, color);
    }
}

/// Resolve the alpha used for this frame only. Shimmering particles get a
/// fresh multiplicative jitter every frame; stored alpha is never touched.
pub fn rendered_alpha(p: &Particle, shimmer_enabled: bool, rng: &mut dyn RngCore) -> u8 {
    let mut alpha = p.alpha;
    if shimmer_enabled && p.shimmer {
        alpha *= rng.gen_range(0.6..1.0);
    }
    alpha.clamp(0.0, 255.0) as u8
}

/// Filled circle with a soft outer glow pass. The shared shape for every
/// style without a dedicated routine.
pub(crate) fn draw_circle(p: &Particle, painter: &Painter, color: Color32) {
    let pos = p.pos.to_pos2();
    let glow_alpha = (color.a() / 3).max(5);
    let glow = Color32::from_rgba_premultiplied(color.r(), color.g(), color.b(), glow_alpha);
    painter.circle_filled(pos, p.size * 1.2, glow);
    painter.circle_filled(pos, p.size, color);
}

/// Gold: a streak trailing back along the velocity.
pub(crate) fn draw_streak(p: &Particle, painter: &Painter, color: Color32) {
    let head = p.pos.to_pos2();
    let tail = (p.pos - p.vel).to_pos2();
    painter.line_segment([head, tail], Stroke::new(p.size, color));
}

/// Quantum: a square that shrinks with the remaining alpha.
pub(crate) fn draw_shrinking_square(p: &Particle, painter: &Painter, color: Color32) {
    let side = p.size * (p.alpha / 255.0);
    if side <= 0.0 {
        return;
    }
    let rect = egui::Rect::from_center_size(p.pos.to_pos2(), Vec2::splat(side));
    painter.rect_filled(rect, 0.0, color);
}

/// Butterfly: two ellipses flapping around the heading.
pub(crate) fn draw_butterfly(p: &Particle, painter: &Painter, color: Color32) {
    let flap = (p.age as f32 * 0.3 + p.phase).sin().abs();
    let w = (p.size * flap).max(0.2);
    let h = p.size;
    let heading = p.vel.y.atan2(p.vel.x) + FRAC_PI_2;
    let (sin, cos) = heading.sin_cos();
    let rotate = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);

    for side in [-1.0_f32, 1.0] {
        let center = p.pos + rotate(Vec2::new(side * w, 0.0));
        let points = ellipse_points(center.to_pos2(), w, h, heading);
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

/// Matrix: a single monospace glyph.
pub(crate) fn draw_glyph(p: &Particle, painter: &Painter, color: Color32) {
    painter.text(
        p.pos.to_pos2(),
        Align2::CENTER_CENTER,
        p.glyph,
        FontId::monospace(p.size),
        color,
    );
}

/// Lightning: polyline from the burst origin through the jittered waypoints.
pub(crate) fn draw_bolt(p: &Particle, painter: &Painter, color: Color32) {
    let mut points: Vec<Pos2> = Vec::with_capacity(p.waypoints.len() + 1);
    points.push(p.origin.to_pos2());
    points.extend(p.waypoints.iter().map(|w| w.to_pos2()));
    painter.add(Shape::line(points, Stroke::new(1.5, color)));
}

/// Confetti: a rotated rectangle squashed by the width factor.
pub(crate) fn draw_confetti(p: &Particle, painter: &Painter, color: Color32) {
    let w = 6.0 * p.width_factor;
    let h = 10.0;
    let (sin, cos) = p.rotation.sin_cos();
    let rotate = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);
    let corners = vec![
        (p.pos + rotate(Vec2::new(-w / 2.0, -h / 2.0))).to_pos2(),
        (p.pos + rotate(Vec2::new(w / 2.0, -h / 2.0))).to_pos2(),
        (p.pos + rotate(Vec2::new(w / 2.0, h / 2.0))).to_pos2(),
        (p.pos + rotate(Vec2::new(-w / 2.0, h / 2.0))).to_pos2(),
    ];
    painter.add(Shape::convex_polygon(corners, color, Stroke::NONE));
}

fn ellipse_points(center: Pos2, rx: f32, ry: f32, rotation: f32) -> Vec<Pos2> {
    const SEGMENTS: usize = 16;
    let (sin, cos) = rotation.sin_cos();
    (0..SEGMENTS)
        .map(|i| {
            let a = i as f32 / SEGMENTS as f32 * TAU;
            let x = a.cos() * rx;
            let y = a.sin() * ry;
            Pos2::new(
                center.x + x * cos - y * sin,
                center.y + x * sin + y * cos,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::BurstStyle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(style: BurstStyle) -> Particle {
        let mut rng = StdRng::seed_from_u64(1);
        Particle::new(Vec2::new(10.0, 10.0), style, 0, style.particle_count(), &mut rng)
    }

    #[test]
    fn test_shimmer_jitters_within_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let p = particle(BurstStyle::Neon);
        assert!(p.shimmer);
        for _ in 0..100 {
            let a = rendered_alpha(&p, true, &mut rng);
            assert!((152..=255).contains(&a), "alpha {a} outside U(0.6,1.0) band");
        }
    }

    #[test]
    fn test_shimmer_leaves_stored_alpha_untouched() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = particle(BurstStyle::Lightning);
        let before = p.alpha;
        rendered_alpha(&p, true, &mut rng);
        assert_eq!(p.alpha, before);
    }

    #[test]
    fn test_matrix_never_shimmers() {
        let mut rng = StdRng::seed_from_u64(4);
        let p = particle(BurstStyle::Matrix);
        for _ in 0..20 {
            assert_eq!(rendered_alpha(&p, true, &mut rng), 255);
        }
    }

    #[test]
    fn test_shimmer_disabled_uses_stored_alpha() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = particle(BurstStyle::Gold);
        assert_eq!(rendered_alpha(&p, false, &mut rng), 255);
    }

    #[test]
    fn test_ellipse_points_are_centered() {
        let pts = ellipse_points(Pos2::new(50.0, 50.0), 4.0, 2.0, 0.7);
        let cx: f32 = pts.iter().map(|p| p.x).sum::<f32>() / pts.len() as f32;
        let cy: f32 = pts.iter().map(|p| p.y).sum::<f32>() / pts.len() as f32;
        assert!((cx - 50.0).abs() < 0.01);
        assert!((cy - 50.0).abs() < 0.01);
    }
}
