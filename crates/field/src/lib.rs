#![deny(unsafe_code)]
//! Particle field simulation for the drift ambient background.
//!
//! A [`ParticleField`] owns a collection of drifting points sized to the
//! surface area. Each tick moves every particle by its constant velocity,
//! wraps coordinates toroidally into `[0, dimension)`, and sways opacity
//! with a time- and position-seeded sine. [`ParticleField::connections`]
//! yields the particle pairs close enough to be joined by a line.
//!
//! The field is deterministic per seed: two fields built with the same seed
//! and parameters produce identical particles through any number of reseeds.

use drift_core::params::{param_f64, param_usize};
use drift_core::{Hsl, Srgb, Xorshift64Star};
use glam::DVec2;
use serde_json::{json, Value};

/// Default divisor mapping surface area to particle count.
const DEFAULT_DENSITY_DIVISOR: f64 = 15_000.0;
/// Default hard cap on particle count, keeping the O(n²) pair scan cheap.
const DEFAULT_MAX_PARTICLES: usize = 100;
/// Default magnitude bound for each velocity component.
const DEFAULT_SPEED_LIMIT: f64 = 1.5;
/// Default minimum particle radius.
const DEFAULT_RADIUS_MIN: f64 = 1.0;
/// Default width of the radius range above the minimum.
const DEFAULT_RADIUS_SPAN: f64 = 3.0;
/// Default lower opacity clamp.
const DEFAULT_OPACITY_MIN: f64 = 0.1;
/// Default upper opacity clamp.
const DEFAULT_OPACITY_MAX: f64 = 0.7;
/// Default lower bound of the opacity range sampled at spawn.
const DEFAULT_SPAWN_OPACITY_MIN: f64 = 0.2;
/// Default low end of the hue range in degrees.
const DEFAULT_HUE_MIN: f64 = 220.0;
/// Default width of the hue range in degrees.
const DEFAULT_HUE_SPAN: f64 = 60.0;
/// Default HSL saturation for all particles.
const DEFAULT_SATURATION: f64 = 0.7;
/// Default HSL lightness for all particles.
const DEFAULT_LIGHTNESS: f64 = 0.6;
/// Default time coefficient of the opacity sway, per second.
const DEFAULT_SHIMMER_TIME_SCALE: f64 = 1.0;
/// Default x-position coefficient of the opacity sway.
const DEFAULT_SHIMMER_SPACE_SCALE: f64 = 0.01;
/// Default per-tick opacity sway amplitude.
const DEFAULT_SHIMMER_AMPLITUDE: f64 = 0.01;

/// One simulated point.
///
/// Velocity, radius, and color are fixed at spawn; position and opacity
/// evolve every tick. Particles only come into existence during a reseed
/// and are discarded wholesale by the next one.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Position in `[0, width) × [0, height)` after every tick.
    pub position: DVec2,
    /// Constant velocity in surface units per tick.
    pub velocity: DVec2,
    /// Fixed draw radius.
    pub radius: f64,
    /// Current opacity, clamped to the configured range each tick.
    pub opacity: f64,
    /// Fixed color sampled from the configured hue range.
    pub color: Srgb,
}

/// Tuning parameters for a [`ParticleField`].
///
/// [`Default`] reproduces the canonical ambient look: up to 100 indigo
/// particles, one per 15000 square units of surface.
#[derive(Debug, Clone, Copy)]
pub struct FieldParams {
    /// Surface area divided by this yields the particle count.
    pub density_divisor: f64,
    /// Hard cap on particle count. The pair scan is O(n²); this keeps it
    /// tractable at interactive frame rates.
    pub max_particles: usize,
    /// Velocity components are sampled uniformly from `[-limit, limit)`.
    pub speed_limit: f64,
    /// Minimum spawn radius.
    pub radius_min: f64,
    /// Radii are sampled from `[radius_min, radius_min + radius_span)`.
    pub radius_span: f64,
    /// Lower opacity clamp applied every tick.
    pub opacity_min: f64,
    /// Upper opacity clamp applied every tick.
    pub opacity_max: f64,
    /// Spawn opacity is sampled from `[spawn_opacity_min, opacity_max)`.
    pub spawn_opacity_min: f64,
    /// Low end of the spawn hue range in degrees.
    pub hue_min: f64,
    /// Hues are sampled from `[hue_min, hue_min + hue_span)`.
    pub hue_span: f64,
    /// HSL saturation shared by all particles.
    pub saturation: f64,
    /// HSL lightness shared by all particles.
    pub lightness: f64,
    /// Time coefficient of the opacity sway, per second.
    pub shimmer_time_scale: f64,
    /// X-position coefficient of the opacity sway.
    pub shimmer_space_scale: f64,
    /// Per-tick opacity sway amplitude.
    pub shimmer_amplitude: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            density_divisor: DEFAULT_DENSITY_DIVISOR,
            max_particles: DEFAULT_MAX_PARTICLES,
            speed_limit: DEFAULT_SPEED_LIMIT,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_span: DEFAULT_RADIUS_SPAN,
            opacity_min: DEFAULT_OPACITY_MIN,
            opacity_max: DEFAULT_OPACITY_MAX,
            spawn_opacity_min: DEFAULT_SPAWN_OPACITY_MIN,
            hue_min: DEFAULT_HUE_MIN,
            hue_span: DEFAULT_HUE_SPAN,
            saturation: DEFAULT_SATURATION,
            lightness: DEFAULT_LIGHTNESS,
            shimmer_time_scale: DEFAULT_SHIMMER_TIME_SCALE,
            shimmer_space_scale: DEFAULT_SHIMMER_SPACE_SCALE,
            shimmer_amplitude: DEFAULT_SHIMMER_AMPLITUDE,
        }
    }
}

impl FieldParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            density_divisor: param_f64(params, "density_divisor", DEFAULT_DENSITY_DIVISOR),
            max_particles: param_usize(params, "max_particles", DEFAULT_MAX_PARTICLES),
            speed_limit: param_f64(params, "speed_limit", DEFAULT_SPEED_LIMIT),
            radius_min: param_f64(params, "radius_min", DEFAULT_RADIUS_MIN),
            radius_span: param_f64(params, "radius_span", DEFAULT_RADIUS_SPAN),
            opacity_min: param_f64(params, "opacity_min", DEFAULT_OPACITY_MIN),
            opacity_max: param_f64(params, "opacity_max", DEFAULT_OPACITY_MAX),
            spawn_opacity_min: param_f64(params, "spawn_opacity_min", DEFAULT_SPAWN_OPACITY_MIN),
            hue_min: param_f64(params, "hue_min", DEFAULT_HUE_MIN),
            hue_span: param_f64(params, "hue_span", DEFAULT_HUE_SPAN),
            saturation: param_f64(params, "saturation", DEFAULT_SATURATION),
            lightness: param_f64(params, "lightness", DEFAULT_LIGHTNESS),
            shimmer_time_scale: param_f64(params, "shimmer_time_scale", DEFAULT_SHIMMER_TIME_SCALE),
            shimmer_space_scale: param_f64(
                params,
                "shimmer_space_scale",
                DEFAULT_SHIMMER_SPACE_SCALE,
            ),
            shimmer_amplitude: param_f64(params, "shimmer_amplitude", DEFAULT_SHIMMER_AMPLITUDE),
        }
    }

    /// Current parameter values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "density_divisor": self.density_divisor,
            "max_particles": self.max_particles,
            "speed_limit": self.speed_limit,
            "radius_min": self.radius_min,
            "radius_span": self.radius_span,
            "opacity_min": self.opacity_min,
            "opacity_max": self.opacity_max,
            "spawn_opacity_min": self.spawn_opacity_min,
            "hue_min": self.hue_min,
            "hue_span": self.hue_span,
            "saturation": self.saturation,
            "lightness": self.lightness,
            "shimmer_time_scale": self.shimmer_time_scale,
            "shimmer_space_scale": self.shimmer_space_scale,
            "shimmer_amplitude": self.shimmer_amplitude,
        })
    }

    /// Schema describing the parameters, their ranges, and defaults.
    pub fn schema() -> Value {
        json!({
            "density_divisor": {
                "type": "number",
                "default": DEFAULT_DENSITY_DIVISOR,
                "min": 1000.0,
                "max": 100000.0,
                "description": "Surface area per particle"
            },
            "max_particles": {
                "type": "integer",
                "default": DEFAULT_MAX_PARTICLES,
                "min": 0,
                "max": 1000,
                "description": "Hard cap on particle count"
            },
            "speed_limit": {
                "type": "number",
                "default": DEFAULT_SPEED_LIMIT,
                "min": 0.0,
                "max": 10.0,
                "description": "Velocity component bound, units per tick"
            },
            "radius_min": {
                "type": "number",
                "default": DEFAULT_RADIUS_MIN,
                "min": 0.0,
                "max": 10.0,
                "description": "Minimum particle radius"
            },
            "radius_span": {
                "type": "number",
                "default": DEFAULT_RADIUS_SPAN,
                "min": 0.0,
                "max": 10.0,
                "description": "Radius range width above the minimum"
            },
            "opacity_min": {
                "type": "number",
                "default": DEFAULT_OPACITY_MIN,
                "min": 0.0,
                "max": 1.0,
                "description": "Lower opacity clamp"
            },
            "opacity_max": {
                "type": "number",
                "default": DEFAULT_OPACITY_MAX,
                "min": 0.0,
                "max": 1.0,
                "description": "Upper opacity clamp"
            },
            "spawn_opacity_min": {
                "type": "number",
                "default": DEFAULT_SPAWN_OPACITY_MIN,
                "min": 0.0,
                "max": 1.0,
                "description": "Lower bound of the spawn opacity range"
            },
            "hue_min": {
                "type": "number",
                "default": DEFAULT_HUE_MIN,
                "min": 0.0,
                "max": 360.0,
                "description": "Low end of the hue range in degrees"
            },
            "hue_span": {
                "type": "number",
                "default": DEFAULT_HUE_SPAN,
                "min": 0.0,
                "max": 360.0,
                "description": "Hue range width in degrees"
            },
            "saturation": {
                "type": "number",
                "default": DEFAULT_SATURATION,
                "min": 0.0,
                "max": 1.0,
                "description": "HSL saturation shared by all particles"
            },
            "lightness": {
                "type": "number",
                "default": DEFAULT_LIGHTNESS,
                "min": 0.0,
                "max": 1.0,
                "description": "HSL lightness shared by all particles"
            },
            "shimmer_time_scale": {
                "type": "number",
                "default": DEFAULT_SHIMMER_TIME_SCALE,
                "min": 0.0,
                "max": 10.0,
                "description": "Opacity sway time coefficient, per second"
            },
            "shimmer_space_scale": {
                "type": "number",
                "default": DEFAULT_SHIMMER_SPACE_SCALE,
                "min": 0.0,
                "max": 1.0,
                "description": "Opacity sway x-position coefficient"
            },
            "shimmer_amplitude": {
                "type": "number",
                "default": DEFAULT_SHIMMER_AMPLITUDE,
                "min": 0.0,
                "max": 0.5,
                "description": "Per-tick opacity sway amplitude"
            }
        })
    }
}

/// A proximity pair yielded by [`ParticleField::connections`].
#[derive(Debug, Clone, Copy)]
pub struct Connection {
    /// Position of the first endpoint.
    pub a: DVec2,
    /// Position of the second endpoint.
    pub b: DVec2,
    /// Euclidean distance between the endpoints, strictly below the query threshold.
    pub distance: f64,
}

/// The full collection of particles plus the reseed/advance/connections
/// operations over them.
pub struct ParticleField {
    particles: Vec<Particle>,
    params: FieldParams,
    rng: Xorshift64Star,
}

impl ParticleField {
    /// Creates an empty field. Particles appear on the first [`reseed`](Self::reseed).
    pub fn new(params: FieldParams, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            params,
            rng: Xorshift64Star::new(seed),
        }
    }

    /// The particle count a reseed would produce for the given dimensions:
    /// `min(max_particles, floor(width * height / density_divisor))`.
    ///
    /// Always recomputed from the area, never adjusted incrementally.
    pub fn target_count(&self, width: f64, height: f64) -> usize {
        let by_area = (width * height / self.params.density_divisor).floor();
        let by_area = if by_area.is_finite() && by_area > 0.0 {
            by_area as usize
        } else if by_area.is_infinite() && by_area > 0.0 {
            usize::MAX
        } else {
            0
        };
        by_area.min(self.params.max_particles)
    }

    /// Replaces the entire particle collection with a freshly sampled set.
    ///
    /// Positions are uniform over the surface; velocity, radius, opacity,
    /// and hue are sampled from the configured ranges. No particle state
    /// survives a reseed.
    pub fn reseed(&mut self, width: f64, height: f64) {
        let count = self.target_count(width, height);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = spawn_particle(&mut self.rng, &self.params, width, height);
            self.particles.push(particle);
        }
        log::debug!("reseeded field: {count} particles for {width}x{height}");
    }

    /// Advances every particle by one tick.
    ///
    /// Position moves by velocity and wraps toroidally into
    /// `[0, width) × [0, height)` — a teleport to the opposite side, never a
    /// bounce. Opacity sways by `sin(now·k1 + x·k2)·k3` and is clamped to
    /// the configured range. `now` is monotonic time in seconds.
    pub fn advance(&mut self, width: f64, height: f64, now: f64) {
        let p = &self.params;
        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.position.x = wrap(particle.position.x, width);
            particle.position.y = wrap(particle.position.y, height);

            let sway = (now * p.shimmer_time_scale
                + particle.position.x * p.shimmer_space_scale)
                .sin()
                * p.shimmer_amplitude;
            particle.opacity = (particle.opacity + sway).clamp(p.opacity_min, p.opacity_max);
        }
    }

    /// Lazily yields every unordered particle pair closer than `max_distance`.
    ///
    /// Each of the `n·(n−1)/2` pairs is considered exactly once; pairs at or
    /// beyond the threshold are filtered out, not yielded with zero weight.
    /// This scan is O(n²) in the particle count — [`FieldParams::max_particles`]
    /// exists precisely to keep it affordable every frame.
    pub fn connections(&self, max_distance: f64) -> Connections<'_> {
        Connections {
            particles: &self.particles,
            max_distance,
            i: 0,
            j: 1,
        }
    }

    /// Read-only access to the particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current particle count.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true when the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The field's tuning parameters.
    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}

/// Lazy iterator over proximity pairs. See [`ParticleField::connections`].
pub struct Connections<'a> {
    particles: &'a [Particle],
    max_distance: f64,
    i: usize,
    j: usize,
}

impl Iterator for Connections<'_> {
    type Item = Connection;

    fn next(&mut self) -> Option<Connection> {
        while self.i < self.particles.len() {
            while self.j < self.particles.len() {
                let a = &self.particles[self.i];
                let b = &self.particles[self.j];
                self.j += 1;
                let distance = a.position.distance(b.position);
                if distance < self.max_distance {
                    return Some(Connection {
                        a: a.position,
                        b: b.position,
                        distance,
                    });
                }
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}

/// Samples one particle from the configured ranges.
fn spawn_particle(
    rng: &mut Xorshift64Star,
    params: &FieldParams,
    width: f64,
    height: f64,
) -> Particle {
    let position = DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height));
    let velocity = DVec2::new(
        rng.next_range(-params.speed_limit, params.speed_limit),
        rng.next_range(-params.speed_limit, params.speed_limit),
    );
    let radius = rng.next_range(params.radius_min, params.radius_min + params.radius_span);
    let opacity = rng.next_range(params.spawn_opacity_min, params.opacity_max);
    let hue = rng.next_range(params.hue_min, params.hue_min + params.hue_span);
    Particle {
        position,
        velocity,
        radius,
        opacity,
        color: Hsl::new(hue, params.saturation, params.lightness).to_srgb(),
    }
}

/// Folds a coordinate into `[0, extent)`.
///
/// `rem_euclid` alone can return `extent` itself when the input is a tiny
/// negative value, so the result is guarded to keep the half-open invariant.
fn wrap(value: f64, extent: f64) -> f64 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_particle(x: f64, y: f64) -> Particle {
        Particle {
            position: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            radius: 2.0,
            opacity: 0.5,
            color: Srgb {
                r: 0.4,
                g: 0.4,
                b: 0.9,
            },
        }
    }

    fn field_with(particles: Vec<Particle>) -> ParticleField {
        ParticleField {
            particles,
            params: FieldParams::default(),
            rng: Xorshift64Star::new(1),
        }
    }

    // ── Reseed sizing ──────────────────────────────────────────────

    #[test]
    fn reseed_count_matches_area_formula() {
        // floor(300 * 200 / 15000) = 4
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(300.0, 200.0);
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn reseed_count_is_capped() {
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(10_000.0, 10_000.0);
        assert_eq!(field.len(), 100);
    }

    #[test]
    fn reseed_on_tiny_surface_yields_no_particles() {
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(50.0, 50.0);
        assert!(field.is_empty());
    }

    #[test]
    fn target_count_recomputes_from_current_area() {
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(10_000.0, 10_000.0);
        assert_eq!(field.len(), 100);
        field.reseed(300.0, 200.0);
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn reseed_replaces_all_particles() {
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(1920.0, 1080.0);
        let before: Vec<DVec2> = field.particles().iter().map(|p| p.position).collect();
        field.reseed(1920.0, 1080.0);
        let after: Vec<DVec2> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before.len(), after.len());
        assert!(
            before.iter().zip(&after).any(|(a, b)| a != b),
            "reseed kept the previous particle set"
        );
    }

    #[test]
    fn spawned_particles_are_within_configured_ranges() {
        let params = FieldParams::default();
        let mut field = ParticleField::new(params, 7);
        field.reseed(1920.0, 1080.0);
        assert!(!field.is_empty());
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 1920.0);
            assert!(p.position.y >= 0.0 && p.position.y < 1080.0);
            assert!(p.velocity.x >= -1.5 && p.velocity.x < 1.5);
            assert!(p.velocity.y >= -1.5 && p.velocity.y < 1.5);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
            assert!(p.opacity >= 0.2 && p.opacity < 0.7);
        }
    }

    #[test]
    fn determinism_same_seed_same_particles() {
        let mut a = ParticleField::new(FieldParams::default(), 99);
        let mut b = ParticleField::new(FieldParams::default(), 99);
        a.reseed(800.0, 600.0);
        b.reseed(800.0, 600.0);
        for _ in 0..10 {
            a.advance(800.0, 600.0, 0.5);
            b.advance(800.0, 600.0, 0.5);
        }
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position.x.to_bits(), pb.position.x.to_bits());
            assert_eq!(pa.position.y.to_bits(), pb.position.y.to_bits());
            assert_eq!(pa.opacity.to_bits(), pb.opacity.to_bits());
        }
    }

    // ── Advance ────────────────────────────────────────────────────

    #[test]
    fn advance_moves_each_particle_by_its_velocity() {
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(1920.0, 1080.0);
        let before: Vec<Particle> = field.particles().to_vec();
        field.advance(1920.0, 1080.0, 0.0);
        for (old, new) in before.iter().zip(field.particles()) {
            let expected = old.position + old.velocity;
            assert!((new.position.x - wrap(expected.x, 1920.0)).abs() < 1e-12);
            assert!((new.position.y - wrap(expected.y, 1080.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn wraparound_teleports_across_the_right_edge() {
        let mut field = field_with(vec![Particle {
            position: DVec2::new(99.5, 50.0),
            velocity: DVec2::new(1.0, 0.0),
            ..still_particle(0.0, 0.0)
        }]);
        field.advance(100.0, 100.0, 0.0);
        let p = &field.particles()[0];
        assert!((p.position.x - 0.5).abs() < 1e-12, "x = {}", p.position.x);
    }

    #[test]
    fn wraparound_teleports_across_the_left_edge() {
        let mut field = field_with(vec![Particle {
            position: DVec2::new(0.25, 50.0),
            velocity: DVec2::new(-1.0, 0.0),
            ..still_particle(0.0, 0.0)
        }]);
        field.advance(100.0, 100.0, 0.0);
        let p = &field.particles()[0];
        assert!((p.position.x - 99.25).abs() < 1e-12, "x = {}", p.position.x);
    }

    #[test]
    fn position_invariant_holds_over_many_ticks() {
        // Tiny surface with default speeds forces frequent wraps.
        let params = FieldParams {
            density_divisor: 10.0,
            ..FieldParams::default()
        };
        let mut field = ParticleField::new(params, 1234);
        field.reseed(40.0, 30.0);
        assert!(!field.is_empty());
        for tick in 0..1000 {
            field.advance(40.0, 30.0, tick as f64 / 60.0);
            for p in field.particles() {
                assert!(
                    p.position.x >= 0.0 && p.position.x < 40.0,
                    "x = {} escaped at tick {tick}",
                    p.position.x
                );
                assert!(
                    p.position.y >= 0.0 && p.position.y < 30.0,
                    "y = {} escaped at tick {tick}",
                    p.position.y
                );
            }
        }
    }

    #[test]
    fn opacity_stays_clamped_every_tick() {
        let mut field = ParticleField::new(FieldParams::default(), 77);
        field.reseed(1920.0, 1080.0);
        for tick in 0..500 {
            field.advance(1920.0, 1080.0, tick as f64 / 60.0);
            for p in field.particles() {
                assert!(
                    (0.1..=0.7).contains(&p.opacity),
                    "opacity = {} out of range at tick {tick}",
                    p.opacity
                );
            }
        }
    }

    #[test]
    fn wrap_never_returns_the_extent_itself() {
        // A tiny negative input makes rem_euclid round up to the extent.
        let folded = wrap(-1e-18, 300.0);
        assert!(folded >= 0.0 && folded < 300.0, "wrap = {folded}");
        assert_eq!(wrap(300.0, 300.0), 0.0);
        assert_eq!(wrap(0.0, 300.0), 0.0);
    }

    // ── Connections ────────────────────────────────────────────────

    #[test]
    fn two_close_particles_yield_one_connection() {
        let field = field_with(vec![still_particle(0.0, 0.0), still_particle(50.0, 0.0)]);
        let found: Vec<Connection> = field.connections(100.0).collect();
        assert_eq!(found.len(), 1);
        assert!((found[0].distance - 50.0).abs() < 1e-12);
    }

    #[test]
    fn pair_at_exactly_the_threshold_is_excluded() {
        let field = field_with(vec![still_particle(0.0, 0.0), still_particle(100.0, 0.0)]);
        assert_eq!(field.connections(100.0).count(), 0);
    }

    #[test]
    fn every_unordered_pair_is_considered_exactly_once() {
        // Positions 0, 10, 20, 30 on a line; pairs closer than 25:
        // (0,10) (0,20) (10,20) (10,30) (20,30) — five, each once.
        let field = field_with(vec![
            still_particle(0.0, 0.0),
            still_particle(10.0, 0.0),
            still_particle(20.0, 0.0),
            still_particle(30.0, 0.0),
        ]);
        let mut distances: Vec<f64> = field.connections(25.0).map(|c| c.distance).collect();
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(distances, vec![10.0, 10.0, 10.0, 20.0, 20.0]);
    }

    #[test]
    fn all_pairs_under_a_generous_threshold() {
        let field = field_with(vec![
            still_particle(0.0, 0.0),
            still_particle(1.0, 0.0),
            still_particle(0.0, 1.0),
            still_particle(1.0, 1.0),
            still_particle(0.5, 0.5),
        ]);
        // n(n-1)/2 = 10 pairs, all within distance 2.
        assert_eq!(field.connections(2.0).count(), 10);
    }

    #[test]
    fn empty_and_singleton_fields_have_no_connections() {
        assert_eq!(field_with(Vec::new()).connections(100.0).count(), 0);
        assert_eq!(
            field_with(vec![still_particle(5.0, 5.0)])
                .connections(100.0)
                .count(),
            0
        );
    }

    #[test]
    fn connection_distance_is_euclidean() {
        let field = field_with(vec![still_particle(0.0, 0.0), still_particle(3.0, 4.0)]);
        let found: Vec<Connection> = field.connections(10.0).collect();
        assert_eq!(found.len(), 1);
        assert!((found[0].distance - 5.0).abs() < 1e-12);
    }

    // ── Params ─────────────────────────────────────────────────────

    #[test]
    fn from_json_overrides_and_defaults() {
        let params = FieldParams::from_json(&json!({
            "max_particles": 50,
            "speed_limit": 0.5,
        }));
        assert_eq!(params.max_particles, 50);
        assert!((params.speed_limit - 0.5).abs() < f64::EPSILON);
        assert!((params.density_divisor - 15_000.0).abs() < f64::EPSILON);
        assert!((params.hue_min - 220.0).abs() < f64::EPSILON);
    }

    #[test]
    fn to_json_round_trips_through_from_json() {
        let original = FieldParams {
            max_particles: 42,
            hue_min: 10.0,
            ..FieldParams::default()
        };
        let restored = FieldParams::from_json(&original.to_json());
        assert_eq!(restored.max_particles, 42);
        assert!((restored.hue_min - 10.0).abs() < f64::EPSILON);
        assert!((restored.opacity_max - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn schema_describes_every_parameter() {
        let schema = FieldParams::schema();
        for key in [
            "density_divisor",
            "max_particles",
            "speed_limit",
            "radius_min",
            "radius_span",
            "opacity_min",
            "opacity_max",
            "spawn_opacity_min",
            "hue_min",
            "hue_span",
            "saturation",
            "lightness",
            "shimmer_time_scale",
            "shimmer_space_scale",
            "shimmer_amplitude",
        ] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
            assert!(
                schema[key].get("default").is_some(),
                "schema {key} missing default"
            );
        }
    }

    // ── Property-based tests ───────────────────────────────────────

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn positions_stay_in_bounds_for_any_seed(
                seed: u64,
                ticks in 1_usize..200,
            ) {
                let mut field = ParticleField::new(FieldParams::default(), seed);
                field.reseed(400.0, 300.0);
                for tick in 0..ticks {
                    field.advance(400.0, 300.0, tick as f64 / 60.0);
                }
                for p in field.particles() {
                    prop_assert!(p.position.x >= 0.0 && p.position.x < 400.0);
                    prop_assert!(p.position.y >= 0.0 && p.position.y < 300.0);
                }
            }

            #[test]
            fn opacity_stays_in_range_for_any_seed(seed: u64, ticks in 1_usize..200) {
                let mut field = ParticleField::new(FieldParams::default(), seed);
                field.reseed(400.0, 300.0);
                for tick in 0..ticks {
                    field.advance(400.0, 300.0, tick as f64 / 60.0);
                    for p in field.particles() {
                        prop_assert!((0.1..=0.7).contains(&p.opacity));
                    }
                }
            }

            #[test]
            fn reseed_count_formula_always_holds(
                seed: u64,
                width in 1.0_f64..4000.0,
                height in 1.0_f64..4000.0,
            ) {
                let mut field = ParticleField::new(FieldParams::default(), seed);
                field.reseed(width, height);
                let expected = ((width * height / 15_000.0).floor() as usize).min(100);
                prop_assert_eq!(field.len(), expected);
            }

            #[test]
            fn connections_yield_count_matches_brute_force(seed: u64) {
                let mut field = ParticleField::new(FieldParams::default(), seed);
                field.reseed(1200.0, 900.0);
                let particles = field.particles();
                let mut expected = 0;
                for i in 0..particles.len() {
                    for j in (i + 1)..particles.len() {
                        if particles[i].position.distance(particles[j].position) < 100.0 {
                            expected += 1;
                        }
                    }
                }
                prop_assert_eq!(field.connections(100.0).count(), expected);
            }

            #[test]
            fn connection_distances_are_below_threshold(seed: u64, threshold in 1.0_f64..300.0) {
                let mut field = ParticleField::new(FieldParams::default(), seed);
                field.reseed(1200.0, 900.0);
                for c in field.connections(threshold) {
                    prop_assert!(c.distance < threshold);
                }
            }
        }
    }
}
