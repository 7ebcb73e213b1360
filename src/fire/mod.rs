//! Fire simulation: heat grid, particles and the engine that steps them
//!
//! One `update()` runs, in order: fuel injection, wind advection, diffusion,
//! turbulence, particle update, particle spawn (every other call), buffer
//! swap and statistics.

pub mod grid;
pub mod particles;

use crate::colors::{color_for, glyph_for, ColorScheme};
use crate::terminal::Surface;
use grid::{Heat, HeatGrid};
use particles::ParticleSystem;
use rand::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

pub const WIND_LIMIT: f32 = 5.0;
pub const DEFAULT_FUEL: i32 = 50;
pub const MAX_FUEL: i32 = 100;

/// Heat of the burst created by a click
pub const IGNITE_INTENSITY: Heat = 80;

/// Fixed physics knobs. Wind and fuel are runtime controls on the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimParams {
    /// Fraction of a cell's heat kept each step before rise/spread
    pub cooling_rate: f32,
    /// Hot-cell jitter as a fraction of the heat range
    pub turbulence: f32,
    pub max_particles: usize,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            cooling_rate: 0.85,
            turbulence: 0.1,
            max_particles: 200,
        }
    }
}

/// Snapshot recomputed once per step
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FireStats {
    pub total_heat: i64,
    pub active_pixels: usize,
    pub wind_speed: f32,
    pub fuel_level: i32,
    pub average_temp: f32,
    pub max_temp: Heat,
    pub frames_rendered: u64,
    pub fps: f32,
    pub particles: usize,
}

pub struct FireEngine {
    grid: HeatGrid,
    particles: ParticleSystem,
    params: SimParams,
    wind_strength: f32,
    fuel_amount: i32,
    scheme: ColorScheme,
    rng: StdRng,
    stats: FireStats,
    frame_count: u64,
    update_counter: u64,
    last_update: Option<Instant>,
}

impl FireEngine {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self::with_params(width, height, SimParams::default(), seed)
    }

    pub fn with_params(width: usize, height: usize, params: SimParams, seed: u64) -> Self {
        info!(width, height, seed, "creating fire engine");
        let mut engine = Self {
            grid: HeatGrid::new(width, height),
            particles: ParticleSystem::new(params.max_particles),
            params,
            wind_strength: 0.0,
            fuel_amount: DEFAULT_FUEL,
            scheme: ColorScheme::default(),
            rng: StdRng::seed_from_u64(seed),
            stats: FireStats::default(),
            frame_count: 0,
            update_counter: 0,
            last_update: None,
        };
        engine.reset();
        engine
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Advance the simulation by one fixed step
    pub fn update(&mut self) {
        self.update_counter += 1;

        self.grid.inject_fuel(self.fuel_amount, &mut self.rng);
        self.grid.advect_wind(self.wind_strength);
        self.grid.diffuse(self.params.cooling_rate);
        self.grid.add_turbulence(self.params.turbulence, &mut self.rng);

        self.particles.update(self.wind_strength, &mut self.rng);
        if self.update_counter % 2 == 0 {
            self.particles.spawn_from(&self.grid, &mut self.rng);
        }

        self.grid.swap();
        self.frame_count += 1;
        self.update_statistics();
    }

    /// Draw burning cells, then particles on top, offset by `origin`
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, origin: (i32, i32)) {
        let (ox, oy) = origin;
        let width = self.grid.width();

        for (i, &heat) in self.grid.cells().iter().enumerate() {
            if heat > 0 {
                let (x, y) = ((i % width) as i32, (i / width) as i32);
                surface.set_cell(ox + x, oy + y, glyph_for(heat), color_for(heat, self.scheme));
            }
        }

        for p in self.particles.iter() {
            let Some(glyph) = p.glyph() else { continue };
            let (px, py) = (p.x as i32, p.y as i32);
            if px >= 0 && py >= 0 && (px as usize) < width && (py as usize) < self.grid.height() {
                surface.set_cell(ox + px, oy + py, glyph, color_for(p.heat, self.scheme));
            }
        }
    }

    /// Clear everything back to the initial ignition line. Keeps the color scheme.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.particles.clear();
        self.wind_strength = 0.0;
        self.fuel_amount = DEFAULT_FUEL;
        self.frame_count = 0;
        self.grid.seed_base(&mut self.rng);
        self.update_statistics();
        debug!("fire engine reset");
    }

    pub fn set_wind(&mut self, strength: f32) {
        self.wind_strength = strength.clamp(-WIND_LIMIT, WIND_LIMIT);
        self.stats.wind_speed = self.wind_strength;
    }

    pub fn add_fuel(&mut self, delta: i32) {
        self.fuel_amount = (self.fuel_amount + delta).clamp(0, MAX_FUEL);
        self.stats.fuel_level = self.fuel_amount;
    }

    /// Ignite at a screen position; `origin` is where the grid is drawn
    pub fn ignite_at(&mut self, x: i32, y: i32, origin: (i32, i32)) {
        let (gx, gy) = (x - origin.0, y - origin.1);
        debug!(gx, gy, "ignite");
        self.explode(gx, gy, IGNITE_INTENSITY);
    }

    /// Radius-3 heat burst plus a spray of particles at a grid position
    pub fn explode(&mut self, gx: i32, gy: i32, intensity: Heat) {
        self.grid.explode(gx, gy, intensity);
        self.particles.burst(gx, gy, intensity, &mut self.rng);
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Last computed statistics; never recomputes
    pub fn stats(&self) -> &FireStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn heat_at(&self, x: i32, y: i32) -> Heat {
        self.grid.get(x, y)
    }

    #[cfg(test)]
    pub fn heat_cells(&self) -> &[Heat] {
        self.grid.cells()
    }

    #[cfg(test)]
    pub fn particles(&self) -> impl Iterator<Item = &particles::FireParticle> {
        self.particles.iter()
    }

    pub fn wind(&self) -> f32 {
        self.wind_strength
    }

    pub fn fuel(&self) -> i32 {
        self.fuel_amount
    }

    fn update_statistics(&mut self) {
        let mut total: i64 = 0;
        let mut active = 0;
        let mut max_temp = 0;

        for &heat in self.grid.cells() {
            if heat > 0 {
                total += heat as i64;
                active += 1;
                max_temp = max_temp.max(heat);
            }
        }

        let now = Instant::now();
        let fps = match self.last_update {
            Some(prev) => {
                let elapsed = now.duration_since(prev).as_secs_f32();
                if elapsed > 0.0 {
                    1.0 / elapsed
                } else {
                    self.stats.fps
                }
            }
            None => 0.0,
        };
        self.last_update = Some(now);

        self.stats = FireStats {
            total_heat: total,
            active_pixels: active,
            wind_speed: self.wind_strength,
            fuel_level: self.fuel_amount,
            average_temp: if active > 0 { total as f32 / active as f32 } else { 0.0 },
            max_temp,
            frames_rendered: self.frame_count,
            fps,
            particles: self.particles.len(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::FireColor;
    use crate::terminal::memory::MemorySurface;

    fn calm_params() -> SimParams {
        SimParams {
            turbulence: 0.0,
            ..SimParams::default()
        }
    }

    /// Heat-weighted mean column over the upper half of the grid
    fn upper_centroid(engine: &FireEngine) -> f64 {
        let w = engine.width();
        let (mut weight, mut sum) = (0.0, 0.0);
        for y in 0..engine.height() / 2 {
            for x in 0..w {
                let heat = engine.heat_at(x as i32, y as i32) as f64;
                weight += heat;
                sum += heat * x as f64;
            }
        }
        assert!(weight > 0.0, "no heat reached the upper half");
        sum / weight
    }

    #[test]
    fn heat_stays_clamped() {
        let mut engine = FireEngine::new(40, 20, 11);
        engine.add_fuel(50);
        engine.set_wind(3.0);
        for _ in 0..200 {
            engine.update();
            assert!(engine.heat_cells().iter().all(|&h| (0..=100).contains(&h)));
        }
    }

    #[test]
    fn reset_leaves_only_ignition_band() {
        let mut engine = FireEngine::new(40, 20, 3);
        for _ in 0..30 {
            engine.update();
        }
        engine.reset();

        let mut band_total = 0;
        for y in 0..20 {
            for x in 0..40 {
                let heat = engine.heat_at(x, y);
                if y == 19 && (10..30).contains(&x) {
                    assert!((80..100).contains(&heat));
                    band_total += heat as i64;
                } else {
                    assert_eq!(heat, 0, "stray heat at {x},{y}");
                }
            }
        }
        assert_eq!(engine.stats().total_heat, band_total);
        assert_eq!(engine.stats().active_pixels, 20);
        assert_eq!(engine.particles().count(), 0);
        assert_eq!(engine.wind(), 0.0);
        assert_eq!(engine.fuel(), DEFAULT_FUEL);
    }

    #[test]
    fn reset_keeps_color_scheme() {
        let mut engine = FireEngine::new(40, 20, 3);
        engine.set_color_scheme(ColorScheme::Plasma);
        engine.reset();
        assert_eq!(engine.color_scheme(), ColorScheme::Plasma);
    }

    #[test]
    fn zero_wind_is_idempotent() {
        let mut a = FireEngine::new(40, 20, 99);
        let mut b = FireEngine::new(40, 20, 99);
        b.set_wind(0.0);
        for _ in 0..50 {
            a.update();
            b.update();
            assert_eq!(a.heat_cells(), b.heat_cells());
        }
    }

    #[test]
    fn fuel_is_clamped() {
        let mut engine = FireEngine::new(40, 20, 1);
        engine.add_fuel(1000);
        assert_eq!(engine.stats().fuel_level, 100);
        engine.update();
        assert_eq!(engine.stats().fuel_level, 100);
        engine.add_fuel(-1000);
        assert_eq!(engine.stats().fuel_level, 0);
    }

    #[test]
    fn wind_is_clamped() {
        let mut engine = FireEngine::new(40, 20, 1);
        engine.set_wind(12.0);
        assert_eq!(engine.wind(), WIND_LIMIT);
        engine.set_wind(-12.0);
        assert_eq!(engine.wind(), -WIND_LIMIT);
        engine.update();
        assert_eq!(engine.stats().wind_speed, -WIND_LIMIT);
    }

    #[test]
    fn particle_cap_holds() {
        let params = SimParams {
            max_particles: 30,
            ..SimParams::default()
        };
        let mut engine = FireEngine::with_params(60, 30, params, 5);
        engine.add_fuel(50);
        for i in 0..200 {
            if i % 10 == 0 {
                engine.explode(30, 20, 100);
            }
            engine.update();
            assert!(engine.particles().count() <= 30);
        }
    }

    #[test]
    fn ignition_peaks_at_target() {
        let mut engine = FireEngine::new(40, 20, 8);
        let origin = (1, 1);
        engine.ignite_at(21, 6, origin);

        assert_eq!(engine.heat_at(20, 5), IGNITE_INTENSITY);
        assert_eq!(engine.heat_at(23, 5), 0);
        assert_eq!(engine.heat_at(20, 8), 0);
        assert!(engine.heat_at(21, 5) > 0);
        assert_eq!(engine.particles().count(), 10);
    }

    #[test]
    fn explode_outside_grid_is_ignored() {
        let mut engine = FireEngine::new(20, 10, 8);
        let before = engine.heat_cells().to_vec();
        engine.explode(-10, -10, 90);
        assert_eq!(engine.heat_cells(), &before[..]);
    }

    #[test]
    fn long_run_stays_bounded() {
        let mut engine = FireEngine::new(40, 20, 2024);
        for _ in 0..100 {
            engine.update();
            assert!(engine.stats().total_heat < 4000);
        }
        let stats = engine.stats();
        assert!(stats.active_pixels > 0);
        assert!(stats.max_temp <= 100);
        assert_eq!(stats.frames_rendered, 100);
    }

    #[test]
    fn wind_shifts_flames_downwind() {
        // Short grid: on 40x20 ten steps leave the upper half cold (row sums
        // [0 x15, 15, 66, 188, 415, 393]) so there is no centroid to compare.
        let run = |wind: f32| {
            let mut engine = FireEngine::with_params(40, 6, calm_params(), 17);
            engine.add_fuel(50);
            engine.set_wind(wind);
            for _ in 0..10 {
                engine.update();
            }
            upper_centroid(&engine)
        };

        let calm = run(0.0);
        let windy = run(5.0);
        assert!(windy > calm, "centroid {windy} should exceed {calm}");
    }

    #[test]
    fn stats_are_snapshots() {
        let mut engine = FireEngine::new(40, 20, 4);
        engine.update();
        let first = *engine.stats();

        engine.explode(20, 5, 90);
        assert_eq!(engine.stats().total_heat, first.total_heat);
        assert_eq!(engine.stats().active_pixels, first.active_pixels);
        assert_eq!(engine.stats().frames_rendered, 1);

        engine.update();
        assert!(engine.stats().max_temp > 0);
        assert_eq!(engine.stats().frames_rendered, 2);
    }

    #[test]
    fn render_draws_heat_and_particles() {
        let mut engine = FireEngine::new(20, 10, 12);
        let mut surface = MemorySurface::new(30, 15);
        engine.render(&mut surface, (2, 3));

        // Base band sits on the last grid row, columns 5..15
        let cell = surface.cell(2 + 10, 3 + 9);
        assert_eq!(cell.ch, glyph_for(engine.heat_at(10, 9)));
        assert_ne!(cell.color, FireColor::Black);
        assert_eq!(surface.cell(2, 3).ch, ' ');

        engine.explode(10, 2, 90);
        surface.clear();
        engine.render(&mut surface, (0, 0));
        // Fresh burst particles sit on the center and are hot enough for '*'
        assert_eq!(surface.cell(10, 2).ch, '*');
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = FireEngine::new(30, 15, 77);
        let mut b = FireEngine::new(30, 15, 77);
        for _ in 0..40 {
            a.update();
            b.update();
        }
        assert_eq!(a.heat_cells(), b.heat_cells());
        assert_eq!(a.particles().count(), b.particles().count());
    }
}
