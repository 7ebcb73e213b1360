//! Short-lived sparks spawned from hot cells and drawn above the grid

use super::grid::{Heat, HeatGrid};
use rand::prelude::*;

const SPAWN_THRESHOLD: Heat = 60;
const SPAWN_CHANCE: f32 = 0.1;
const SPAWN_LIFE_MIN: i32 = 20;
const SPAWN_LIFE_SPAN: i32 = 30;

const BUOYANCY: f32 = 0.1;
const DRIFT: f32 = 0.2;
const AIR_RESISTANCE: f32 = 0.95;
const WIND_COUPLING: f32 = 0.1;
const COOLING_PER_STEP: Heat = 2;

const BURST_COUNT: usize = 10;
const BURST_SPEED: f32 = 2.0;
const BURST_LIFE_MIN: i32 = 30;
const BURST_LIFE_SPAN: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub heat: Heat,
    pub life: i32,
}

impl FireParticle {
    /// Glyph drawn for this particle, or None when it is too cool to show
    pub fn glyph(&self) -> Option<char> {
        match self.heat {
            h if h > 50 => Some('*'),
            h if h > 10 => Some('.'),
            _ => None,
        }
    }
}

/// Bounded particle collection
pub struct ParticleSystem {
    particles: Vec<FireParticle>,
    capacity: usize,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &FireParticle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Add a particle unless the cap is reached. Returns whether it was kept.
    pub fn push(&mut self, particle: FireParticle) -> bool {
        if self.is_full() {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Advance every particle one step and drop the dead ones
    pub fn update(&mut self, wind: f32, rng: &mut StdRng) {
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;

            // Negative y is up
            p.vy -= BUOYANCY;
            p.vx += (rng.gen::<f32>() - 0.5) * DRIFT;
            p.vx *= AIR_RESISTANCE;
            p.vx += wind * WIND_COUPLING;

            p.heat -= COOLING_PER_STEP;
            p.life -= 1;

            p.life > 0 && p.heat > 0 && p.y >= 0.0
        });
    }

    /// Sample the lower half of the grid for hot cells to emit from
    pub fn spawn_from(&mut self, grid: &HeatGrid, rng: &mut StdRng) {
        let (w, h) = (grid.width(), grid.height());

        for y in h / 2..h {
            for x in 0..w {
                if self.is_full() {
                    return;
                }
                let heat = grid.get(x as i32, y as i32);
                if heat > SPAWN_THRESHOLD && rng.gen::<f32>() < SPAWN_CHANCE {
                    self.particles.push(FireParticle {
                        x: x as f32,
                        y: y as f32,
                        vx: (rng.gen::<f32>() - 0.5) * 2.0,
                        vy: -rng.gen::<f32>() * 3.0,
                        heat,
                        life: SPAWN_LIFE_MIN + rng.gen_range(0..SPAWN_LIFE_SPAN),
                    });
                }
            }
        }
    }

    /// Scatter a burst of sparks from one point in all directions
    pub fn burst(&mut self, x: i32, y: i32, heat: Heat, rng: &mut StdRng) {
        for _ in 0..BURST_COUNT {
            let particle = FireParticle {
                x: x as f32,
                y: y as f32,
                vx: rng.gen_range(-BURST_SPEED..BURST_SPEED),
                vy: rng.gen_range(-BURST_SPEED..BURST_SPEED),
                heat,
                life: BURST_LIFE_MIN + rng.gen_range(0..BURST_LIFE_SPAN),
            };
            self.push(particle);
        }
    }
}
