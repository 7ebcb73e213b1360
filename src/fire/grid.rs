//! Heat grid: double-buffered integer heat field with diffusion, wind and fuel

use rand::prelude::*;

pub type Heat = i32;

pub const HEAT_MAX: Heat = 100;

// Diffusion fractions (of the source cell's heat, per step)
const RISE_FRACTION: f32 = 0.3;
const SPREAD_FRACTION: f32 = 0.1;

// Wind moves this share of a cell's heat, in the upper 80% of rows only
const WIND_TRANSFER: f32 = 0.2;
const WIND_DEADZONE: f32 = 0.1;

const TURBULENCE_THRESHOLD: Heat = 20;

// Base ignition band laid down by `seed_base`
const BASE_HEAT: Heat = 80;
const BASE_JITTER: Heat = 20;

const EXPLOSION_RADIUS: i32 = 3;

#[inline]
pub fn clamp_heat(value: Heat) -> Heat {
    value.clamp(0, HEAT_MAX)
}

/// Two full heat grids: `current` is read during a step, `next` is written
pub struct HeatGrid {
    width: usize,
    height: usize,
    current: Vec<Heat>,
    next: Vec<Heat>,
}

impl HeatGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            current: vec![0; width * height],
            next: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Heat at a position; anything outside the grid reads as cold
    pub fn get(&self, x: i32, y: i32) -> Heat {
        if self.in_bounds(x, y) {
            self.current[self.idx(x as usize, y as usize)]
        } else {
            0
        }
    }

    /// Raise a cell to at least `heat`. Out-of-bounds targets are ignored.
    pub fn raise(&mut self, x: i32, y: i32, heat: Heat) {
        if self.in_bounds(x, y) {
            let i = self.idx(x as usize, y as usize);
            self.current[i] = clamp_heat(self.current[i].max(heat));
        }
    }

    /// Current grid, row-major
    pub fn cells(&self) -> &[Heat] {
        &self.current
    }

    pub fn clear(&mut self) {
        self.current.fill(0);
        self.next.fill(0);
    }

    /// Lay down the randomized ignition line across the middle half of the bottom row
    pub fn seed_base(&mut self, rng: &mut StdRng) {
        if self.height == 0 {
            return;
        }
        let bottom = self.height - 1;
        for x in self.base_band() {
            let i = self.idx(x, bottom);
            self.current[i] = clamp_heat(BASE_HEAT + rng.gen_range(0..BASE_JITTER));
        }
    }

    /// Bottom-row columns covered by the base ignition line
    pub fn base_band(&self) -> std::ops::Range<usize> {
        self.width / 4..3 * self.width / 4
    }

    /// Feed the centered third of the bottom row. Never lowers existing heat.
    pub fn inject_fuel(&mut self, fuel: i32, rng: &mut StdRng) {
        if fuel <= 0 || self.height == 0 || self.width == 0 {
            return;
        }

        let bottom = self.height - 1;
        let band = (self.width / 3).max(1);
        let start = (self.width - band) / 2;
        let noise = (fuel / 2).max(1);

        for x in start..start + band {
            let fuel_heat = (fuel as f32 * 0.8) as Heat + rng.gen_range(0..noise);
            let i = self.idx(x, bottom);
            self.current[i] = clamp_heat(self.current[i].max(fuel_heat));
        }
    }

    /// Shift heat sideways in the upper rows, more strongly toward the top.
    /// Runs before diffusion; the result replaces `current`.
    pub fn advect_wind(&mut self, wind: f32) {
        if wind.abs() < WIND_DEADZONE || self.height == 0 {
            return;
        }

        self.next.copy_from_slice(&self.current);
        let h = self.height as f32;
        let wind_rows = (self.height * 4).div_ceil(5);

        for y in 0..wind_rows {
            let offset = (wind * (h - y as f32) / h).round() as i32;
            if offset == 0 {
                continue;
            }

            for x in 0..self.width {
                let heat = self.current[self.idx(x, y)];
                if heat <= 0 {
                    continue;
                }

                let moved = (heat as f32 * WIND_TRANSFER) as Heat;
                let src = self.idx(x, y);
                self.next[src] = clamp_heat(self.next[src] - moved);

                // Heat blown past the edge is lost
                let target = x as i32 + offset;
                if target >= 0 && (target as usize) < self.width {
                    let dst = self.idx(target as usize, y);
                    self.next[dst] = clamp_heat(self.next[dst] + moved);
                }
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Cool, rise and spread `current` into `next`.
    ///
    /// Row-major traversal; every contribution accumulates into `next`,
    /// so no cell's heat is applied twice.
    pub fn diffuse(&mut self, cooling_rate: f32) {
        self.next.fill(0);

        for y in 0..self.height {
            for x in 0..self.width {
                let heat = self.current[self.idx(x, y)];
                if heat <= 0 {
                    continue;
                }

                let h = heat as f32;
                let mut retained = h * cooling_rate;

                // Rise; the top row has nowhere to put it
                let rise = h * RISE_FRACTION;
                retained -= rise;
                if y > 0 {
                    let up = self.idx(x, y - 1);
                    self.next[up] = clamp_heat(self.next[up] + rise as Heat);
                }

                let spread = h * SPREAD_FRACTION;
                if x > 0 {
                    let left = self.idx(x - 1, y);
                    self.next[left] = clamp_heat(self.next[left] + spread as Heat);
                    retained -= spread;
                }
                if x + 1 < self.width {
                    let right = self.idx(x + 1, y);
                    self.next[right] = clamp_heat(self.next[right] + spread as Heat);
                    retained -= spread;
                }

                let i = self.idx(x, y);
                self.next[i] = clamp_heat(self.next[i] + retained as Heat);
            }
        }
    }

    /// Jitter hot cells of the pending grid by up to ±`turbulence` of the heat range
    pub fn add_turbulence(&mut self, turbulence: f32, rng: &mut StdRng) {
        if turbulence <= 0.0 {
            return;
        }
        let amplitude = turbulence * HEAT_MAX as f32;

        for i in 0..self.current.len() {
            if self.current[i] > TURBULENCE_THRESHOLD {
                let jitter = (rng.gen_range(-1.0f32..=1.0) * amplitude) as Heat;
                self.next[i] = clamp_heat(self.next[i] + jitter);
            }
        }
    }

    /// Promote the pending grid to current
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Radial burst: heat falls off linearly in squared distance, reaching 0 at the rim
    pub fn explode(&mut self, cx: i32, cy: i32, intensity: Heat) {
        let r2 = EXPLOSION_RADIUS * EXPLOSION_RADIUS;
        for dy in -EXPLOSION_RADIUS..=EXPLOSION_RADIUS {
            for dx in -EXPLOSION_RADIUS..=EXPLOSION_RADIUS {
                let d2 = dx * dx + dy * dy;
                if d2 <= r2 {
                    let heat = (intensity as f32 * (1.0 - d2 as f32 / r2 as f32)) as Heat;
                    self.raise(cx + dx, cy + dy, heat);
                }
            }
        }
    }
}
