//! Control panel, status bar and overlays drawn around the fire area

use crate::colors::{color_for, ColorScheme, FireColor};
use crate::fire::FireStats;
use crate::help::{draw_box, render_help_panel};
use crate::terminal::Surface;

pub const PANEL_WIDTH: u16 = 25;
pub const STATUS_HEIGHT: u16 = 3;

const PANEL_HEIGHT: i32 = 20;
const STATS_WIDTH: i32 = 30;
const STATS_HEIGHT: i32 = 13;

/// Weight kept from the previous smoothed value each frame
const SMOOTHING: f32 = 0.9;

/// Border color advances every 10 frames over a 30 frame cycle
const BORDER_PERIOD: u32 = 30;
const BORDER_STEP: u32 = 10;
const BORDER_COLORS: [FireColor; 3] = [FireColor::Orange, FireColor::Yellow, FireColor::White];

const GAUGE_WIDTH: i32 = 15;
const GAUGE_CHARS: [char; 6] = [' ', '.', '░', '▒', '▓', '█'];

const WIND_TRACK: usize = 19;
const WIND_CENTER: i32 = 9;

const LEGEND: [&str; 6] = ["Q=Quit", "H=Help", "W/E=Wind", "+/-=Fuel", "C=Colors", "R=Reset"];

/// Screen partition for a given terminal size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub screen_width: u16,
    pub panel_x: i32,
    pub status_y: i32,
    pub fire_origin: (i32, i32),
    pub fire_width: usize,
    pub fire_height: usize,
}

impl Layout {
    pub fn new(screen_width: u16, screen_height: u16) -> Self {
        Self {
            screen_width,
            panel_x: screen_width.saturating_sub(PANEL_WIDTH) as i32,
            status_y: screen_height.saturating_sub(STATUS_HEIGHT) as i32,
            fire_origin: (1, 1),
            fire_width: screen_width.saturating_sub(PANEL_WIDTH + 2) as usize,
            fire_height: screen_height.saturating_sub(STATUS_HEIGHT + 2) as usize,
        }
    }
}

pub struct UiOverlay {
    layout: Layout,
    scheme: ColorScheme,
    help_visible: bool,
    stats_detailed: bool,
    border_effects: bool,
    smooth_fps: f32,
    smooth_temp: f32,
    smooth_fuel: f32,
    border_flash: u32,
}

impl UiOverlay {
    pub fn new(screen_width: u16, screen_height: u16, scheme: ColorScheme) -> Self {
        Self {
            layout: Layout::new(screen_width, screen_height),
            scheme,
            help_visible: false,
            stats_detailed: false,
            border_effects: true,
            smooth_fps: 0.0,
            smooth_temp: 0.0,
            smooth_fuel: crate::fire::DEFAULT_FUEL as f32,
            border_flash: 0,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn resize(&mut self, screen_width: u16, screen_height: u16) {
        self.layout = Layout::new(screen_width, screen_height);
    }

    /// Advance to the next scheme and return it so the engine can follow
    pub fn cycle_color_scheme(&mut self) -> ColorScheme {
        self.scheme = self.scheme.next();
        self.scheme
    }

    #[cfg(test)]
    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn toggle_stats(&mut self) {
        self.stats_detailed = !self.stats_detailed;
    }

    #[cfg(test)]
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    #[cfg(test)]
    pub fn stats_detailed(&self) -> bool {
        self.stats_detailed
    }

    /// Draw every overlay element for this frame
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, stats: &FireStats, paused: bool) {
        self.border_flash = (self.border_flash + 1) % BORDER_PERIOD;
        self.smooth_statistics(stats);

        self.render_control_panel(surface, stats, paused);
        self.render_status_bar(surface, stats);

        if self.help_visible {
            render_help_panel(surface, 2, 1, self.layout.status_y - 1);
        }
        if self.stats_detailed {
            self.render_detailed_stats(surface, stats);
        }
    }

    fn border_color(&self) -> FireColor {
        if self.border_effects {
            BORDER_COLORS[((self.border_flash / BORDER_STEP) % 3) as usize]
        } else {
            FireColor::UiBorder
        }
    }

    fn smooth_statistics(&mut self, stats: &FireStats) {
        let keep = SMOOTHING;
        let take = 1.0 - SMOOTHING;
        self.smooth_fps = self.smooth_fps * keep + stats.fps * take;
        self.smooth_temp = self.smooth_temp * keep + stats.average_temp * take;
        self.smooth_fuel = self.smooth_fuel * keep + stats.fuel_level as f32 * take;
    }

    fn render_control_panel<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        stats: &FireStats,
        paused: bool,
    ) {
        let x = self.layout.panel_x;
        let top = 1;
        let height = PANEL_HEIGHT.min(self.layout.status_y - top);
        draw_box(
            surface,
            x,
            top,
            PANEL_WIDTH as i32,
            height,
            Some("FIRE CONTROL"),
            self.border_color(),
        );

        let cx = x + 2;
        let mut cy = top + 2;

        surface.set_str(cx, cy, "~ FIRE SIM ~", FireColor::UiHighlight);
        cy += 2;

        if paused {
            surface.set_str(cx, cy, "|| PAUSED", FireColor::UiWarning);
        } else {
            surface.set_str(cx, cy, "> RUNNING", FireColor::UiSuccess);
        }
        cy += 2;

        surface.set_str(cx, cy, "Fuel:", FireColor::UiText);
        draw_progress_bar(
            surface,
            cx,
            cy + 1,
            PANEL_WIDTH as i32 - 4,
            self.smooth_fuel as i32,
            FireColor::Orange,
        );
        cy += 3;

        surface.set_str(cx, cy, "Heat:", FireColor::UiText);
        draw_temperature_gauge(surface, cx, cy + 1, self.smooth_temp, self.scheme);
        cy += 3;

        surface.set_str(cx, cy, "Wind:", FireColor::UiText);
        draw_wind_indicator(surface, cx, cy + 1, stats.wind_speed);
        cy += 3;

        surface.set_str(cx, cy, "Colors:", FireColor::UiText);
        surface.set_str(cx, cy + 1, self.scheme.name(), FireColor::UiHighlight);
        cy += 3;

        surface.set_str(cx, cy, &format!("FPS: {:.1}", self.smooth_fps), FireColor::UiText);
    }

    fn render_status_bar<S: Surface + ?Sized>(&self, surface: &mut S, stats: &FireStats) {
        let y = self.layout.status_y;
        let width = self.layout.screen_width as i32;
        draw_box(surface, 0, y, width, STATUS_HEIGHT as i32, None, self.border_color());

        let summary = format!(
            "Active: {}  Max: {}°  Heat: {}",
            stats.active_pixels,
            stats.max_temp,
            stats.total_heat / 100
        );
        let summary_x = width - summary.chars().count() as i32 - 2;

        // Legend gives way to the live summary on narrow screens
        let room = (summary_x - 4).max(0) as usize;
        let mut legend = String::new();
        for item in LEGEND {
            let sep = if legend.is_empty() { 0 } else { 2 };
            if legend.len() + sep + item.len() > room {
                break;
            }
            if sep > 0 {
                legend.push_str("  ");
            }
            legend.push_str(item);
        }
        surface.set_str(2, y + 1, &legend, FireColor::UiText);
        surface.set_str(summary_x, y + 1, &summary, FireColor::UiHighlight);
    }

    fn render_detailed_stats<S: Surface + ?Sized>(&self, surface: &mut S, stats: &FireStats) {
        let x = self.layout.screen_width as i32 / 2 - STATS_WIDTH / 2;
        let y = 2;
        draw_box(
            surface,
            x,
            y,
            STATS_WIDTH,
            STATS_HEIGHT,
            Some("DETAILED STATS"),
            self.border_color(),
        );

        let lines = [
            format!("Total Heat: {}", stats.total_heat),
            format!("Active Pixels: {}", stats.active_pixels),
            format!("Avg Temp: {:.1}°", stats.average_temp),
            format!("Max Temp: {}°", stats.max_temp),
            format!("Wind Speed: {:.1}", stats.wind_speed),
            format!("Fuel Level: {}%", stats.fuel_level),
            format!("Particles: {}", stats.particles),
            format!("Frames: {}", stats.frames_rendered),
            format!("FPS: {:.2}", stats.fps),
        ];
        for (i, line) in lines.iter().enumerate() {
            surface.set_str(x + 2, y + 2 + i as i32, line, FireColor::UiText);
        }
    }
}

/// Horizontal bar for a 0..=100 value with the percentage centered on it
fn draw_progress_bar<S: Surface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    width: i32,
    value: i32,
    fill: FireColor,
) {
    let value = value.clamp(0, 100);
    let filled = value * width / 100;

    for i in 0..width {
        if i < filled {
            surface.set_cell(x + i, y, '█', fill);
        } else {
            surface.set_cell(x + i, y, '░', FireColor::UiBorder);
        }
    }

    let label = format!("{}%", value);
    let label_x = x + (width - label.len() as i32) / 2;
    surface.set_str(label_x, y, &label, FireColor::UiText);
}

fn draw_temperature_gauge<S: Surface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
    temperature: f32,
    scheme: ColorScheme,
) {
    let temp = temperature as i32;
    let level = temp * GAUGE_WIDTH / 100;
    let color = color_for(temp, scheme);

    for i in 0..GAUGE_WIDTH {
        let ch = if i < level {
            GAUGE_CHARS[(i / 3 + 1).min(5) as usize]
        } else {
            ' '
        };
        surface.set_cell(x + i, y, ch, color);
    }
    surface.set_str(x + GAUGE_WIDTH + 1, y, &format!("{:.1}°", temperature), FireColor::UiText);
}

/// Track with a center mark and an arrow cluster displaced by the wind
fn wind_track(wind: f32) -> String {
    let mut track = [' '; WIND_TRACK];
    let pos = (WIND_CENTER + (wind * 2.0).round() as i32).clamp(0, WIND_TRACK as i32 - 1);

    if wind < -0.1 {
        let start = (pos - 2).max(0) as usize;
        track[start..start + 3].fill('<');
    } else if wind > 0.1 {
        let start = pos.min(WIND_TRACK as i32 - 3) as usize;
        track[start..start + 3].fill('>');
    }
    track[WIND_CENTER as usize] = '|';
    track.iter().collect()
}

fn draw_wind_indicator<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32, wind: f32) {
    let color = if wind.abs() > 1.0 {
        FireColor::UiWarning
    } else {
        FireColor::UiText
    };
    surface.set_str(x, y, &wind_track(wind), color);
}
