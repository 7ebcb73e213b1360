//! Splash screen, main loop and frame pacing

use crate::colors::FireColor;
use crate::config::FireConfig;
use crate::fire::FireEngine;
use crate::help::draw_box;
use crate::input::{Action, InputMapper};
use crate::terminal::{InputEvent, Surface};
use crate::ui::UiOverlay;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const WIND_STEP: f32 = 2.0;
const FUEL_STEP: i32 = 10;

const SPLASH_TIMEOUT: Duration = Duration::from_secs(2);
const SPLASH_POLL: Duration = Duration::from_millis(50);
const SPLASH_LINES: [(&str, FireColor); 3] = [
    ("ASCII FIRE SIMULATOR", FireColor::Orange),
    ("Initializing flames...", FireColor::Yellow),
    ("Press any key to ignite!", FireColor::UiText),
];

/// Everything that lives for one session: engine, overlay and input state
pub struct App {
    engine: FireEngine,
    ui: UiOverlay,
    input: InputMapper,
    paused: bool,
    running: bool,
    seed: u64,
    frames: u64,
}

impl App {
    pub fn new(config: &FireConfig, width: u16, height: u16) -> Self {
        let ui = UiOverlay::new(width, height, config.scheme);
        let layout = ui.layout();

        let mut engine = FireEngine::new(layout.fire_width, layout.fire_height, config.seed);
        engine.set_color_scheme(config.scheme);
        engine.add_fuel(config.fuel - engine.fuel());

        Self {
            engine,
            ui,
            input: InputMapper::new(config.fps),
            paused: false,
            running: true,
            seed: config.seed,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[cfg(test)]
    pub fn engine(&self) -> &FireEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn ui(&self) -> &UiOverlay {
        &self.ui
    }

    /// Loop iterations completed, paused ones included
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Poll, update, draw, present
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> io::Result<()> {
        let event = surface.poll_event()?;
        if let Some(InputEvent::Resize(w, h)) = event {
            self.resize(w, h);
        }
        let action = self.input.process(event);
        self.apply(action);

        if !self.paused {
            self.engine.update();
        }

        surface.clear();
        self.engine.render(surface, self.ui.layout().fire_origin);
        self.ui.render(surface, self.engine.stats(), self.paused);
        surface.present()?;

        self.frames += 1;
        Ok(())
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => {
                info!("quit requested");
                self.running = false;
            }
            Action::WindLeft => self.engine.set_wind(-WIND_STEP),
            Action::WindRight => self.engine.set_wind(WIND_STEP),
            Action::IncreaseFuel => self.engine.add_fuel(FUEL_STEP),
            Action::DecreaseFuel => self.engine.add_fuel(-FUEL_STEP),
            Action::Reset => {
                info!("reset");
                self.engine.reset();
            }
            Action::TogglePause => self.paused = !self.paused,
            Action::CycleColors => {
                let scheme = self.ui.cycle_color_scheme();
                self.engine.set_color_scheme(scheme);
                info!(scheme = scheme.name(), "color scheme changed");
            }
            Action::ToggleHelp => self.ui.toggle_help(),
            Action::ToggleStats => self.ui.toggle_stats(),
            Action::Ignite { x, y } => {
                let origin = self.ui.layout().fire_origin;
                self.engine.ignite_at(x as i32, y as i32, origin);
            }
        }
    }

    /// Rebuild the layout and the grid for a new screen size
    fn resize(&mut self, width: u16, height: u16) {
        self.ui.resize(width, height);
        let layout = self.ui.layout();
        debug!(width, height, "resize");

        // Fresh grid at the new size; user controls carry over
        let scheme = self.engine.color_scheme();
        let (wind, fuel) = (self.engine.wind(), self.engine.fuel());
        self.seed = self.seed.wrapping_add(1);
        self.engine = FireEngine::new(layout.fire_width, layout.fire_height, self.seed);
        self.engine.set_color_scheme(scheme);
        self.engine.set_wind(wind);
        self.engine.add_fuel(fuel - self.engine.fuel());
        debug!(
            grid_width = self.engine.width(),
            grid_height = self.engine.height(),
            "grid rebuilt"
        );
    }
}

/// Show the title card until a key is pressed or the timeout passes
pub fn show_splash<S: Surface + ?Sized>(
    surface: &mut S,
    timeout: Duration,
    shutdown: &AtomicBool,
) -> io::Result<()> {
    let (w, h) = surface.size();
    let (w, h) = (w as i32, h as i32);

    let box_w = 34;
    let box_h = 7;
    let x = (w - box_w) / 2;
    let y = (h - box_h) / 2;

    surface.clear();
    draw_box(surface, x, y, box_w, box_h, None, FireColor::Orange);
    for (i, (text, color)) in SPLASH_LINES.iter().enumerate() {
        let tx = x + (box_w - text.chars().count() as i32) / 2;
        surface.set_str(tx, y + 2 + i as i32, text, *color);
    }
    surface.present()?;

    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline && !shutdown.load(Ordering::Relaxed) {
        if let Some(InputEvent::Key(..)) = surface.poll_event()? {
            break;
        }
        thread::sleep(SPLASH_POLL);
    }
    Ok(())
}

/// Run a full session on `surface`. Returns the number of frames drawn.
pub fn run<S: Surface + ?Sized>(
    surface: &mut S,
    config: &FireConfig,
    shutdown: &AtomicBool,
) -> io::Result<u64> {
    surface.set_cursor_visible(false)?;
    if config.splash {
        show_splash(surface, SPLASH_TIMEOUT, shutdown)?;
    }

    let (width, height) = surface.size();
    let mut app = App::new(config, width, height);
    let frame_time = config.frame_duration();
    info!(fps = config.fps, scheme = config.scheme.name(), "starting main loop");

    while app.is_running() && !shutdown.load(Ordering::Relaxed) {
        let start = Instant::now();
        app.frame(surface)?;

        let elapsed = start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    surface.set_cursor_visible(true)?;
    info!(frames = app.frames(), "main loop finished");
    Ok(app.frames())
}
