use crate::colors::ColorScheme;
use crate::fire::{DEFAULT_FUEL, MAX_FUEL};
use crate::settings::FireSettings;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::warn;

pub const DEFAULT_FPS: u32 = 30;
pub const MAX_FPS: u32 = 120;

/// Values given on the command line; `None` defers to the settings file
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub fps: Option<u32>,
    pub scheme: Option<ColorScheme>,
    pub fuel: Option<i32>,
    pub no_splash: bool,
    pub no_mouse: bool,
}

/// Resolved run configuration
#[derive(Clone, Debug, PartialEq)]
pub struct FireConfig {
    pub seed: u64,
    pub fps: u32,
    pub scheme: ColorScheme,
    pub fuel: i32,
    pub splash: bool,
    pub mouse: bool,
}

impl FireConfig {
    /// Merge command-line values over the settings file over defaults
    pub fn resolve(cli: Overrides, file: &FireSettings) -> Self {
        let file_scheme = file.scheme.as_deref().and_then(|name| {
            let scheme = ColorScheme::from_name(name);
            if scheme.is_none() {
                warn!(scheme = name, "unknown color scheme in settings");
            }
            scheme
        });

        let seed = cli.seed.or(file.seed).unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0) // Fallback seed for misconfigured system clocks
        });

        Self {
            seed,
            fps: cli.fps.or(file.fps).unwrap_or(DEFAULT_FPS).clamp(1, MAX_FPS),
            scheme: cli.scheme.or(file_scheme).unwrap_or_default(),
            fuel: cli.fuel.or(file.fuel).unwrap_or(DEFAULT_FUEL).clamp(0, MAX_FUEL),
            splash: !cli.no_splash && file.splash.unwrap_or(true),
            mouse: !cli.no_mouse && file.mouse.unwrap_or(true),
        }
    }

    /// Target time per frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_sources() {
        let config = FireConfig::resolve(
            Overrides {
                seed: Some(1),
                ..Default::default()
            },
            &FireSettings::default(),
        );
        assert_eq!(config.fps, 30);
        assert_eq!(config.fuel, 50);
        assert_eq!(config.scheme, ColorScheme::Classic);
        assert!(config.splash);
        assert!(config.mouse);
    }

    #[test]
    fn command_line_beats_file() {
        let file = FireSettings {
            scheme: Some("matrix".into()),
            fuel: Some(80),
            fps: Some(60),
            seed: Some(5),
            splash: Some(true),
            mouse: None,
        };
        let cli = Overrides {
            scheme: Some(ColorScheme::Ice),
            fuel: Some(20),
            no_splash: true,
            ..Default::default()
        };
        let config = FireConfig::resolve(cli, &file);
        assert_eq!(config.scheme, ColorScheme::Ice);
        assert_eq!(config.fuel, 20);
        assert_eq!(config.fps, 60);
        assert_eq!(config.seed, 5);
        assert!(!config.splash);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let file = FireSettings {
            fuel: Some(500),
            fps: Some(0),
            scheme: Some("nope".into()),
            ..Default::default()
        };
        let config = FireConfig::resolve(Overrides::default(), &file);
        assert_eq!(config.fuel, 100);
        assert_eq!(config.fps, 1);
        assert_eq!(config.scheme, ColorScheme::Classic);
    }

    #[test]
    fn command_line_values_are_clamped() {
        let settings = FireSettings::default();
        let slow = FireConfig::resolve(
            Overrides {
                fps: Some(0),
                fuel: Some(-5),
                ..Default::default()
            },
            &settings,
        );
        assert_eq!(slow.fps, 1);
        assert_eq!(slow.fuel, 0);
        assert_eq!(slow.frame_duration(), Duration::from_secs(1));

        let fast = FireConfig::resolve(
            Overrides {
                fps: Some(500),
                ..Default::default()
            },
            &settings,
        );
        assert_eq!(fast.fps, MAX_FPS);
    }

    #[test]
    fn frame_time_follows_fps() {
        let config = FireConfig::resolve(
            Overrides {
                fps: Some(50),
                seed: Some(0),
                ..Default::default()
            },
            &FireSettings::default(),
        );
        assert_eq!(config.frame_duration(), Duration::from_millis(20));
    }
}
