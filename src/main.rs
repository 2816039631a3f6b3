//! Command-line entry point running the walker cast in a window or headless.

use anyhow::Context;
use ceviwalk::constants::{
    DEFAULT_CELL_SIZE, DEFAULT_SPRITE_SHEET, DEFAULT_TICK_HZ, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH,
};
use ceviwalk::{drive, init_logging, CastSettings, CastState, IntervalTicker, LogRenderer, Viewport};
use clap::Parser;
use log::info;

/// Autonomous sprite walkers roaming a window
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Edge length of a sprite cell in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,
    /// Sprite sheet path relative to the asset directory
    #[arg(long, default_value = DEFAULT_SPRITE_SHEET)]
    sprite_sheet: String,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per second
    #[arg(long, default_value_t = DEFAULT_TICK_HZ)]
    tick_hz: f64,
    /// Viewport width in pixels (headless runs and until the window reports its size)
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: f64,
    /// Viewport height in pixels (headless runs and until the window reports its size)
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: f64,
    /// Run without a window and log the final cast snapshot
    #[arg(long)]
    headless: bool,
    /// Stop a headless run after this many ticks
    #[arg(long)]
    frames: Option<u64>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn settings(&self) -> CastSettings {
        CastSettings {
            cell_size: self.cell_size,
            tick_hz: self.tick_hz,
            viewport: Viewport::new(self.width, self.height),
            seed: self.seed,
            sprite_sheet: self.sprite_sheet.clone(),
        }
    }
}

fn run_headless(settings: &CastSettings, frames: Option<u64>) -> anyhow::Result<()> {
    let mut state = CastState::from_settings(settings).context("failed to spawn the cast")?;
    let mut ticker = IntervalTicker::from_hz(settings.tick_hz)?;
    if let Some(limit) = frames {
        ticker = ticker.with_limit(limit);
    }

    let mut renderer = LogRenderer;
    let ticks = drive(&mut ticker, || state.advance(&mut renderer));

    let snapshot = serde_json::to_string_pretty(&state.cast.snapshot())
        .context("failed to serialise the cast snapshot")?;
    info!("cast after {ticks} ticks:\n{snapshot}");
    Ok(())
}

#[cfg(feature = "render")]
fn run_windowed(settings: CastSettings) -> anyhow::Result<()> {
    use bevy::image::ImagePlugin;
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use ceviwalk::{PresentationPlugin, WalkerPlugin};

    let exit = App::new()
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "ceviwalk".to_owned(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins((WalkerPlugin { settings }, PresentationPlugin))
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}

#[cfg(not(feature = "render"))]
fn run_windowed(settings: CastSettings) -> anyhow::Result<()> {
    info!("built without the `render` feature; running headless");
    run_headless(&settings, None)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = args.settings();
    if args.headless {
        run_headless(&settings, args.frames)
    } else {
        run_windowed(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[rstest]
    fn defaults_match_cast_settings() {
        let args = Args::try_parse_from(["ceviwalk"]).unwrap();
        assert_eq!(args.settings(), CastSettings::default());
        assert!(!args.headless);
    }

    #[rstest]
    fn flags_reach_the_settings() {
        let args = Args::try_parse_from([
            "ceviwalk",
            "--headless",
            "--frames",
            "10",
            "--seed",
            "9",
            "--width",
            "320",
            "--height",
            "240",
            "--tick-hz",
            "30",
        ])
        .unwrap();
        let settings = args.settings();
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.viewport, Viewport::new(320.0, 240.0));
        assert!((settings.tick_hz - 30.0).abs() < f64::EPSILON);
        assert_eq!(args.frames, Some(10));
    }

    #[rstest]
    fn headless_run_stops_at_frame_limit() {
        let settings = CastSettings {
            seed: Some(1),
            tick_hz: 1_000.0,
            ..CastSettings::default()
        };
        assert!(run_headless(&settings, Some(5)).is_ok());
    }
}
