mod ui;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::warn;
use trackscope::{
    AppConfig, HoverThresholds, InteractionState, LatLng, TrackscopeError, classify_with,
    compute_bounds, filter_points, load_points, nearest, writer,
};
use ui::track_view::TrackViewerApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the track viewer
    View {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the track point closest to a location and its hover zone
    Inspect {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Override the on-track distance in meters
        #[arg(long)]
        tracking_m: Option<f64>,

        /// Override the near-track distance in meters
        #[arg(long)]
        hovering_m: Option<f64>,
    },
    /// Print the viewport that fits the whole track
    Bounds {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Write the accepted track points as JSON Lines
    Filter {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn view(config: AppConfig, input: Option<PathBuf>) -> Result<(), TrackscopeError> {
    let input = input.or_else(|| config.last_dataset.clone());
    let config_path = AppConfig::default_path()
        .inspect_err(|e| warn!("Dataset path will not be remembered: {}", e))
        .ok();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options.viewport.with_inner_size(Vec2::new(
        config.window_size.width,
        config.window_size.height,
    ));

    eframe::run_native(
        "Trackscope",
        native_options,
        Box::new(move |_cc| Ok(Box::new(TrackViewerApp::new(config, config_path, input)))),
    )
    .map_err(|e| TrackscopeError::ViewerError {
        description: e.to_string(),
    })
}

fn inspect(
    input: &Path,
    cursor: LatLng,
    thresholds: HoverThresholds,
) -> Result<(), TrackscopeError> {
    thresholds.validate()?;
    let raw_points = load_points(input)?;
    let track = filter_points(&raw_points);
    let result = nearest(cursor, &track);
    let state = classify_with(&result, &thresholds);

    println!("Track points: {} of {}", track.len(), raw_points.len());
    match result.point() {
        Some(point) => println!(
            "Nearest point #{} at ({}, {}), {:.1} m away",
            result.index().unwrap_or_default(),
            point.position.lat,
            point.position.lng,
            result.distance_m
        ),
        None => println!("Nearest point: none"),
    }

    match state {
        InteractionState::NoSelection => println!("State: no selection"),
        InteractionState::Hovering { index } => println!("State: hovering near point #{}", index),
        InteractionState::Tracking { index } => {
            println!("State: tracking point #{}", index);
            if let Some(popup) = state.markers(&track).detail.and_then(|m| m.popup) {
                println!("{}", popup);
            }
        }
    }
    Ok(())
}

fn bounds(input: &Path) -> Result<(), TrackscopeError> {
    let track = filter_points(&load_points(input)?);
    match compute_bounds(&track) {
        Ok(viewport) => {
            println!(
                "South-west: ({}, {})",
                viewport.south_west.lat, viewport.south_west.lng
            );
            println!(
                "North-east: ({}, {})",
                viewport.north_east.lat, viewport.north_east.lng
            );
            Ok(())
        }
        Err(TrackscopeError::EmptyTrack) => {
            println!("Track is empty, nothing to fit");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn filter(input: &Path, output: &Path) -> Result<(), TrackscopeError> {
    let raw_points = load_points(input)?;
    let track = filter_points(&raw_points);
    let written = writer::write_track(output, &track)?;
    println!(
        "Wrote {} of {} points to {}",
        written,
        raw_points.len(),
        output.display()
    );
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let config = AppConfig::load_or_default().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        AppConfig::default()
    });

    let result = match &cli.command {
        Commands::View { input } => view(config, input.clone()),
        Commands::Inspect {
            input,
            lat,
            lon,
            tracking_m,
            hovering_m,
        } => {
            let defaults = config.map.thresholds;
            let thresholds = HoverThresholds {
                tracking_m: tracking_m.unwrap_or(defaults.tracking_m),
                hovering_m: hovering_m.unwrap_or(defaults.hovering_m),
            };
            inspect(input, LatLng::new(*lat, *lon), thresholds)
        }
        Commands::Bounds { input } => bounds(input),
        Commands::Filter { input, output } => filter(input, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
