use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mapcircle::{init_logging_with, Circle, Config, Spherical};
use mapcircle_editor::CircleGeometry;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "mapcircle", version, about = "Geodesic circle geometry as GeoJSON")]
struct Cli {
    /// Config file (.json or .toml); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the circle polygon feature
    Polygon(CircleArgs),
    /// Print the southwest and northeast corners of the circle's bounds
    Bounds(CircleArgs),
}

#[derive(Args, Debug)]
struct CircleArgs {
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Radius in meters, clamped to the configured bounds
    #[arg(long)]
    radius: f64,

    /// Map zoom used for refined step counts
    #[arg(long, default_value_t = 0.0)]
    zoom: f64,

    /// Scale the polygon step count with zoom and radius
    #[arg(long)]
    refine: bool,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            Err(_) => Config::default(),
        },
    };
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config)?;
    init_logging_with(&config.logging)?;

    let (args, bounds_only) = match &cli.command {
        Command::Polygon(args) => (args, false),
        Command::Bounds(args) => (args, true),
    };

    let mut options = config.circle.clone();
    options.refine_stroke |= args.refine;
    let circle = Circle::new([args.lng, args.lat], args.radius, options.clone())
        .context("invalid circle")?;
    let shape = CircleGeometry::recompute(
        circle.center(),
        circle.radius(),
        args.zoom,
        &options,
        &Spherical,
    );
    tracing::debug!(steps = shape.steps, radius = shape.radius, "computed circle");

    let output = if bounds_only {
        let bbox = shape
            .bounds(&Spherical)
            .context("circle polygon has no vertices")?;
        json!([bbox.southwest().to_array(), bbox.northeast().to_array()])
    } else {
        shape.polygon_data()
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
