use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Args;
use petal_graph::{GeoPoint, RoadNetwork};
use petal_planner::{
    CircularRouteRequest, PlannerParams, PointToPointRequest, RouteOutput, RoutePlanner, Threads,
};
use tracing::info;

use crate::{
    elevation_source::{ElevationArea, ElevationSource, load_elevations},
    parsers,
    summary::route_table,
};

#[derive(Args)]
pub struct NetworkArgs {
    /// Road network JSON file
    #[arg(short, long)]
    graph: PathBuf,

    #[arg(long, value_enum, default_value_t = ElevationSource::Graph)]
    elevation_source: ElevationSource,

    /// Worker threads (default: all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write the route JSON to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
pub struct LoopArgs {
    #[command(flatten)]
    network: NetworkArgs,

    /// Start coordinates as "lat, lng"
    #[arg(short, long, value_parser = parsers::parse_coordinates)]
    start: GeoPoint,

    /// Loop length in meters
    #[arg(short, long)]
    length: f64,

    /// Elevation gain target in meters
    #[arg(short, long)]
    elevation: Option<f64>,

    /// Hardened surface target in percent
    #[arg(long)]
    hardened: Option<f64>,

    /// Steepest grade allowed, in percent
    #[arg(long)]
    max_steepness: Option<f64>,

    #[arg(long, default_value_t = 64)]
    leaves: usize,

    #[arg(long, default_value_t = 5)]
    points_per_leaf: usize,

    #[arg(long, default_value_t = 1.0)]
    variance: f64,
}

#[derive(Args)]
pub struct RouteArgs {
    #[command(flatten)]
    network: NetworkArgs,

    /// Start coordinates as "lat, lng"
    #[arg(short, long, value_parser = parsers::parse_coordinates)]
    start: GeoPoint,

    /// End coordinates as "lat, lng"
    #[arg(long, value_parser = parsers::parse_coordinates)]
    end: GeoPoint,
}

fn threads(threads: Option<usize>) -> Threads {
    match threads {
        None => Threads::Auto,
        Some(1) => Threads::Single,
        Some(threads) => Threads::Multi(threads),
    }
}

fn write_output(output: &RouteOutput, path: Option<&Path>) -> Result<(), anyhow::Error> {
    match path {
        Some(path) => {
            println!("{}", route_table(output));

            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, output)?;
            writer.flush()?;
            info!("Route written to {:?}", path);
        }
        None => {
            eprintln!("{}", route_table(output));
            println!("{}", serde_json::to_string_pretty(output)?);
        }
    }

    Ok(())
}

pub async fn run_loop(args: LoopArgs) -> Result<(), anyhow::Error> {
    let network = RoadNetwork::from_json_file(&args.network.graph)?;
    let area = ElevationArea::around_loop(args.start, args.length, args.variance);
    let elevations = load_elevations(args.network.elevation_source, &network, area).await?;

    let params = PlannerParams {
        leaf_count: args.leaves,
        points_per_leaf: args.points_per_leaf,
        variance: args.variance,
        threads: threads(args.network.threads),
        ..PlannerParams::default()
    };
    let planner = RoutePlanner::new(&network, elevations.as_ref(), params);

    let request = CircularRouteRequest {
        start: args.start,
        length: args.length,
        elevation_gain: args.elevation,
        hardened_percentage: args.hardened,
        max_steepness: args.max_steepness,
    };
    let output = planner.plan_circular_route(&request)?;

    write_output(&output, args.network.out.as_deref())
}

pub async fn run_route(args: RouteArgs) -> Result<(), anyhow::Error> {
    let network = RoadNetwork::from_json_file(&args.network.graph)?;
    let area = ElevationArea::around_route(args.start, args.end);
    let elevations = load_elevations(args.network.elevation_source, &network, area).await?;

    let params = PlannerParams {
        threads: threads(args.network.threads),
        ..PlannerParams::default()
    };
    let planner = RoutePlanner::new(&network, elevations.as_ref(), params);

    let output = planner.plan_route(&PointToPointRequest {
        start: args.start,
        end: args.end,
    })?;

    write_output(&output, args.network.out.as_deref())
}
