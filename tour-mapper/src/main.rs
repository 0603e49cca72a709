use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tour_mapper::domain::{Profile, RegionRecord, Srs, aggregate};
use tour_mapper::geocode::{GeocodeClient, GeocoderConfig};
use tour_mapper::map::{MapRenderer, MapStyle, MapboxConfig, MapboxStatic, compose_scene};
use tour_mapper::regions::{filter_regions, load_regions};
use tour_mapper::routing::{RoutingClient, RoutingConfig};
use tour_mapper::track::write_track;
use tour_mapper::trip::{TripConfig, TripPlan, plan, select_day};

/// Assemble a multi-day bike or foot tour from an ordered list of stops.
#[derive(Debug, Parser)]
#[command(name = "tour-mapper", version, about)]
struct Args {
    /// Stop names in trip order
    #[arg(required_unless_present = "stops_file")]
    stops: Vec<String>,

    /// Read stop names from a file instead (one per line, '#' starts a comment)
    #[arg(long, value_name = "FILE")]
    stops_file: Option<PathBuf>,

    /// Boundary dataset (GeoJSON FeatureCollection) for region polygons
    #[arg(long, value_name = "FILE")]
    boundaries: Option<PathBuf>,

    /// Feature property holding the region code in the boundary dataset
    #[arg(long, default_value = "code", value_name = "NAME")]
    region_code_property: String,

    /// Region code to keep (repeatable); no codes keeps all regions
    #[arg(long = "region-code", value_name = "CODE")]
    region_codes: Vec<String>,

    /// Target spatial reference (EPSG:4326, EPSG:326NN or utm:NN)
    #[arg(long, default_value = "EPSG:32633", value_name = "SRS")]
    srs: String,

    /// Travel profile: bike or foot
    #[arg(long, default_value = "bike")]
    profile: String,

    /// Write a GPX track file with the stops and routed paths
    #[arg(long)]
    gpx: bool,

    /// Fetch static map images (requires MAPBOX_ACCESS_TOKEN)
    #[arg(long)]
    render: bool,

    /// Also fetch one map image per day
    #[arg(long)]
    per_day: bool,

    /// Output directory for maps and track files
    #[arg(long, default_value = "out", value_name = "DIR")]
    output_dir: PathBuf,

    /// Override the geocoding service base URL
    #[arg(long, value_name = "URL")]
    geocoder_url: Option<String>,

    /// Override the routing service base URL
    #[arg(long, value_name = "URL")]
    router_url: Option<String>,

    /// Maximum concurrent requests per service
    #[arg(long, default_value_t = 5)]
    max_concurrent: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let names = read_stop_names(&args)?;
    let profile: Profile = args.profile.parse()?;
    let target_srs = Srs::parse(&args.srs)?;

    let config = TripConfig {
        boundary_path: args.boundaries.clone(),
        region_code_property: args.region_code_property.clone(),
        accepted_codes: args.region_codes.iter().cloned().collect(),
        target_srs,
        profile,
        emit_track: args.gpx,
    };

    let mut geocoder_config = GeocoderConfig::new().with_max_concurrent(args.max_concurrent);
    if let Some(url) = &args.geocoder_url {
        geocoder_config = geocoder_config.with_base_url(url);
    }
    let geocoder = GeocodeClient::new(geocoder_config)?;

    let mut routing_config = RoutingConfig::new().with_max_concurrent(args.max_concurrent);
    if let Some(url) = &args.router_url {
        routing_config = routing_config.with_base_url(url);
    }
    let router = RoutingClient::new(routing_config)?;

    // Region polygons for the map scenes. Kept in WGS84, which the static
    // map renderer requires; the reprojecting filter is also what scopes
    // the dataset to the accepted codes.
    let regions = match &config.boundary_path {
        Some(path) => {
            let loaded = load_regions(path, &config.region_code_property)?;
            filter_regions(&loaded, &config.accepted_codes, Srs::Wgs84)?
        }
        None => Vec::new(),
    };

    let trip = plan(&geocoder, &router, &names, &config).await?;

    print_summary(&trip);

    std::fs::create_dir_all(&args.output_dir)?;

    if config.emit_track {
        let path = args.output_dir.join("tour.gpx");
        write_track(&path, &trip.stops, &trip.legs)?;
        println!("Track written to {}", path.display());
    }

    if args.render {
        render_maps(&args, &trip, &regions).await?;
    }

    Ok(())
}

fn read_stop_names(args: &Args) -> Result<Vec<String>, std::io::Error> {
    match &args.stops_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect())
        }
        None => Ok(args.stops.clone()),
    }
}

fn print_summary(trip: &TripPlan) {
    println!(
        "Tour: {} stops, {} legs",
        trip.stops.len(),
        trip.legs.len()
    );
    println!(
        "Total: {} / {}",
        trip.statistics.formatted_distance(),
        trip.statistics.formatted_duration()
    );

    for day in 1..=trip.day_count() {
        for leg in select_day(&trip.legs, day) {
            let stats = aggregate(&[leg.clone()]);
            let detail = if leg.is_resolved() {
                format!(
                    "{} / {}",
                    stats.formatted_distance(),
                    stats.formatted_duration()
                )
            } else {
                "unrouted".to_string()
            };
            println!(
                "  Day {}: {} -> {}  {}",
                day,
                leg.origin().name,
                leg.destination().name,
                detail
            );
        }
    }

    if !trip.failures.is_empty() {
        println!();
        println!(
            "{} leg(s) could not be routed and are excluded from the totals:",
            trip.failures.len()
        );
        for failure in &trip.failures {
            println!(
                "  leg {}: {} -> {}: {}",
                failure.leg_index + 1,
                failure.origin,
                failure.destination,
                failure.reason
            );
        }
    }
}

async fn render_maps(
    args: &Args,
    trip: &TripPlan,
    regions: &[RegionRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    let token = match std::env::var("MAPBOX_ACCESS_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            eprintln!("Warning: MAPBOX_ACCESS_TOKEN not set; skipping map rendering.");
            return Ok(());
        }
    };

    let renderer = MapboxStatic::new(MapboxConfig::new(token))?;
    let style = MapStyle::default();

    // The static map service wants WGS84 scenes regardless of the trip's
    // target reference.
    let overview = compose_scene(regions, &trip.stops, &trip.legs, None, Srs::Wgs84)?;
    let overview_path = args.output_dir.join("tour-overview.png");
    let bytes = renderer.render(&overview, &style).await?;
    std::fs::write(&overview_path, bytes)?;
    println!("Map written to {}", overview_path.display());

    if args.per_day {
        for day in 1..=trip.day_count() {
            match compose_scene(regions, &trip.stops, &trip.legs, Some(day), Srs::Wgs84) {
                Ok(scene) => {
                    let path = args.output_dir.join(format!("tour-day-{day}.png"));
                    let bytes = renderer.render(&scene, &style).await?;
                    std::fs::write(&path, bytes)?;
                    println!("Map written to {}", path.display());
                }
                Err(e) => {
                    eprintln!("Skipping day {day} map: {e}");
                }
            }
        }
    }

    Ok(())
}
