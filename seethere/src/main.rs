mod options;

use anyhow::{anyhow, Error as AnyError};
use clap::Parser;
use log::info;
use options::{Cli, Command as CliCmd, LatLon, SearchArgs};
use serde::Serialize;
use sightline::{
    elevation::{ElevationConfig, ElevationProvider, GoogleElevation, RadialTerrain},
    geodesy::{surface_distance, to_radians, GeoPoint},
    Observer, SearchOutcome, Walker,
};
use std::{io::Write, sync::Arc, time::Duration};

type Provider = Arc<dyn ElevationProvider + Send + Sync>;

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();
    env_logger::init();

    let anchor = match &cli.cmd {
        CliCmd::Search(SearchArgs { from, .. }) | CliCmd::Path { from, .. } => from.0,
        CliCmd::Point { at } => at.0,
    };
    let provider = provider(&cli, anchor)?;

    match cli.cmd {
        CliCmd::Search(args) => search(provider, &args)?,
        CliCmd::Point { at: LatLon(at) } => {
            let elevation = provider.point_elevation(at)?;
            println!("{elevation}");
        }
        CliCmd::Path {
            from: LatLon(from),
            to: LatLon(to),
            spacing,
        } => print_csv(&provider, from, to, spacing)?,
    }
    Ok(())
}

fn provider(cli: &Cli, anchor: GeoPoint) -> Result<Provider, AnyError> {
    if let Some(grade) = cli.synthetic {
        info!("using synthetic terrain; anchor: {anchor}, grade: {grade}");
        return Ok(Arc::new(RadialTerrain::new(anchor, move |d| d * grade)));
    }

    let api_key = cli
        .api_key
        .clone()
        .ok_or_else(|| anyhow!("an API key is required unless --synthetic is given"))?;
    let mut config = ElevationConfig::new(api_key).with_timeout(Duration::from_secs(cli.timeout));
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    Ok(Arc::new(GoogleElevation::new(config)?))
}

fn search(provider: Provider, args: &SearchArgs) -> Result<(), AnyError> {
    let walker = Walker::new(provider);
    let position = args.from.0;
    let altitude = if args.agl {
        walker.ground_altitude(position, args.alt)?
    } else {
        args.alt
    };

    let observer = observer(args, altitude)?;
    let outcome = sightline::spawn(walker, observer).join();
    let report = Report::new(&observer, &outcome);

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else if let (Some(lat), Some(lon)) = (report.latitude, report.longitude) {
        println!(
            "{}: {lat},{lon} ({:.0} m)",
            report.kind,
            report.distance_m.unwrap_or_default()
        );
    }

    match outcome {
        SearchOutcome::Failed(err) => Err(err.into()),
        _ => Ok(()),
    }
}

/// Builds the observer from command line degrees.
fn observer(args: &SearchArgs, altitude: f64) -> Result<Observer, AnyError> {
    Ok(Observer::builder()
        .position(args.from.0)
        .altitude(altitude)
        .vertical_uncertainty(args.uncertainty)
        .pitch(to_radians(args.pitch))
        .bearing(to_radians(args.bearing))
        .build()?)
}

#[derive(Serialize)]
struct Report {
    kind: &'static str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    distance_m: Option<f64>,
    error: Option<String>,
}

impl Report {
    fn new(observer: &Observer, outcome: &SearchOutcome) -> Self {
        let kind = match outcome {
            SearchOutcome::Intersection(_) => "intersection",
            SearchOutcome::Fallback(_) => "fallback",
            SearchOutcome::Failed(_) => "failed",
        };
        let point = outcome.point();
        Self {
            kind,
            latitude: point.map(|p| p.latitude()),
            longitude: point.map(|p| p.longitude()),
            distance_m: point.map(|p| surface_distance(observer.position(), p)),
            error: outcome.error().map(ToString::to_string),
        }
    }
}

/// # Example with gnuplot
///
/// ```sh
/// seethere --synthetic 0.01 path --from 0,0 --to 0,0.04 | tr ',' ' ' > /tmp/path && gnuplot -p -e "plot '/tmp/path' using 1:4 with lines"
/// ```
fn print_csv(
    provider: &Provider,
    from: GeoPoint,
    to: GeoPoint,
    spacing: f64,
) -> Result<(), AnyError> {
    let path = provider.path_elevation(from, to, spacing)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,Latitude,Longitude,Elevation")?;
    for sample in path {
        let distance = surface_distance(from, sample.location);
        let latitude = sample.location.latitude();
        let longitude = sample.location.longitude();
        let elevation = sample.elevation_m;
        writeln!(stdout, "{distance},{latitude},{longitude},{elevation}")?;
    }
    Ok(())
}
