use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser, Subcommand};
use sightline::geodesy::GeoPoint;
use std::str::FromStr;

/// Find where a line of sight meets the terrain.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Elevation API key.
    #[arg(long, env = "SEETHERE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Elevation API endpoint, overriding the default.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Elevation request timeout, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Use synthetic terrain rising at this grade (m/m) away from the
    /// first position, instead of the elevation API.
    #[arg(long)]
    pub synthetic: Option<f64>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Search for the sight line's first terrain intersection.
    Search(SearchArgs),

    /// Print the ground elevation at a point.
    Point {
        /// "lat,lon"
        #[arg(long)]
        at: LatLon,
    },

    /// Print a sampled elevation path as CSV.
    Path {
        /// Start "lat,lon".
        #[arg(long)]
        from: LatLon,

        /// End "lat,lon".
        #[arg(long)]
        to: LatLon,

        /// Sample spacing, in meters.
        #[arg(long, default_value_t = 10.0)]
        spacing: f64,
    },
}

#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Observer "lat,lon".
    #[arg(long)]
    pub from: LatLon,

    /// Observer altitude in meters, above mean sea level unless
    /// `--agl` is given.
    #[arg(long, allow_hyphen_values = true)]
    pub alt: f64,

    /// Treat `--alt` as meters above ground.
    #[arg(long, default_value_t = false)]
    pub agl: bool,

    /// Vertical accuracy of `--alt`, in meters.
    #[arg(long, default_value_t = 0.0)]
    pub uncertainty: f64,

    /// Compass bearing in degrees, clockwise from north.
    #[arg(long)]
    pub bearing: f64,

    /// Degrees above horizontal; negative looks down.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pitch: f64,

    /// Print the outcome as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// A "lat,lon" pair in degrees.
#[derive(Clone, Debug, Copy)]
pub struct LatLon(pub GeoPoint);

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid lat,lon"))?;
        let lat = f64::from_str(lat_str.trim())?;
        let lon = f64::from_str(lon_str.trim())?;
        Ok(Self(GeoPoint::new(lat, lon)?))
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, LatLon};
    use clap::Parser;

    #[test]
    fn test_parse_lat_lon() {
        let LatLon(point) = "44.2705,-71.30325".parse().unwrap();
        assert_eq!(point.latitude(), 44.2705);
        assert_eq!(point.longitude(), -71.30325);
        assert!("44.2705".parse::<LatLon>().is_err());
        assert!("91,0".parse::<LatLon>().is_err());
        assert!("north,0".parse::<LatLon>().is_err());
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "seethere",
            "--synthetic",
            "0.02",
            "search",
            "--from",
            "0,0",
            "--alt",
            "100",
            "--bearing",
            "90",
            "--pitch",
            "-1.5",
        ])
        .unwrap();
        assert_eq!(cli.synthetic, Some(0.02));
        let Command::Search(args) = cli.cmd else {
            panic!("expected search");
        };
        assert_eq!(args.pitch, -1.5);
        assert_eq!(args.uncertainty, 0.0);
        assert!(!args.agl && !args.json);
    }
}
