use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use passcast::config::{parse_duration, Config};
use passcast::predict::{
    evaluate, find_passes, load_tle_file, ElementSet, Observer, Propagator, SatelliteModel,
};
use passcast::track::{link_metrics, track_sample};

#[derive(Parser)]
#[command(name = "passcast")]
#[command(about = "Satellite pass prediction and link budget")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Target {
    /// TLE file (2-line or 3-line records)
    tle: PathBuf,
    /// Satellite name or NORAD id, defaults to the first record
    #[arg(long)]
    satellite: Option<String>,
    /// Observer as "lat, lon" in degrees, overrides the config station
    #[arg(long, allow_hyphen_values = true)]
    station: Option<String>,
    /// Observer altitude in km
    #[arg(long)]
    altitude_km: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict passes over the station
    Passes {
        #[command(flatten)]
        target: Target,
        /// Window start (RFC3339), defaults to now
        #[arg(long)]
        start: Option<String>,
        /// Window length
        #[arg(long, default_value = "24h")]
        duration: String,
        /// Sampling step, overrides the config
        #[arg(long)]
        step: Option<String>,
        /// Bisect horizon crossings to one second
        #[arg(long)]
        refine: bool,
        /// Drop passes peaking below this elevation (degrees)
        #[arg(long)]
        min_elevation: Option<f64>,
    },
    /// Propagate to one instant and report visibility and link metrics
    Track {
        #[command(flatten)]
        target: Target,
        /// Instant (RFC3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(Config::from_file).transpose() {
        Ok(c) => c.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Passes {
            target,
            start,
            duration,
            step,
            refine,
            min_elevation,
        } => passes(&config, &target, start, &duration, step, refine, min_elevation),
        Commands::Track { target, at } => track(&config, &target, at),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn passes(
    config: &Config,
    target: &Target,
    start: Option<String>,
    duration: &str,
    step: Option<String>,
    refine: bool,
    min_elevation: Option<f64>,
) -> Result<String, Box<dyn Error>> {
    let (model, observer, station) = resolve_target(config, target)?;

    let mut search = config.pass_search()?;
    if let Some(step) = step {
        search.step = parse_duration(&step)?;
    }
    search.refine |= refine;
    if let Some(min_el) = min_elevation {
        search.min_elevation_deg = min_el;
    }

    let start = parse_instant(start)?;
    let end = start
        .checked_add_signed(parse_duration(duration)?)
        .ok_or_else(|| format!("window end {} after {} is out of range", duration, start))?;

    log::info!(
        "Searching passes of {} from {} to {} (step {}s)",
        model.name(),
        start,
        end,
        search.step.num_seconds()
    );
    let passes = find_passes(&model, &observer, start, end, &search)?;
    log::info!("Found {} passes", passes.len());

    let output = json!({
        "satellite": model.name(),
        "norad_id": model.norad_id(),
        "station": station,
        "observer": observer,
        "start": start,
        "end": end,
        "passes": passes,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn track(config: &Config, target: &Target, at: Option<String>) -> Result<String, Box<dyn Error>> {
    let (model, observer, station) = resolve_target(config, target)?;
    let at = parse_instant(at)?;

    let state = model.propagate(at)?;
    let visibility = evaluate(state.position_km, &observer);
    let sample = track_sample(&state, &observer, &config.frequency_plan()?);
    let link = config
        .link_params()?
        .map(|params| link_metrics(&state, &observer, &params))
        .transpose()?;

    let output = json!({
        "satellite": model.name(),
        "norad_id": model.norad_id(),
        "station": station,
        "observer": observer,
        "state": state,
        "altitude_km": state.altitude_km(),
        "visibility": visibility,
        "sample": sample,
        "link": link,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

fn resolve_target(
    config: &Config,
    target: &Target,
) -> Result<(SatelliteModel, Observer, Option<String>), Box<dyn Error>> {
    let sets = load_tle_file(&target.tle)?;
    let set = select(&sets, target.satellite.as_deref()).ok_or_else(|| {
        format!(
            "satellite {:?} not found in {}",
            target.satellite,
            target.tle.display()
        )
    })?;
    let model = SatelliteModel::new(set)?;

    let (observer, station) = match &target.station {
        Some(coordinates) => (
            Observer::from_coordinates(coordinates, target.altitude_km)?,
            None,
        ),
        None => {
            let observer = config
                .observer()?
                .ok_or("no station given (use --station or a config file)")?;
            let observer = match target.altitude_km {
                Some(alt) => {
                    Observer::with_altitude(observer.latitude_deg, observer.longitude_deg, alt)?
                }
                None => observer,
            };
            (observer, config.station_name().map(str::to_string))
        }
    };

    Ok((model, observer, station))
}

fn select<'a>(sets: &'a [ElementSet], wanted: Option<&str>) -> Option<&'a ElementSet> {
    let Some(wanted) = wanted else {
        return sets.first();
    };
    let wanted = wanted.trim();
    let wanted_id = wanted.parse::<u64>().ok();
    sets.iter().find(|set| {
        let norad_id = set.line1[2..7].trim().parse::<u64>().ok();
        (wanted_id.is_some() && norad_id == wanted_id)
            || set
                .name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
    })
}

fn parse_instant(value: Option<String>) -> Result<DateTime<Utc>, Box<dyn Error>> {
    match value {
        Some(s) => Ok(DateTime::parse_from_rfc3339(&s)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}
