use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hifitime::Epoch;
use orrery_core::{parse_hex, Degrees};
use orrery_render::{RenderAdapter, SvgCanvas, Theme, Viewport};
use orrery_sim::{projector, BodyId, JulianDate, SolarSystem, TimeController};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Inner solar system orrery")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show planet positions from Keplerian propagation
    Positions {
        /// Epoch (ISO format or "now")
        #[arg(short, long, default_value = "now")]
        epoch: String,
        /// POSIX seconds, overrides --epoch
        #[arg(long)]
        unix: Option<f64>,
        /// Output frame
        #[arg(long, value_enum, default_value_t = Frame::Display)]
        frame: Frame,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render a single frame to SVG
    Render {
        #[arg(short, long, default_value = "orrery.svg")]
        output: PathBuf,
        #[arg(long, default_value = "1920")]
        width: u32,
        #[arg(long, default_value = "1080")]
        height: u32,
        /// Theme JSON (defaults to the built-in palette)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Epoch (ISO format or "now")
        #[arg(short, long, default_value = "now")]
        epoch: String,
        /// POSIX seconds, overrides --epoch
        #[arg(long)]
        unix: Option<f64>,
    },

    /// Time simulation (prints Earth-Mars separation as time advances)
    TimeSim {
        /// Starting epoch
        #[arg(short, long, default_value = "2000-01-01T00:00:00 UTC")]
        epoch: String,
        /// Time rate (years per second)
        #[arg(long, default_value = "1")]
        rate: f64,
        /// Run backwards
        #[arg(long)]
        reverse: bool,
        /// Pause once this decimal year is reached
        #[arg(long)]
        stop_year: Option<f64>,
        /// Duration to simulate (seconds of real time)
        #[arg(long, default_value = "10")]
        duration: f64,
        /// Sleep between steps as if running live
        #[arg(long)]
        realtime: bool,
    },

    /// Print the default theme as JSON
    Theme,

    /// Parse a hex color (RGB, RGBA, optional '#')
    Color { hex: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Frame {
    /// Ecliptic projection de-rotated by the ascending node
    Display,
    /// Heliocentric J2000 ecliptic
    Ecliptic,
    /// Heliocentric J2000 equatorial
    Equatorial,
}

#[derive(Serialize)]
struct PositionRow {
    body: BodyId,
    x: f64,
    y: f64,
    z: f64,
    distance: f64,
    mean_anomaly: Degrees,
    eccentric_anomaly: Degrees,
    true_anomaly: Degrees,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_time(epoch: &str, unix: Option<f64>) -> Result<JulianDate> {
    if let Some(seconds) = unix {
        return Ok(JulianDate::from_posix_seconds(seconds));
    }
    if epoch.eq_ignore_ascii_case("now") {
        return Ok(JulianDate::now());
    }
    let epoch = Epoch::from_str(epoch).map_err(|e| anyhow::anyhow!("invalid epoch {epoch:?}: {e}"))?;
    Ok(JulianDate::from_epoch(epoch))
}

fn position_rows(system: &SolarSystem, frame: Frame) -> Vec<PositionRow> {
    system
        .states()
        .iter()
        .map(|state| {
            let el = &state.elements;
            let ea = state.solution.eccentric_anomaly;
            let (x, y, z) = match frame {
                Frame::Display => (state.position.x, state.position.y, 0.0),
                Frame::Ecliptic => {
                    let v = projector::ecliptic(el, ea);
                    (v.x, v.y, v.z)
                }
                Frame::Equatorial => {
                    let v = projector::equatorial(el, ea);
                    (v.x, v.y, v.z)
                }
            };
            PositionRow {
                body: state.body.id,
                x,
                y,
                z,
                distance: (x * x + y * y + z * z).sqrt(),
                mean_anomaly: el.mean_anomaly().normalized(),
                eccentric_anomaly: ea.normalized(),
                true_anomaly: el.true_anomaly(ea).normalized(),
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Positions { epoch, unix, frame, json } => {
            let t = resolve_time(&epoch, unix)?;
            let system = SolarSystem::at(t);
            let rows = position_rows(&system, frame);

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            println!("Keplerian positions at JD {} ({:?} frame):", t, frame);
            println!(
                "{:<10} {:>12} {:>12} {:>12} {:>10} {:>10} {:>10} {:>10}",
                "Body", "X (AU)", "Y (AU)", "Z (AU)", "Dist (AU)", "M (°)", "E (°)", "ν (°)"
            );
            for row in &rows {
                println!(
                    "{:<10} {:>12.6} {:>12.6} {:>12.6} {:>10.4} {:>10.3} {:>10.3} {:>10.3}",
                    row.body.name(),
                    row.x,
                    row.y,
                    row.z,
                    row.distance,
                    row.mean_anomaly.value(),
                    row.eccentric_anomaly.value(),
                    row.true_anomaly.value()
                );
            }
        }

        Commands::Render { output, width, height, config, epoch, unix } => {
            let theme = match &config {
                Some(path) => Theme::load_json(path)
                    .with_context(|| format!("loading theme {}", path.display()))?,
                None => Theme::default(),
            };
            let t = resolve_time(&epoch, unix)?;
            let system = SolarSystem::at(t);

            let viewport = Viewport::new(f64::from(width), f64::from(height));
            let mut canvas = SvgCanvas::new(width, height);
            let plan = RenderAdapter::new(&theme).render(system.frame(), viewport, &mut canvas);

            canvas
                .write_to(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(bodies = plan.bodies.len(), path = %output.display(), "frame written");
            println!("Rendered {} bodies at JD {} to {}", plan.bodies.len(), t, output.display());
        }

        Commands::TimeSim { epoch, rate, reverse, stop_year, duration, realtime } => {
            let epoch = Epoch::from_str(&epoch).map_err(|e| anyhow::anyhow!("invalid epoch: {e}"))?;
            let mut tc = TimeController::at_epoch(epoch);
            tc.set_rate_years_per_second(if reverse { -rate } else { rate });
            if let Some(year) = stop_year {
                tc.stop_at_year(year);
            }
            info!(years_per_second = tc.rate_years_per_second(), "starting time simulation");

            let mut system = SolarSystem::at(tc.julian());

            let steps = (duration * 10.0) as usize; // 10 updates per second
            let dt = 0.1;

            for _ in 0..steps {
                tc.tick(dt);
                system.set_time(tc.julian());

                if let Some(dist_au) = system.separation(BodyId::Earth, BodyId::Mars) {
                    println!("Year {:.1}: Earth-Mars distance = {:.3} AU", tc.year(), dist_au);
                }

                if tc.is_paused() {
                    println!("Paused at year {:.3}", tc.year());
                    break;
                }

                if realtime {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
        }

        Commands::Theme => {
            println!("{}", Theme::default().to_json_pretty()?);
        }

        Commands::Color { hex } => match parse_hex(&hex) {
            Ok(color) => {
                let [r, g, b, a] = color.to_rgba8();
                println!("{} -> rgba({r}, {g}, {b}, {a})", color.to_hex());
                println!("r={:.4} g={:.4} b={:.4} a={:.4}", color.r, color.g, color.b, color.a);
            }
            Err(e) => anyhow::bail!("{hex:?}: {e}"),
        },
    }

    Ok(())
}
