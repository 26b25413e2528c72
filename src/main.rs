use std::env;
use std::io::{self, Write};

use disc_flight::core::flight::{FlightParams, compute_trajectory, mirror_lateral};
use disc_flight::core::svg_path::to_svg_path;
use disc_flight::core::window::{
    FitResult, ForwardDirection, Viewport, fit_start_bottom_center,
    fit_start_bottom_center_fill_height,
};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::filter::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid {label}: '{value}'. Expected a number.")]
    InvalidNumber { label: String, value: String },
    #[error("{0} must be a finite number.")]
    NotFinite(String),
    #[error("Expected exactly 4 values: <speed> <glide> <turn> <fade> (got {0}).")]
    WrongValueCount(usize),
    #[error("Option {0} requires a value.")]
    MissingValue(String),
    #[error("Unknown option '{0}'.")]
    UnknownOption(String),
    #[error("Viewport {0} must be greater than zero.")]
    NonPositiveViewport(&'static str),
    #[error("Could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("Input ended unexpectedly (EOF).")]
    UnexpectedEof,
    #[error("Could not encode report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FitPolicy {
    BottomCenter,
    FillHeight,
}

#[derive(Clone, Debug, PartialEq)]
struct Options {
    params: Option<FlightParams>,
    viewport: Viewport,
    policy: FitPolicy,
    mirror: bool,
    json: bool,
    help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            params: None,
            viewport: Viewport::default(),
            policy: FitPolicy::BottomCenter,
            mirror: false,
            json: false,
            help: false,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    params: FlightParams,
    policy: &'static str,
    mirrored: bool,
    point_count: usize,
    scale: f64,
    anchor: [f64; 2],
    view_box: &'a str,
    world_width: f64,
    world_height: f64,
    path: String,
}

fn parse_f64(value: &str, label: &str) -> Result<f64, CliError> {
    let parsed = value
        .parse::<f64>()
        .map_err(|_| CliError::InvalidNumber {
            label: label.to_string(),
            value: value.to_string(),
        })?;
    if !parsed.is_finite() {
        return Err(CliError::NotFinite(label.to_string()));
    }
    Ok(parsed)
}

fn read_f64(prompt: &str) -> Result<f64, CliError> {
    loop {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Err(CliError::UnexpectedEof);
        }

        match parse_f64(line.trim(), "value") {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 7 or -1.5)."),
        }
    }
}

fn get_params_from_user() -> Result<FlightParams, CliError> {
    Ok(FlightParams {
        speed: read_f64("Speed (1-14): ")?,
        glide: read_f64("Glide (1-7): ")?,
        turn: read_f64("Turn (-5-1): ")?,
        fade: read_f64("Fade (0-5): ")?,
    })
}

fn option_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, CliError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

fn positive(value: f64, name: &'static str) -> Result<f64, CliError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CliError::NonPositiveViewport(name))
    }
}

fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut options = Options::default();
    let mut values = Vec::new();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--fill-height" => options.policy = FitPolicy::FillHeight,
            "--mirror" => options.mirror = true,
            "--json" => options.json = true,
            "--up" => options.viewport.forward = Some(ForwardDirection::ScreenUp),
            "--down" => options.viewport.forward = Some(ForwardDirection::ScreenDown),
            "--width" => {
                let raw = option_value(&mut iter, "--width")?;
                options.viewport.width = positive(parse_f64(raw, "width")?, "width")?;
            }
            "--height" => {
                let raw = option_value(&mut iter, "--height")?;
                options.viewport.height = positive(parse_f64(raw, "height")?, "height")?;
            }
            "--padding" => {
                let raw = option_value(&mut iter, "--padding")?;
                options.viewport.padding_pct = Some(parse_f64(raw, "padding")?);
            }
            // Negative numbers are values (turn), not flags.
            other if other.starts_with("--") => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            value => values.push(value.to_string()),
        }
    }

    options.params = match values.len() {
        0 => None,
        4 => Some(FlightParams {
            speed: parse_f64(&values[0], "speed")?,
            glide: parse_f64(&values[1], "glide")?,
            turn: parse_f64(&values[2], "turn")?,
            fade: parse_f64(&values[3], "fade")?,
        }),
        n => return Err(CliError::WrongValueCount(n)),
    };

    Ok(options)
}

fn fit(points: &[disc_flight::Point], options: &Options) -> FitResult {
    match options.policy {
        FitPolicy::BottomCenter => fit_start_bottom_center(points, &options.viewport),
        FitPolicy::FillHeight => fit_start_bottom_center_fill_height(points, &options.viewport),
    }
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program}");
    println!("  {program} <speed> <glide> <turn> <fade> [options]");
    println!();
    println!("Options:");
    println!("  --fill-height        scale by forward extent only");
    println!("  --width <px>         viewport width (default 1000)");
    println!("  --height <px>        viewport height (default 600)");
    println!("  --padding <frac>     padding fraction (default 0.08)");
    println!("  --up | --down        direction the path grows on screen");
    println!("  --mirror             mirror the path before fitting");
    println!("  --json               print a JSON report");
    println!();
    println!("Examples:");
    println!("  {program} 12 5 -1 3");
    println!("  {program} 7 5 0 1 --fill-height --json");
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args)?;

    if options.help {
        print_usage(&args[0]);
        return Ok(());
    }

    let raw = match options.params {
        Some(params) => params,
        None => get_params_from_user()?,
    };
    let params = raw.clamped();
    if params != raw {
        tracing::warn!(?raw, ?params, "flight numbers clamped to supported range");
    }

    let mut trajectory = compute_trajectory(params);
    if options.mirror {
        trajectory = mirror_lateral(&trajectory);
    }
    let fitted = fit(&trajectory, &options);
    let path = to_svg_path(&fitted.points);

    tracing::info!(
        points = fitted.points.len(),
        scale = fitted.scale,
        policy = ?options.policy,
        "fitted flight path"
    );

    if options.json {
        let report = Report {
            generated_at: chrono::Utc::now().to_rfc3339(),
            params,
            policy: match options.policy {
                FitPolicy::BottomCenter => "bottom-center",
                FitPolicy::FillHeight => "fill-height",
            },
            mirrored: options.mirror,
            point_count: fitted.points.len(),
            scale: fitted.scale,
            anchor: [fitted.anchor.x, fitted.anchor.y],
            view_box: &fitted.view_box,
            world_width: fitted.world_width,
            world_height: fitted.world_height,
            path,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{path}");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        print_usage("disc-flight");
        std::process::exit(1);
    }
}
