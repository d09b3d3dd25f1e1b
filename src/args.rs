//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Command-line options definitions and parsing.
//!

use crate::logging;
use crate::transform::{FilterKind, InterpolationKind};
use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ModeOfOperation {
    Radon,
    Iradon,
    CircleToSquare
}

pub mod cmdline {
    pub const HELP:              &str = "help";
    pub const MODE_OF_OPERATION: &str = "mode";
    pub const INPUT_FILE:        &str = "input";
    pub const OUTPUT_FILE:       &str = "output";
    pub const THETA:             &str = "theta";
    pub const THETA_FILE:        &str = "theta_file";
    pub const THETA_RANGE:       &str = "theta_range";
    pub const CIRCLE:            &str = "circle";
    pub const FILTER:            &str = "filter";
    pub const INTERPOLATION:     &str = "interpolation";
    pub const OUTPUT_SIZE:       &str = "output_size";
    pub const LOG_LEVEL:         &str = "log_level";
}

/// Source of projection angles.
#[derive(Debug, PartialEq)]
pub enum AngleSource {
    /// Default angles of the selected operation.
    Default,
    CommandLineList(Vec<f64>),
    ListFile(String),
    /// Evenly spaced over [`start`, `stop`).
    Range{ start: f64, stop: f64, count: usize }
}

#[derive(Debug)]
pub struct Configuration {
    mode: ModeOfOperation,
    input_file: String,
    output_file: String,
    angles: AngleSource,
    circle: bool,
    filter: FilterKind,
    interpolation: InterpolationKind,
    output_size: Option<usize>,
    log_level: logging::Level
}

impl Configuration {
    pub fn mode(&self) -> ModeOfOperation { self.mode }
    pub fn input_file(&self) -> &str { &self.input_file }
    pub fn output_file(&self) -> &str { &self.output_file }
    pub fn angles(&self) -> &AngleSource { &self.angles }
    pub fn circle(&self) -> bool { self.circle }
    pub fn filter(&self) -> FilterKind { self.filter }
    pub fn interpolation(&self) -> InterpolationKind { self.interpolation }
    pub fn output_size(&self) -> Option<usize> { self.output_size }
    pub fn log_level(&self) -> logging::Level { self.log_level }
}

impl From<ModeOfOperation> for &str {
    fn from(m: ModeOfOperation) -> &'static str {
        match m {
            ModeOfOperation::Radon          => "radon",
            ModeOfOperation::Iradon         => "iradon",
            ModeOfOperation::CircleToSquare => "circle-to-square"
        }
    }
}

impl From<logging::Level> for &str {
    fn from(level: logging::Level) -> &'static str {
        match level {
            logging::Level::Quiet   => "quiet",
            logging::Level::Info    => "info",
            logging::Level::Verbose => "verbose"
        }
    }
}

impl std::str::FromStr for logging::Level {
    type Err = ();
    fn from_str(s: &str) -> Result<logging::Level, ()> {

        for level in logging::Level::iter() {
            if s == Into::<&str>::into(level) {
                return Ok(level);
            }
        }

        Err(())
    }
}

/// Returns names of all filters, separated by `|`.
fn filter_names() -> String {
    FilterKind::iter().map(|f| Into::<&str>::into(f)).collect::<Vec<&str>>().join("|")
}

pub fn print_help() {
    println!(
r#"Command-line options:

  --{} <mode>

    Mode of operation. Possible values:

        {:16}    calculate the sinogram (Radon transform) of the input image
        {:16}    reconstruct an image from the input sinogram (filtered backprojection)
        {:16}    pad a sinogram calculated with --{} yes to its --{} no equivalent


  --{} <file>

    Input FITS file (image or sinogram).


  --{} <file>

    Output FITS file.


  --{} <angle1 angle2 ...>

    Projection angles in degrees. For {}, the angles of consecutive sinogram columns.
    Default: 0, 1, ..., 179 for {}; the number of sinogram columns evenly spaced over [0, 180) for {}.


  --{} <file>

    File with projection angles in degrees (whitespace-separated; everything after # is ignored).


  --{} <start> <stop> <count>

    Projection angles: <count> values evenly spaced over [<start>, <stop>).


  --{} <yes|no>

    If "yes", the image is assumed to be zero outside the circle inscribed in it, and only this circle
    is projected and reconstructed. Default: no.


  --{} <{}>

    Filter used for reconstruction. Default: {}. Valid only when mode = {}.


  --{} <{}|{}>

    Interpolation used for reconstruction. Default: {}. Valid only when mode = {}.


  --{} <pixels>

    Size of the (square) reconstructed image. Valid only when mode = {}.


  --{} <{}|{}|{}>

    Chooses the amount of messages to print during processing.

"#,
        cmdline::MODE_OF_OPERATION,
        Into::<&str>::into(ModeOfOperation::Radon),
        Into::<&str>::into(ModeOfOperation::Iradon),
        Into::<&str>::into(ModeOfOperation::CircleToSquare), cmdline::CIRCLE, cmdline::CIRCLE,

        cmdline::INPUT_FILE,

        cmdline::OUTPUT_FILE,

        cmdline::THETA,
        Into::<&str>::into(ModeOfOperation::Iradon),
        Into::<&str>::into(ModeOfOperation::Radon),
        Into::<&str>::into(ModeOfOperation::Iradon),

        cmdline::THETA_FILE,

        cmdline::THETA_RANGE,

        cmdline::CIRCLE,

        cmdline::FILTER, filter_names(),
        Into::<&str>::into(FilterKind::default()),
        Into::<&str>::into(ModeOfOperation::Iradon),

        cmdline::INTERPOLATION,
        Into::<&str>::into(InterpolationKind::Linear),
        Into::<&str>::into(InterpolationKind::Nearest),
        Into::<&str>::into(InterpolationKind::default()),
        Into::<&str>::into(ModeOfOperation::Iradon),

        cmdline::OUTPUT_SIZE,
        Into::<&str>::into(ModeOfOperation::Iradon),

        cmdline::LOG_LEVEL,
        Into::<&str>::into(logging::Level::Quiet),
        Into::<&str>::into(logging::Level::Info),
        Into::<&str>::into(logging::Level::Verbose)
    );
}

/// Returns the value of a single-valued option of type `T`.
fn get_option_value<T: std::str::FromStr>(
    option: &str,
    option_values: &std::collections::HashMap::<String, Vec<String>>
) -> Result<Option<T>, ()> {
    match option_values.get(option) {
        None => Ok(None),
        Some(vals) => if vals.is_empty() {
            eprintln!("Value missing for option {}.", option);
            Err(())
        } else if vals.len() > 1 {
            eprintln!("Too many values for option {}.", option);
            Err(())
        } else {
            match vals[0].parse::<T>() {
                Ok(value) => Ok(Some(value)),
                Err(_) => {
                    eprintln!("Invalid value for option {}: {}.", option, vals[0]);
                    Err(())
                }
            }
        }
    }
}

/// Returns all values of a multi-valued option of type `T`.
fn get_option_values<T: std::str::FromStr>(
    option: &str,
    option_values: &std::collections::HashMap::<String, Vec<String>>
) -> Result<Option<Vec<T>>, ()> {
    match option_values.get(option) {
        None => Ok(None),
        Some(vals) => if vals.is_empty() {
            eprintln!("Value missing for option {}.", option);
            Err(())
        } else {
            let mut parsed = Vec::with_capacity(vals.len());
            for val in vals {
                match val.parse::<T>() {
                    Ok(value) => parsed.push(value),
                    Err(_) => {
                        eprintln!("Invalid value for option {}: {}.", option, val);
                        return Err(());
                    }
                }
            }
            Ok(Some(parsed))
        }
    }
}

fn parse_angle_source(
    option_values: &std::collections::HashMap::<String, Vec<String>>
) -> Result<AngleSource, ()> {
    let num_sources = [cmdline::THETA, cmdline::THETA_FILE, cmdline::THETA_RANGE].iter()
        .filter(|opt| option_values.contains_key(**opt))
        .count();
    if num_sources > 1 {
        eprintln!("Only one of options {}, {}, {} can be used.", cmdline::THETA, cmdline::THETA_FILE, cmdline::THETA_RANGE);
        return Err(());
    }

    if let Some(angles) = get_option_values::<f64>(cmdline::THETA, option_values)? {
        return Ok(AngleSource::CommandLineList(angles));
    }

    if let Some(file_name) = get_option_value::<String>(cmdline::THETA_FILE, option_values)? {
        return Ok(AngleSource::ListFile(file_name));
    }

    if let Some(vals) = option_values.get(cmdline::THETA_RANGE) {
        if vals.len() != 3 {
            eprintln!("Invalid angle range. Expected: <start> <stop> <count>.");
            return Err(());
        }
        let start = vals[0].parse::<f64>();
        let stop = vals[1].parse::<f64>();
        let count = vals[2].parse::<usize>();
        return match (start, stop, count) {
            (Ok(start), Ok(stop), Ok(count)) => Ok(AngleSource::Range{ start, stop, count }),
            _ => {
                eprintln!("Invalid angle range: {} {} {}.", vals[0], vals[1], vals[2]);
                Err(())
            }
        };
    }

    Ok(AngleSource::Default)
}

/// Returns Ok(None) if help was requested.
pub fn parse_command_line<I: Iterator<Item=String>>(stream: I) -> Result<Option<Configuration>, ()> {
    let allowed_options = vec![
     cmdline::HELP,
     cmdline::MODE_OF_OPERATION,
     cmdline::INPUT_FILE,
     cmdline::OUTPUT_FILE,
     cmdline::THETA,
     cmdline::THETA_FILE,
     cmdline::THETA_RANGE,
     cmdline::CIRCLE,
     cmdline::FILTER,
     cmdline::INTERPOLATION,
     cmdline::OUTPUT_SIZE,
     cmdline::LOG_LEVEL
    ];

    // key: option name
    let mut option_values = std::collections::HashMap::<String, Vec<String>>::new();

    let mut current: Option<&mut Vec<String>> = None;

    for arg in stream.skip(1) /*skip the binary name*/ {
        // negative numbers are values (e.g. `--theta -45 45`)
        if arg.starts_with("--") {
            match &arg[2..] {
                cmdline::HELP => { print_help(); return Ok(None); },
                x if !allowed_options.contains(&x) => {
                    eprintln!("Unknown command-line option: {}.", x); return Err(());
                },
                opt => current = Some(option_values.entry(opt.to_string()).or_insert(vec![])),
            }
        } else {
            match current.as_mut() {
                None => {
                    eprintln!("Unexpected value: {}.", arg);
                    return Err(());
                },
                Some(values) => values.push(arg)
            }
        }
    }

    let mode = match get_option_value::<String>(cmdline::MODE_OF_OPERATION, &option_values)? {
        None => { eprintln!("Mode not specified."); return Err(()); },
        Some(x) if x == Into::<&str>::into(ModeOfOperation::Radon) => ModeOfOperation::Radon,
        Some(x) if x == Into::<&str>::into(ModeOfOperation::Iradon) => ModeOfOperation::Iradon,
        Some(x) if x == Into::<&str>::into(ModeOfOperation::CircleToSquare) => ModeOfOperation::CircleToSquare,
        Some(x) => {
            eprintln!("Invalid mode of operation: {}. Expected one of: {}, {}, {}.",
                x,
                Into::<&str>::into(ModeOfOperation::Radon),
                Into::<&str>::into(ModeOfOperation::Iradon),
                Into::<&str>::into(ModeOfOperation::CircleToSquare)
            );
            return Err(());
        }
    };

    let input_file = match get_option_value::<String>(cmdline::INPUT_FILE, &option_values)? {
        Some(file) => file,
        None => { eprintln!("Input file not specified."); return Err(()); }
    };

    let output_file = match get_option_value::<String>(cmdline::OUTPUT_FILE, &option_values)? {
        Some(file) => file,
        None => { eprintln!("Output file not specified."); return Err(()); }
    };

    let angles = parse_angle_source(&option_values)?;
    if mode == ModeOfOperation::CircleToSquare && angles != AngleSource::Default {
        eprintln!("Projection angles cannot be specified when mode = {}.",
            Into::<&str>::into(ModeOfOperation::CircleToSquare)
        );
        return Err(());
    }

    let circle = match get_option_value::<String>(cmdline::CIRCLE, &option_values)? {
        None => false,
        Some(val) => match val.as_str() {
            "yes" => true,
            "no" => false,
            _ => {
                eprintln!("Invalid value for option {}: {}.", cmdline::CIRCLE, val);
                return Err(());
            }
        }
    };

    for opt in [cmdline::FILTER, cmdline::INTERPOLATION, cmdline::OUTPUT_SIZE].iter() {
        if mode != ModeOfOperation::Iradon && option_values.contains_key(*opt) {
            eprintln!("Unexpected option {} (mode is not {}).", opt, Into::<&str>::into(ModeOfOperation::Iradon));
            return Err(());
        }
    }

    let filter = get_option_value::<FilterKind>(cmdline::FILTER, &option_values)?.unwrap_or_default();

    let interpolation = get_option_value::<InterpolationKind>(cmdline::INTERPOLATION, &option_values)?
        .unwrap_or_default();

    let output_size = get_option_value::<usize>(cmdline::OUTPUT_SIZE, &option_values)?;
    if output_size == Some(0) {
        eprintln!("Output size must be positive.");
        return Err(());
    }

    let log_level = get_option_value::<logging::Level>(cmdline::LOG_LEVEL, &option_values)?
        .unwrap_or(logging::Level::Info);

    Ok(Some(Configuration{
        mode,
        input_file,
        output_file,
        angles,
        circle,
        filter,
        interpolation,
        output_size,
        log_level
    }))
}
