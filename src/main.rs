//
// radontool - Radon transform and filtered backprojection
// Copyright (c) 2020 Filip Szczerek <ga.software@yahoo.com>
//
// This project is licensed under the terms of the MIT license
// (see the LICENSE file for details).
//

//!
//! Entry point and main functions of the `radontool` executable.
//!

mod args;
mod image;
mod logging;
mod transform;
mod utils;

use args::{AngleSource, ModeOfOperation};
use image::{FileType, Image};
use logging::Logger;

const VERSION_STRING: &'static str = include_str!(concat!(env!("OUT_DIR"), "/version"));

type ModeResult = Result<(), Box<dyn std::error::Error>>;

fn print_header() {
    println!(r#"
_________________

   {}
   Radon transform and filtered backprojection

   Copyright © 2020 Filip Szczerek <ga.software@yahoo.com>

   This program is licensed under MIT license (see LICENSE.txt for details).

_________________
"#,
        VERSION_STRING
    );
}

/// Returns projection angles given in the configuration; `None` means the operation's defaults.
fn resolve_angles(source: &AngleSource, logger: &Logger) -> Result<Option<Vec<f64>>, utils::AngleListError> {
    match source {
        AngleSource::Default => Ok(None),
        AngleSource::CommandLineList(angles) => Ok(Some(angles.clone())),
        AngleSource::ListFile(file_name) => {
            logger.verbose(&format!("reading angles from: {}", file_name));
            Ok(Some(utils::load_angle_list_file(file_name)?))
        },
        AngleSource::Range{ start, stop, count } => Ok(Some(utils::linspace_degrees(*start, *stop, *count)))
    }
}

fn load_input(config: &args::Configuration, logger: &Logger) -> Result<Image, image::ImageError> {
    logger.verbose(&format!("loading: {}", config.input_file()));
    let image = Image::load(config.input_file(), FileType::Auto)?;
    logger.info(&format!("Input: {}x{} pixels.", image.width(), image.height()));
    Ok(image)
}

fn save_output(output: &Image, config: &args::Configuration, logger: &Logger) -> Result<(), image::ImageError> {
    logger.info(&format!("Output: {}x{} pixels.", output.width(), output.height()));
    logger.verbose(&format!("saving: {}", config.output_file()));
    output.save(config.output_file(), FileType::Auto)
}

fn mode_radon(config: &args::Configuration, logger: &Logger) -> ModeResult {
    let image = load_input(config, logger)?;
    let theta = resolve_angles(config.angles(), logger)?;

    let geometry = transform::geometry::Geometry::resolve(image.height(), image.width(), config.circle());
    logger.verbose(&format!("{:?}", geometry));

    logger.info("\nCalculating sinogram...");
    let sinogram = transform::radon(&image, theta.as_deref(), config.circle())?;

    save_output(&sinogram, config, logger)?;
    Ok(())
}

fn mode_iradon(config: &args::Configuration, logger: &Logger) -> ModeResult {
    let sinogram = load_input(config, logger)?;
    let theta = resolve_angles(config.angles(), logger)?;

    logger.verbose(&format!(
        "filter: {}, length {}; interpolation: {}",
        Into::<&str>::into(config.filter()),
        transform::filter::filter_length(sinogram.height()),
        Into::<&str>::into(config.interpolation())
    ));

    logger.info("\nReconstructing image...");
    let image = transform::iradon(
        &sinogram,
        theta.as_deref(),
        config.output_size(),
        config.filter(),
        config.interpolation(),
        config.circle()
    )?;

    save_output(&image, config, logger)?;
    Ok(())
}

fn mode_circle_to_square(config: &args::Configuration, logger: &Logger) -> ModeResult {
    let sinogram = load_input(config, logger)?;
    let converted = transform::sinogram_circle_to_square(&sinogram);
    save_output(&converted, config, logger)?;
    Ok(())
}

fn run_program() -> bool {
    print_header();
    println!();

    let config = match args::parse_command_line(std::env::args()) {
        Ok(config) => match config {
            None => return true, // help was requested
            Some(config) => config
        },
        Err(_) => { println!("\nUse --{} for more information.\n", args::cmdline::HELP); return false; }
    };

    let mode = config.mode();

    let logger = Logger::new(config.log_level());

    let tstart = std::time::Instant::now();

    let result = match mode {
        ModeOfOperation::Radon => mode_radon(&config, &logger),

        ModeOfOperation::Iradon => mode_iradon(&config, &logger),

        ModeOfOperation::CircleToSquare => mode_circle_to_square(&config, &logger)
    };

    if let Err(err) = result {
        eprintln!("Error: {}.", err);
        return false;
    }

    let elapsed = tstart.elapsed();
    let mins = elapsed.as_secs() / 60;
    let secs = elapsed.as_secs() % 60;
    let frac_secs = elapsed.as_secs_f32() - (mins * 60) as f32 - secs as f32;
    logger.info(&format!("Completed in {} min {:02}.{:0.0} s.", mins, secs, frac_secs * 10.0));

    true
}

fn main() {
    std::process::exit(if run_program() { 0 } else { 1 });
}
