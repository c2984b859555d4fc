// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

mod cli;

use owo_colors::OwoColorize;
use std::{process::ExitCode, rc::Rc};

use glyphgl::{renderer::context::trace_context::GlCommand, scene, TraceContext};

fn print_commands(commands: &[GlCommand], color: bool) {
    let width = commands.len().to_string().len();
    for (index, command) in commands.iter().enumerate() {
        let number = format!("{:>width$}", index + 1);
        if color {
            println!("{} {}", number.dimmed(), command.to_string().bold());
        } else {
            println!("{number} {command}");
        }
    }
}

fn run(config: &cli::CliConfig) -> Result<Vec<GlCommand>, cli::CliError> {
    let scene = config.load_scene()?;
    log::info!("Loaded {}", config.scene_path.display());

    let context = Rc::new(TraceContext::new());
    let result = scene::replay(&context, &scene, config.frames);
    let commands = context.take_commands();
    match result {
        Ok(()) => Ok(commands),
        Err(err) => {
            // Commands issued up to the failure.
            print_commands(&commands, config.color);
            Err(err.into())
        }
    }
}

fn main() -> ExitCode {
    let config = match cli::parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    simple_logger::SimpleLogger::new()
        .with_level(if cfg!(debug_assertions) || config.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init()
        .unwrap();

    match run(&config) {
        Ok(commands) => {
            print_commands(&commands, config.color);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
