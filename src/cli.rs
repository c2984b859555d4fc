// GlyphGL
// Copyright (c) 2025 Harlen Batagelo
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface.
//!
//! Produces a [`CliConfig`] naming the scene to replay and how to
//! report it.

use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;

use glyphgl::{scene::*, *};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Runtime configuration chosen at startup.
#[derive(Debug)]
pub struct CliConfig {
    /// Scene file to replay.
    pub scene_path: PathBuf,

    /// Number of frames to replay the scene for.
    pub frames: usize,

    /// Highlights the command stream with ANSI colors.
    pub color: bool,

    /// Logs at debug level even in release builds.
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_scene(&self) -> Result<Scene, CliError> {
        load_scene_file(&self.scene_path)
    }
}

fn command() -> Command {
    Command::new(APP_NAME)
        .author(APP_AUTHOR)
        .version(APP_SEMVER)
        .about(APP_ABOUT)
        .arg(
            Arg::new("scene")
                .value_name("SCENE")
                .help("Path to a TOML or JSON scene file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .value_name("N")
                .help("Number of frames to replay")
                .default_value("1")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Print the command stream without colors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .after_help("Prints the GL commands the scene issues, one per line")
}

/// Parses command-line arguments.
pub fn parse_args() -> Result<CliConfig, CliError> {
    config_from_matches(&command().get_matches())
}

fn config_from_matches(matches: &ArgMatches) -> Result<CliConfig, CliError> {
    let scene_path = matches
        .get_one::<PathBuf>("scene")
        .cloned()
        .ok_or_else(|| CliError::InvalidInput("Missing scene file".into()))?;
    let frames = matches.get_one::<u32>("frames").copied().unwrap_or(1) as usize;

    Ok(CliConfig {
        scene_path,
        frames,
        color: !matches.get_flag("no-color"),
        verbose: matches.get_flag("verbose"),
    })
}

/// Loads a scene file, falling back to trying TOML then JSON when the
/// extension does not tell.
fn load_scene_file(file: &Path) -> Result<Scene, CliError> {
    if !file.exists() {
        return Err(CliError::InvalidInput(format!(
            "File not found: {}",
            file.display()
        )));
    }

    match file.extension().and_then(|s| s.to_str()) {
        Some("toml") | Some("json") => Ok(Scene::from_file(file)?),
        _ => Scene::from_toml_file(file)
            .or_else(|_| Scene::from_json_file(file))
            .map_err(Into::into),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Result<CliConfig, CliError> {
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|e| CliError::InvalidInput(e.to_string()))?;
        config_from_matches(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["glyphgl", "scene.toml"]).unwrap();
        assert_eq!(config.scene_path, PathBuf::from("scene.toml"));
        assert_eq!(config.frames, 1);
        assert!(config.color);
        assert!(!config.verbose);
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "glyphgl",
            "scene.json",
            "--frames",
            "3",
            "--no-color",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(config.frames, 3);
        assert!(!config.color);
        assert!(config.verbose);
    }

    #[test]
    fn test_zero_frames_rejected() {
        assert!(parse(&["glyphgl", "scene.toml", "--frames", "0"]).is_err());
    }

    #[test]
    fn test_scene_required() {
        assert!(parse(&["glyphgl"]).is_err());
    }

    #[test]
    fn test_missing_scene_file() {
        let result = load_scene_file(Path::new("/nonexistent/glyphgl/scene.toml"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
