use color_eyre::eyre::{Result, WrapErr};
use common::command::Command;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// User configuration, read once at startup from a TOML file.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Directory holding the semester folders
    pub root: PathBuf,
    /// Location of the current course link, relative to `root`
    pub pointer: PathBuf,
    /// Name of the metadata file inside each course folder
    pub metadata_file: String,
    pub viewer: Command,
    pub editor: Command,
    pub browser: Command,
    /// Replace spaces with hyphens when printing the course name
    pub normalize_titles: bool,
    /// Print action errors to the console as well as the log
    pub echo_errors: bool,
    /// Seconds between repeated course name prints
    pub watch_interval: u64,
    pub actions: Actions,
}

/// Switches for the optional actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Actions {
    pub pdf: bool,
    pub open: bool,
    pub link: bool,
    pub watch: bool,
    pub new: bool,
}

impl Default for Actions {
    fn default() -> Self {
        Self {
            pdf: true,
            open: true,
            link: true,
            watch: true,
            new: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: "~/university".into(),
            pointer: "current-course".into(),
            metadata_file: "info.yaml".into(),
            viewer: command(&["zathura", "%p"]),
            editor: command(&["alacritty", "-e", "nvim", "%p"]),
            browser: command(&["firefox", "%p"]),
            normalize_titles: false,
            echo_errors: false,
            watch_interval: 5,
            actions: Actions::default(),
        }
    }
}

fn command(parts: &[&str]) -> Command {
    Command::new(
        parts[0].to_owned(),
        parts[1..].iter().copied().map(Into::into).collect(),
    )
}

impl Config {
    /// Load the config at `path`. A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(src) => Self::parse(&src)
                .wrap_err_with(|| format!("Failed to load config from file '{}'", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("No config at '{}', using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err)
                .wrap_err_with(|| format!("Failed to read config from file '{}'", path.display())),
        }
    }

    pub fn parse(src: &str) -> Result<Self> {
        toml::from_str(src).wrap_err("Failed to deserialize config")
    }
}
