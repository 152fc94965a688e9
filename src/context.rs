use color_eyre::eyre::{ContextCompat, Result, WrapErr};
use common::{
    command::Command,
    rel_path::{HomeError, RelPath},
};
use std::{path::PathBuf, time::Duration};

use crate::{
    config::{Actions, Config},
    metadata::CourseMetadata,
    pointer::Pointer,
    repository::Repository,
};

/// Everything an action needs, built once from the config and the command line.
#[derive(Debug)]
pub struct Context {
    root: RelPath,
    pointer: Pointer,
    metadata_file: String,
    viewer: Command,
    editor: Command,
    browser: Command,
    normalize_titles: bool,
    echo_errors: bool,
    watch_interval: Duration,
    actions: Actions,
}

impl Context {
    pub fn new(config: Config, root: Option<PathBuf>) -> Result<Self> {
        let root = RelPath::new(root.unwrap_or(config.root), home_dir())
            .wrap_err("Failed to expand course directory path")?;
        let pointer = Pointer::new(root.join(&config.pointer).absolute().to_owned());

        Ok(Self {
            root,
            pointer,
            metadata_file: config.metadata_file,
            viewer: config.viewer,
            editor: config.editor,
            browser: config.browser,
            normalize_titles: config.normalize_titles,
            echo_errors: config.echo_errors,
            watch_interval: Duration::from_secs(config.watch_interval),
            actions: config.actions,
        })
    }

    pub fn repository(&self) -> Repository {
        Repository::new(self.root.absolute().to_owned())
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Metadata of the current course, empty if it can't be read.
    pub fn current_metadata(&self) -> CourseMetadata {
        CourseMetadata::read_or_default(self.pointer.path(), &self.metadata_file)
    }

    pub fn viewer(&self) -> &Command {
        &self.viewer
    }

    pub fn editor(&self) -> &Command {
        &self.editor
    }

    pub fn browser(&self) -> &Command {
        &self.browser
    }

    pub fn normalize_titles(&self) -> bool {
        self.normalize_titles
    }

    pub fn echo_errors(&self) -> bool {
        self.echo_errors
    }

    pub fn watch_interval(&self) -> Duration {
        self.watch_interval
    }

    pub fn actions(&self) -> Actions {
        self.actions
    }
}

pub fn home_dir() -> Result<PathBuf, HomeError> {
    directories_next::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_owned())
        .ok_or(HomeError::NoHome)
}

pub fn project_dirs() -> Option<directories_next::ProjectDirs> {
    directories_next::ProjectDirs::from("com", "satchel", "satchel")
}

pub fn default_config_path() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .wrap_err("No config directory found")
}

pub fn log_path() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.cache_dir().join("satchel.log"))
        .wrap_err("No home directory found")
}
