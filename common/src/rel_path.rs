use std::path::{Path, PathBuf};

/// A path that might be relative to the home directory. Relative paths start with `~`.
///
/// The original spelling is kept around for messages shown to the user, while the expanded
/// form is what actually gets handed to the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelPath {
    relative: PathBuf,
    absolute: PathBuf,
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum HomeError {
    #[error("Home directory not found")]
    NoHome,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to expand relative path '{}'", .path.display())]
pub struct Error {
    path: PathBuf,
    #[source]
    err: HomeError,
}

impl RelPath {
    /// Expand `path` against `home` if it starts with `~`.
    pub fn new<P: AsRef<Path>>(path: PathBuf, home: Result<P, HomeError>) -> Result<Self, Error> {
        let absolute = match path.strip_prefix("~") {
            Ok(rest) => match home {
                Ok(prefix) => prefix.as_ref().join(rest),
                Err(err) => {
                    return Err(Error {
                        path: path.clone(),
                        err,
                    })
                }
            },
            Err(_) => path.clone(),
        };

        Ok(Self {
            relative: path,
            absolute,
        })
    }

    pub fn join<T: AsRef<Path>>(&self, path: T) -> Self {
        Self {
            relative: self.relative.join(&path),
            absolute: self.absolute.join(&path),
        }
    }

    pub fn relative(&self) -> &Path {
        &self.relative
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.relative.display().fmt(f)
    }
}

impl AsRef<Path> for RelPath {
    fn as_ref(&self) -> &Path {
        self.absolute.as_path()
    }
}
