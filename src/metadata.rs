use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The title and link stored in a course's metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CourseMetadata {
    pub title: String,
    pub link: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to read metadata file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse metadata file '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CourseMetadata {
    /// Read `file_name` inside `course_dir`.
    pub fn read(course_dir: &Path, file_name: &str) -> Result<Self, MetadataError> {
        let path = course_dir.join(file_name);
        let src = std::fs::read_to_string(&path).map_err(|source| MetadataError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&src).map_err(|source| MetadataError::Parse { path, source })
    }

    /// Like [`CourseMetadata::read`], but errors are logged and both fields left empty.
    pub fn read_or_default(course_dir: &Path, file_name: &str) -> Self {
        Self::read(course_dir, file_name).unwrap_or_else(|err| {
            tracing::error!("{:#}", color_eyre::eyre::Report::new(err));
            Self::default()
        })
    }

    fn parse(src: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document has no mapping to deserialize
        if src.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(src)
    }

    /// The title in the form used for course folder names.
    pub fn folder_name(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Folder names can't contain spaces, so titles use hyphens instead.
pub fn normalize_title(title: &str) -> String {
    title.replace(' ', "-")
}
