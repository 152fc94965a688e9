use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// The symlink marking the current course.
#[derive(Debug, Clone)]
pub struct Pointer {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PointerError {
    #[error("No current course is set")]
    Unset,
    #[error("'{}' exists but is not a symlink", .0.display())]
    NotALink(PathBuf),
    #[error("Failed to inspect '{}'", .path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create symlink: '{}' -> '{}'", .link.display(), .target.display())]
    Link {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Pointer {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the link itself. Filesystem calls through it reach the current course.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The course directory the link points at.
    pub fn target(&self) -> Result<PathBuf, PointerError> {
        match fs::read_link(&self.path) {
            Ok(target) => Ok(target),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(PointerError::Unset),
            Err(err) if err.kind() == ErrorKind::InvalidInput => {
                Err(PointerError::NotALink(self.path.clone()))
            }
            Err(source) => Err(PointerError::Inspect {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// The current course directory, failing if the link is missing or dangling.
    pub fn course_dir(&self) -> Result<&Path, PointerError> {
        self.target()?;
        match self.path.is_dir() {
            true => Ok(&self.path),
            false => Err(PointerError::Unset),
        }
    }

    /// Point the link at `target`. The new link is placed under a temporary name and renamed
    /// over the old one, so the pointer never goes missing in between.
    pub fn replace(&self, target: &Path) -> Result<(), PointerError> {
        match fs::symlink_metadata(&self.path) {
            Ok(meta) if !meta.file_type().is_symlink() => {
                return Err(PointerError::NotALink(self.path.clone()))
            }
            Ok(_) => (),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("Pointer '{}' doesn't exist yet", self.path.display())
            }
            Err(source) => {
                return Err(PointerError::Inspect {
                    path: self.path.clone(),
                    source,
                })
            }
        }

        let staging = self.staging_path();
        let link_err = |source| PointerError::Link {
            link: self.path.clone(),
            target: target.to_owned(),
            source,
        };

        // Leftover from an interrupted run
        if let Err(err) = fs::remove_file(&staging) {
            if err.kind() != ErrorKind::NotFound {
                return Err(link_err(err));
            }
        }

        imp::symlink(target, &staging).map_err(link_err)?;
        fs::rename(&staging, &self.path).map_err(|err| {
            let _ = fs::remove_file(&staging);
            link_err(err)
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_default());
        name.push(".new");
        self.path.with_file_name(name)
    }
}

#[cfg(any(target_os = "redox", unix))]
mod imp {
    pub use std::os::unix::fs::symlink;
}

#[cfg(test)]
mod tests {
    use super::{Pointer, PointerError};
    use tempfile::tempdir;

    #[test]
    fn creates_missing_pointer() {
        let dir = tempdir().expect("Failed to create tempdir");
        let course = dir.path().join("S1").join("Math");
        std::fs::create_dir_all(&course).expect("Failed to create course");

        let pointer = Pointer::new(dir.path().join("current-course"));
        assert!(matches!(pointer.target(), Err(PointerError::Unset)));

        pointer.replace(&course).expect("Failed to place pointer");
        assert_eq!(pointer.target().unwrap(), course);
        assert!(pointer.course_dir().is_ok());
    }

    #[test]
    fn replaces_existing_pointer() {
        let dir = tempdir().expect("Failed to create tempdir");
        let math = dir.path().join("S1").join("Math");
        let phys = dir.path().join("S2").join("Phys");
        std::fs::create_dir_all(&math).expect("Failed to create course");
        std::fs::create_dir_all(&phys).expect("Failed to create course");

        let pointer = Pointer::new(dir.path().join("current-course"));
        pointer.replace(&math).expect("Failed to place pointer");
        pointer.replace(&phys).expect("Failed to replace pointer");

        assert_eq!(pointer.target().unwrap(), phys);
        assert!(!dir.path().join(".current-course.new").exists());
    }

    #[test]
    fn refuses_to_replace_directory() {
        let dir = tempdir().expect("Failed to create tempdir");
        let path = dir.path().join("current-course");
        std::fs::create_dir(&path).expect("Failed to create dir");

        let pointer = Pointer::new(path.clone());
        assert!(matches!(
            pointer.replace(dir.path()),
            Err(PointerError::NotALink(_))
        ));
        assert!(path.is_dir());
    }

    #[test]
    fn dangling_pointer_has_no_course_dir() {
        let dir = tempdir().expect("Failed to create tempdir");
        let pointer = Pointer::new(dir.path().join("current-course"));
        pointer
            .replace(&dir.path().join("gone"))
            .expect("Failed to place pointer");
        assert!(pointer.target().is_ok());
        assert!(matches!(pointer.course_dir(), Err(PointerError::Unset)));
    }
}
