use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::pointer::{Pointer, PointerError};

/// The course tree: `<root>/<semester>/<course>`.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

/// A course folder and the semester it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub semester: String,
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("The course {0} is an invalid course")]
    InvalidCourse(String),
    #[error("Failed to change the current course to {name}")]
    Pointer {
        name: String,
        #[source]
        source: PointerError,
    },
}

impl Repository {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn semesters(&self) -> Vec<String> {
        list_folders(&self.root)
    }

    /// Every course in every semester.
    pub fn courses(&self) -> Vec<Course> {
        self.semesters()
            .into_iter()
            .flat_map(|semester| {
                list_folders(&self.root.join(&semester))
                    .into_iter()
                    .map(move |name| Course {
                        semester: semester.clone(),
                        name,
                    })
            })
            .collect()
    }

    /// Map course names to their semester. When a name appears in several semesters, the one
    /// scanned last wins.
    pub fn scan(&self) -> HashMap<String, String> {
        let mut courses = HashMap::new();
        for course in self.courses() {
            if let Some(previous) = courses.insert(course.name.clone(), course.semester.clone()) {
                tracing::warn!(
                    "Course '{}' exists in both '{}' and '{}', using '{}'",
                    course.name,
                    previous,
                    course.semester,
                    course.semester
                );
            }
        }
        courses
    }

    pub fn course_path(&self, course: &Course) -> PathBuf {
        self.root.join(&course.semester).join(&course.name)
    }

    /// Make `name` the current course. Unknown names leave the pointer untouched.
    pub fn select(&self, name: &str, pointer: &Pointer) -> Result<Course, SelectError> {
        let semester = self
            .scan()
            .remove(name)
            .ok_or_else(|| SelectError::InvalidCourse(name.to_owned()))?;

        let course = Course {
            semester,
            name: name.to_owned(),
        };
        pointer
            .replace(&self.course_path(&course))
            .map_err(|source| SelectError::Pointer {
                name: name.to_owned(),
                source,
            })?;

        tracing::info!("Current course changed to {}/{}", course.semester, course.name);
        Ok(course)
    }
}

/// Names of the directories directly inside `dir`, sorted. Symlinks are not followed, so the
/// current course link never counts as a folder. Errors are logged and yield no entries.
pub fn list_folders(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!("Failed to read directory '{}': {}", dir.display(), err);
            return Vec::new();
        }
    };

    let mut folders = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Failed to read entry in '{}': {}", dir.display(), err);
                continue;
            }
        };
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => (),
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!("Failed to inspect '{}': {}", entry.path().display(), err);
                continue;
            }
        }
        match entry.file_name().into_string() {
            Ok(name) => folders.push(name),
            Err(name) => tracing::warn!("Skipping non UTF-8 folder name {:?}", name),
        }
    }

    folders.sort();
    folders
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{list_folders, Course, Repository, SelectError};
    use crate::pointer::Pointer;
    use std::{collections::HashMap, path::Path};
    use tempfile::tempdir;

    /// Create `semester/course` folders under `root`.
    pub(crate) fn make_tree(root: &Path, courses: &[(&str, &str)]) {
        for (semester, course) in courses {
            std::fs::create_dir_all(root.join(semester).join(course))
                .expect("Failed to create course folder");
        }
    }

    fn course(semester: &str, name: &str) -> Course {
        Course {
            semester: semester.into(),
            name: name.into(),
        }
    }

    #[test]
    fn lists_only_directories() {
        let dir = tempdir().expect("Failed to create tempdir");
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("a"), dir.path().join("link")).unwrap();

        assert_eq!(list_folders(dir.path()), ["a", "b"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempdir().expect("Failed to create tempdir");
        assert!(list_folders(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn scans_courses_of_every_semester() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Math"), ("S1", "Bio"), ("S2", "Phys")]);
        let repo = Repository::new(dir.path().to_owned());

        assert_eq!(
            repo.courses(),
            [course("S1", "Bio"), course("S1", "Math"), course("S2", "Phys")]
        );

        let expected: HashMap<String, String> = [("Math", "S1"), ("Bio", "S1"), ("Phys", "S2")]
            .into_iter()
            .map(|(c, s)| (c.to_owned(), s.to_owned()))
            .collect();
        assert_eq!(repo.scan(), expected);
    }

    #[test]
    fn later_semester_wins_duplicates() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Seminar"), ("S2", "Seminar")]);
        let repo = Repository::new(dir.path().to_owned());

        assert_eq!(repo.scan().get("Seminar").map(String::as_str), Some("S2"));
    }

    #[test]
    fn select_valid_course() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Math"), ("S1", "Bio"), ("S2", "Phys")]);
        let repo = Repository::new(dir.path().to_owned());
        let pointer = Pointer::new(dir.path().join("current-course"));

        let selected = repo.select("Phys", &pointer).expect("Failed to select");
        assert_eq!(selected, course("S2", "Phys"));
        assert_eq!(pointer.target().unwrap(), dir.path().join("S2").join("Phys"));

        // The pointer itself is not picked up as a semester
        assert_eq!(repo.semesters(), ["S1", "S2"]);
    }

    #[test]
    fn select_unknown_course_keeps_pointer() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Math"), ("S2", "Phys")]);
        let repo = Repository::new(dir.path().to_owned());
        let pointer = Pointer::new(dir.path().join("current-course"));
        repo.select("Math", &pointer).expect("Failed to select");

        let res = repo.select("Chem", &pointer);
        assert!(matches!(res, Err(SelectError::InvalidCourse(name)) if name == "Chem"));
        assert_eq!(pointer.target().unwrap(), dir.path().join("S1").join("Math"));
    }
}
