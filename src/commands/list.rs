use std::io::Write;

use color_eyre::{eyre::Result, owo_colors::OwoColorize};

use crate::context::Context;

/// Print every `semester -> course`, marking the current course.
pub(super) fn list(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let current = ctx.current_metadata().folder_name();

    writeln!(out, "Courses:")?;
    for course in ctx.repository().courses() {
        if !current.is_empty() && course.name == current {
            writeln!(
                out,
                "{} -> {} (current course)",
                course.semester,
                course.name.green()
            )?;
        } else {
            writeln!(out, "{} -> {}", course.semester, course.name)?;
        }
    }
    Ok(())
}

/// Print the course names only.
pub(super) fn show(ctx: &Context, out: &mut impl Write) -> Result<()> {
    for course in ctx.repository().courses() {
        writeln!(out, "{}", course.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{context::tests::context_in, repository::tests::make_tree};
    use tempfile::tempdir;

    fn lines(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .expect("Output isn't UTF-8")
            .lines()
            .map(ToOwned::to_owned)
            .collect()
    }

    #[test]
    fn marks_current_course() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Math"), ("S1", "Bio"), ("S2", "Phys")]);
        std::fs::write(dir.path().join("S1/Math/info.yaml"), "title: Math\n").unwrap();
        let ctx = context_in(dir.path());
        ctx.pointer()
            .replace(&dir.path().join("S1/Math"))
            .expect("Failed to place pointer");

        let mut buf = Vec::new();
        super::list(&ctx, &mut buf).unwrap();
        let lines = lines(buf);

        assert_eq!(lines[0], "Courses:");
        assert_eq!(lines.len(), 4);
        let marked: Vec<_> = lines
            .iter()
            .filter(|line| line.ends_with("(current course)"))
            .collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].starts_with("S1 -> ") && marked[0].contains("Math"));
        assert!(lines.contains(&"S1 -> Bio".to_owned()));
        assert!(lines.contains(&"S2 -> Phys".to_owned()));
    }

    #[test]
    fn titles_with_spaces_match_folder() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Linear-Algebra"), ("S1", "Bio")]);
        std::fs::write(
            dir.path().join("S1/Linear-Algebra/info.yaml"),
            "title: Linear Algebra\n",
        )
        .unwrap();
        let ctx = context_in(dir.path());
        ctx.pointer()
            .replace(&dir.path().join("S1/Linear-Algebra"))
            .expect("Failed to place pointer");

        let mut buf = Vec::new();
        super::list(&ctx, &mut buf).unwrap();
        let marked = lines(buf)
            .into_iter()
            .filter(|line| line.ends_with("(current course)"))
            .count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn unreadable_metadata_marks_nothing() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Math"), ("S2", "Phys")]);
        let ctx = context_in(dir.path());
        ctx.pointer()
            .replace(&dir.path().join("S1/Math"))
            .expect("Failed to place pointer");

        let mut buf = Vec::new();
        super::list(&ctx, &mut buf).unwrap();
        let lines = lines(buf);
        assert_eq!(lines, ["Courses:", "S1 -> Math", "S2 -> Phys"]);
    }

    #[test]
    fn show_prints_names() {
        let dir = tempdir().expect("Failed to create tempdir");
        make_tree(dir.path(), &[("S1", "Math"), ("S1", "Bio"), ("S2", "Phys")]);
        let ctx = context_in(dir.path());

        let mut buf = Vec::new();
        super::show(&ctx, &mut buf).unwrap();
        assert_eq!(lines(buf), ["Bio", "Math", "Phys"]);
    }
}
