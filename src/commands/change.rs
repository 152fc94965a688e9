use std::io::Write;

use color_eyre::{
    eyre::{Result, WrapErr},
    owo_colors::OwoColorize,
};

use crate::{context::Context, repository::SelectError};

pub(super) fn change(ctx: &Context, name: &str, out: &mut impl Write) -> Result<()> {
    match ctx.repository().select(name, ctx.pointer()) {
        Ok(course) => {
            writeln!(out, "The current course has been changed to {}", course.name)?;
            Ok(())
        }
        Err(err @ SelectError::InvalidCourse(_)) => {
            writeln!(out, "{}", err.to_string().red())?;
            writeln!(out, "Use the flag -lc to list all the courses")?;
            Err(err.into())
        }
        Err(err) => Err(err).wrap_err("Failed to change course"),
    }
}

// TODO: decide on a folder template (info.yaml, build/) before creating anything on disk
pub(super) fn new(_ctx: &Context, name: &str, out: &mut impl Write) -> Result<()> {
    tracing::info!("Requested creation of course {name}");
    writeln!(out, "Creating the course {name} is not implemented yet")?;
    Ok(())
}
