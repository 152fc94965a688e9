use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use color_eyre::{
    eyre::{eyre, Result, WrapErr},
    owo_colors::OwoColorize,
};

use crate::context::Context;

/// Subdirectory searched when the course folder itself holds no pdf.
const BUILD_DIR: &str = "build";

/// Open the pdf of the current course in the viewer.
pub(super) fn pdf(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let dir = ctx.pointer().course_dir()?;
    let pdf = match find_pdf(dir)? {
        Some(pdf) => Some(pdf),
        None => find_pdf(&dir.join(BUILD_DIR)).unwrap_or_else(|err| {
            tracing::debug!("{err:#}");
            None
        }),
    };

    match pdf {
        Some(pdf) => super::launch(ctx.viewer(), pdf.as_os_str()),
        None => {
            writeln!(out, "{}", "The pdf file has not been found".red())?;
            Err(eyre!("No pdf file found in '{}'", dir.display()))
        }
    }
}

/// Open the current course folder in the editor.
pub(super) fn folder(ctx: &Context) -> Result<()> {
    let dir = ctx.pointer().course_dir()?;
    super::launch(ctx.editor(), dir.as_os_str())
}

/// Open the link of the current course in the browser.
pub(super) fn link(ctx: &Context) -> Result<()> {
    let meta = ctx.current_metadata();
    if meta.link.is_empty() {
        tracing::warn!("The current course has no link, opening the browser anyway");
    }
    super::launch(ctx.browser(), meta.link.as_ref())
}

/// The first file with a `.pdf` extension directly inside `dir`, by name. A missing directory
/// has no pdf.
fn find_pdf(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .wrap_err_with(|| format!("Failed to read directory '{}'", dir.display()))
        }
    };

    let mut pdfs = Vec::new();
    for entry in entries {
        let path = entry
            .wrap_err_with(|| format!("Failed to read entry in '{}'", dir.display()))?
            .path();
        if path.extension().map_or(false, |ext| ext == "pdf") {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs.into_iter().next())
}
