use std::io::Write;

use color_eyre::eyre::Result;

use crate::{
    cancel::{cancel_on_signal, CancelToken},
    context::Context,
    metadata::normalize_title,
};

fn course_name(ctx: &Context) -> String {
    let title = ctx.current_metadata().title;
    match ctx.normalize_titles() {
        true => normalize_title(&title),
        false => title,
    }
}

/// Print the name of the current course once.
pub(super) fn print(ctx: &Context, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", course_name(ctx))?;
    Ok(())
}

/// Print the name of the current course every interval until a termination signal arrives.
pub(super) fn watch(ctx: &Context, out: &mut impl Write) -> Result<()> {
    let token = CancelToken::new();
    cancel_on_signal(&token)?;
    watch_until(ctx, out, &token)
}

fn watch_until(ctx: &Context, out: &mut impl Write, token: &CancelToken) -> Result<()> {
    loop {
        writeln!(out, "{}", course_name(ctx))?;
        super::flush(out)?;
        if token.wait_timeout(ctx.watch_interval()) {
            tracing::debug!("Stopped printing the course name");
            return Ok(());
        }
    }
}
