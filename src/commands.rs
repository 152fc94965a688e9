mod change;
mod list;
mod name;
mod open;

use std::{ffi::OsStr, io::Write};

use color_eyre::eyre::{bail, Result, WrapErr};
use common::command::Command as External;

use crate::context::Context;

/// The action flags. At most one of them may be given per invocation.
#[derive(clap::Args, Debug, Default)]
pub struct Action {
    /// Change the current course
    #[clap(long = "change-course", visible_alias = "cc", value_name = "COURSE", group = "task")]
    change_course: Option<String>,
    /// Create a new course (not implemented yet)
    #[clap(long = "new-course", visible_alias = "nc", value_name = "COURSE", group = "task")]
    new_course: Option<String>,
    /// List all the courses, marking the current one
    #[clap(long = "list-courses", visible_alias = "lc", group = "task")]
    list_courses: bool,
    /// Show the course names
    #[clap(long = "show-courses", visible_alias = "sc", group = "task")]
    show_courses: bool,
    /// Show the pdf of the current course
    #[clap(long = "show-pdf", visible_alias = "sPdf", group = "task")]
    show_pdf: bool,
    /// Open the folder of the current course
    #[clap(long = "open-course", visible_alias = "oc", group = "task")]
    open_course: bool,
    /// Open the link of the current course
    #[clap(long = "course-link", visible_alias = "cl", group = "task")]
    course_link: bool,
    /// Print the name of the current course
    #[clap(long = "course-name", visible_alias = "cn", group = "task")]
    course_name: bool,
    /// Keep printing the course name until interrupted
    #[clap(short = 'd', long = "repeat", requires = "course_name")]
    repeat: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show,
    Change(String),
    New(String),
    ShowPdf,
    OpenCourse,
    OpenLink,
    CourseName { repeat: bool },
}

pub type CmdResult = Result<(), ()>;

impl Action {
    /// The requested command, if any.
    pub fn command(self) -> Option<Command> {
        Some(if self.list_courses {
            Command::List
        } else if let Some(name) = self.change_course {
            Command::Change(name)
        } else if let Some(name) = self.new_course {
            Command::New(name)
        } else if self.show_pdf {
            Command::ShowPdf
        } else if self.open_course {
            Command::OpenCourse
        } else if self.course_link {
            Command::OpenLink
        } else if self.course_name {
            Command::CourseName {
                repeat: self.repeat,
            }
        } else if self.show_courses {
            Command::Show
        } else {
            return None;
        })
    }
}

impl Command {
    pub fn run(self, ctx: &Context) -> CmdResult {
        tracing::debug!(command = ?self, "Running");
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        let res = match self {
            Command::List => list::list(ctx, &mut out),
            Command::Show => list::show(ctx, &mut out),
            Command::Change(name) => change::change(ctx, &name, &mut out),
            Command::New(name) => enabled(ctx.actions().new, "new")
                .and_then(|_| change::new(ctx, &name, &mut out)),
            Command::ShowPdf => {
                enabled(ctx.actions().pdf, "pdf").and_then(|_| open::pdf(ctx, &mut out))
            }
            Command::OpenCourse => {
                enabled(ctx.actions().open, "open").and_then(|_| open::folder(ctx))
            }
            Command::OpenLink => enabled(ctx.actions().link, "link").and_then(|_| open::link(ctx)),
            Command::CourseName { repeat: false } => name::print(ctx, &mut out),
            Command::CourseName { repeat: true } => {
                enabled(ctx.actions().watch, "watch").and_then(|_| name::watch(ctx, &mut out))
            }
        };

        res.map_err(|err| report(ctx, &err))
    }
}

fn enabled(on: bool, action: &str) -> Result<()> {
    if !on {
        println!("The {action} action is disabled in the config");
        bail!("Action '{action}' is disabled");
    }
    Ok(())
}

/// Run an external program on `target`, waiting for it to exit.
fn launch(program: &External, target: &OsStr) -> Result<()> {
    program
        .run(target)
        .map(drop)
        .wrap_err_with(|| format!("Failed to run '{program}'"))
}

fn report(ctx: &Context, err: &color_eyre::Report) {
    tracing::error!("{err:?}");
    if ctx.echo_errors() {
        print_error(err);
    }
}

fn print_error(err: &color_eyre::Report) {
    let msg = format!("Error:{err:?}");
    // color-eyre indents using 3 spaces
    let msg = indent::indent_all_by(3, msg);
    eprintln!("{msg}");
}

fn flush(out: &mut impl Write) -> Result<()> {
    out.flush().wrap_err("Failed to write to stdout")
}
