//! Command dispatch and handler modules.

mod check;
mod init;
mod package;
mod pom;
mod publish;
mod sign;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { force } => init::exec(force),
        Command::Package { classes_dir } => package::exec(classes_dir),
        Command::Sign => sign::exec(),
        Command::Pom { out } => pom::exec(out.as_deref()),
        Command::Check { apply } => check::exec(apply),
        Command::Publish {
            dry_run,
            classes_dir,
        } => publish::exec(dry_run, classes_dir).await,
    }
}
