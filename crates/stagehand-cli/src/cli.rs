//! CLI argument definitions for stagehand.
//!
//! Uses `clap` derive macros to define the full command surface. Each
//! command corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "stagehand",
    version,
    about = "Package, sign, and publish Maven artifact sets",
    long_about = "Stagehand packages a compiled JVM library into a Maven publication \
                  (binary, sources, and javadoc jars plus POM), produces detached PGP \
                  signatures, and deploys the set to a staging repository."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold Publish.toml, .stagehand.env, and HEADER in this directory
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Produce the artifact set (binary, sources, and javadoc jars)
    Package {
        /// Use an existing classes directory instead of invoking javac
        #[arg(long)]
        classes_dir: Option<PathBuf>,
    },

    /// Sign an already-packaged artifact set
    Sign,

    /// Print or write the generated POM descriptor
    Pom {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Verify the license header on all source files
    Check {
        /// Prepend the header to non-conforming files
        #[arg(long)]
        apply: bool,
    },

    /// Run the full pipeline: package, sign, and upload
    Publish {
        /// Stop after signing; make no network calls
        #[arg(long)]
        dry_run: bool,
        /// Use an existing classes directory instead of invoking javac
        #[arg(long)]
        classes_dir: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
