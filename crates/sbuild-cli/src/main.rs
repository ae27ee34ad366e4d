mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sbuild", about = "Allocate and inspect container build bundles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate a new staging bundle and print its descriptor
    Create {
        /// Staging directory name prefix
        #[arg(long, default_value = "")]
        prefix: String,
        /// Section to run (repeatable, order matters; overrides sbuild.toml)
        #[arg(long = "section", short = 's')]
        sections: Vec<String>,
        /// Overwrite existing output
        #[arg(long, overrides_with = "no_force")]
        force: bool,
        /// Keep existing output, even if sbuild.toml sets `force`
        #[arg(long, overrides_with = "force")]
        no_force: bool,
        /// Build on top of an existing sandbox
        #[arg(long, overrides_with = "no_update")]
        update: bool,
        /// Build from scratch, even if sbuild.toml sets `update`
        #[arg(long, overrides_with = "update")]
        no_update: bool,
        /// Skip the test section
        #[arg(long, overrides_with = "run_test")]
        no_test: bool,
        /// Run the test section, even if sbuild.toml sets `no_test`
        #[arg(long, overrides_with = "no_test")]
        run_test: bool,
        /// Host path to bind-mount during the build (repeatable)
        #[arg(long = "bind", short = 'B')]
        bind_paths: Vec<PathBuf>,
        /// Write the descriptor to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Print the root filesystem path of a bundle
    Rootfs {
        /// Bundle descriptor file
        bundle: PathBuf,
    },
    /// Print the absolute path of a filesystem object
    Resolve {
        /// Bundle descriptor file
        bundle: PathBuf,
        /// Filesystem object label (rootfs, .singularity.d, data, ...)
        label: String,
    },
    /// Print whether a section would run
    ShouldRun {
        /// Section name
        section: String,
        /// Comma-separated section list
        #[arg(long, value_delimiter = ',', conflicts_with = "bundle")]
        sections: Vec<String>,
        /// Take the section list from a bundle descriptor file
        #[arg(long)]
        bundle: Option<PathBuf>,
    },
    /// List the build phases a bundle would run, in order
    Plan {
        /// Bundle descriptor file
        bundle: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                // arch-lint: allow(no-silent-result-drop) reason="unset or unparsable RUST_LOG falls back to info-level logging"
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create {
            prefix,
            sections,
            force,
            no_force,
            update,
            no_update,
            no_test,
            run_test,
            bind_paths,
            out,
        } => commands::create(commands::CreateArgs {
            prefix,
            sections,
            force: switch(force, no_force),
            update: switch(update, no_update),
            no_test: switch(no_test, run_test),
            bind_paths,
            out,
        })?,
        Commands::Rootfs { bundle } => commands::rootfs(&bundle)?,
        Commands::Resolve { bundle, label } => commands::resolve(&bundle, &label)?,
        Commands::ShouldRun {
            section,
            sections,
            bundle,
        } => commands::should_run(&section, sections, bundle.as_deref())?,
        Commands::Plan { bundle } => commands::plan(&bundle)?,
    }

    Ok(())
}

/// `--flag` / `--no-flag` pair: `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
