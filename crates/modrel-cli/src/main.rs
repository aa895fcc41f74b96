// Rust guideline compliant 2026-10-17

//! modrel CLI application.
//!
//! Command-line interface for releasing modules: create releases, check
//! readiness, announce releases on linked issues and clean up pre-releases.

use clap::Parser;
use modrel_app::{
    AppError, CleanOptions, CommentOptions, CreateOptions, ErrorEnvelope, ModuleOptions,
    SuccessEnvelope,
};
use modrel_cli::output::print_json;
use modrel_cli::output_mode::{is_json_output, set_json_output};
use modrel_cli::terminal::print_error;
use modrel_cli::{commands, logging, should_use_color, GhCli};
use modrel_core::{Config, FixtureHost, HostingApi, OutputFormat, WebLinks};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "modrel",
    version,
    about = "modrel: release modules and track linked issues",
    long_about = "modrel creates module releases, checks whether the changes since the last stable release are linked to verified issues, announces releases on those issues and removes obsolete pre-releases.",
    after_help = "Examples:\n  modrel check --repo NethServer/ns8-mail\n  modrel create --testing\n  modrel create --release-name 1.2.0 --with-linked-issues\n  modrel comment 1.2.0\n  modrel clean --release-name 1.2.0 --dry-run\n"
)]
struct Cli {
    /// Module repository (owner/name); defaults to the current directory's repository
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Repository holding the linked issues (owner/name)
    #[arg(long, global = true)]
    issues_repo: Option<String>,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve the hosting platform from a JSON snapshot instead of gh
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Create a new release
    Create {
        /// Commit SHA to release; must be on the default branch
        #[arg(long)]
        release_refs: Option<String>,

        /// Release name (semantic version)
        #[arg(long)]
        release_name: Option<String>,

        /// Create a testing pre-release, naming it automatically when no name is given
        #[arg(long)]
        testing: bool,

        /// Create the release as draft
        #[arg(long)]
        draft: bool,

        /// Append the issues linked since the previous release to the notes
        #[arg(long)]
        with_linked_issues: bool,
    },

    /// Check whether the module is ready to be released
    Check,

    /// Comment the release on its linked issues
    Comment {
        /// Release to announce; defaults to the latest release
        version: Option<String>,
    },

    /// Delete the pre-releases of a stable release
    Clean {
        /// Stable release; defaults to the latest stable release
        #[arg(long)]
        release_name: Option<String>,

        /// List the pre-releases without deleting them
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_json_output(cli.json);
    let stderr_color = !cli.no_color && should_use_color();

    if let Err(err) = logging::init(cli.debug) {
        print_error(&format!("{:#}", err), stderr_color);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, stderr_color),
    }
}

fn run(cli: Cli) -> modrel_app::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(issues_repo) = &cli.issues_repo {
        config.issues_repo = issues_repo.clone();
        config.validate()?;
    }
    if config.output_format == OutputFormat::Json {
        set_json_output(true);
    }
    let use_color = !cli.no_color && !is_json_output() && should_use_color();

    let host: Box<dyn HostingApi> = match &cli.fixture {
        Some(path) => Box::new(
            FixtureHost::from_path(path)?.with_links(WebLinks::new(config.web_host.clone())),
        ),
        None => Box::new(GhCli::new()),
    };
    let module = ModuleOptions::from_config(&config, cli.repo);

    match cli.command {
        Commands::Create {
            release_refs,
            release_name,
            testing,
            draft,
            with_linked_issues,
        } => {
            let options = CreateOptions {
                release_refs,
                release_name,
                testing,
                draft,
                with_linked_issues,
            };
            commands::create::execute(host.as_ref(), &module, &options, use_color)
        }
        Commands::Check => commands::check::execute(host.as_ref(), &module, use_color),
        Commands::Comment { version } => {
            let options = CommentOptions { release: version };
            commands::comment::execute(host.as_ref(), &module, &options, use_color)
        }
        Commands::Clean {
            release_name,
            dry_run,
        } => {
            let options = CleanOptions {
                release_name,
                dry_run,
            };
            commands::clean::execute(host.as_ref(), &module, &options, use_color)
        }
    }
}

/// Loads the explicit config file, or `modrel.toml` in the working directory.
fn load_config(path: Option<&Path>) -> modrel_app::Result<Config> {
    let config = match path {
        Some(path) => Config::load_file(path)?,
        None => Config::load(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Prints a failed run and picks the exit code.
///
/// "Nothing to release" is a terminal state, not a failure.
fn report(err: &AppError, use_color: bool) -> ExitCode {
    if err.is_nothing_to_release() {
        if is_json_output() {
            let mut result = err.details().unwrap_or_else(|| serde_json::json!({}));
            result["outcome"] = serde_json::json!("nothing_to_release");
            let _ = print_json(&SuccessEnvelope::new(result));
        } else {
            println!("{}", err);
        }
        return ExitCode::SUCCESS;
    }

    if is_json_output() {
        let _ = print_json(&ErrorEnvelope::from_error(err));
    } else {
        print_error(&err.to_string(), use_color);
    }
    ExitCode::FAILURE
}
