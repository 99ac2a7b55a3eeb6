use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

/// Dynamic form definitions and submission validation.
///
/// Form Forge compiles JSON form definitions into validation contracts,
/// checks submissions against them, and reorders fields in place.
#[derive(Parser)]
#[command(
    name = "form-forge",
    version,
    about = "Compile form definitions and validate submissions against them",
    after_help = "Use 'form-forge <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path [env: FORM_FORGE_CONFIG]
    #[arg(short = 'c', long = "config", global = true, env = "FORM_FORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile form definition files and report errors
    Check(CheckArgs),

    /// Validate a submission file against a form definition
    Validate(ValidateArgs),

    /// Show the compiled contract of a form definition
    Inspect(InspectArgs),

    /// Move a field to a new position and renumber the form
    Reorder(ReorderArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments for `form-forge check`.
#[derive(Args)]
pub struct CheckArgs {
    /// Form files or directories to check (default: `cli.default_form_dir`)
    pub paths: Vec<PathBuf>,
}

/// Arguments for `form-forge validate`.
#[derive(Args)]
pub struct ValidateArgs {
    /// Form definition file
    #[arg(short = 'f', long = "form")]
    pub form: PathBuf,

    /// JSON file holding the submitted data object
    pub submission: PathBuf,
}

/// Arguments for `form-forge inspect`.
#[derive(Args)]
pub struct InspectArgs {
    /// Form definition file
    pub file: PathBuf,
}

/// Arguments for `form-forge reorder`.
#[derive(Args)]
pub struct ReorderArgs {
    /// Form definition file
    pub file: PathBuf,

    /// Name of the field to move
    #[arg(long = "field")]
    pub field: String,

    /// Zero-based target position
    #[arg(long = "to")]
    pub to: usize,

    /// Write the result back to the file instead of printing it
    #[arg(short = 'w', long = "write")]
    pub write: bool,
}

/// Arguments for `form-forge completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
