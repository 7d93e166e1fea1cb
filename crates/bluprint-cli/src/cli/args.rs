use bluprint_core::PartId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bluprint",
    version,
    about = "Check PC builds for hardware compatibility"
)]
pub struct Cli {
    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a build made of catalog part ids
    Check(CheckArgs),
    /// Check two parts against the pairwise rules for their categories
    Pair(PairArgs),
    /// List the active compatibility rules
    Rules(RulesArgs),
    /// Validate every part's specifications against its category schema
    Validate(ValidateArgs),
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Clone, Debug)]
pub struct CatalogArgs {
    /// Catalog document (YAML or JSON) with `parts` and `rules`
    #[arg(long, env = "BLUPRINT_CATALOG")]
    pub catalog: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Clone, Debug)]
pub struct EngineArgs {
    /// Engine configuration (YAML); defaults plus BLUPRINT_* env vars otherwise
    #[arg(long, env = "BLUPRINT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Part ids in the build; duplicates are ignored
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<PartId>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct PairArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    pub first: PartId,
    pub second: PartId,
}

#[derive(clap::Args, Clone, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Include inactive rules
    #[arg(long)]
    pub all: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}
