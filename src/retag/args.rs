use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "retag", bin_name = "retag", version = get_version())]
#[command(about = "Bulk add, remove and replace frontmatter tags in a vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (defaults to $RETAG_VAULT, then the current directory)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Which documents a tag command touches and whether it writes them.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Folder or single file path, relative to the vault
    #[arg(long)]
    pub folder: Option<String>,

    /// Comma or newline separated list of file paths (overrides --folder)
    #[arg(long)]
    pub files: Option<String>,

    /// Only report what would change
    #[arg(long, conflicts_with = "apply")]
    pub dry_run: bool,

    /// Write changes even when dry-run is the configured default
    #[arg(long)]
    pub apply: bool,

    /// Print the batch result as JSON
    #[arg(long)]
    pub json: bool,
}

impl TargetArgs {
    /// `None` leaves the choice to the configured default.
    pub fn dry_run(&self) -> Option<bool> {
        match (self.dry_run, self.apply) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add tags to every document in scope
    Add {
        /// Comma separated tags
        tags: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Remove tags from every document in scope
    #[command(alias = "rm")]
    Remove {
        /// Comma separated tags
        tags: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Replace tags, pairwise or all matches with one set
    Replace {
        /// Comma separated tags to look for
        #[arg(long)]
        find: String,

        /// Comma separated replacement tags
        #[arg(long = "with", default_value = "")]
        replacement: String,

        /// Replace every matching tag with the full replacement list
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., require-scope)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
