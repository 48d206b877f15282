mod client;
mod cmd;
mod collect;
mod common;
mod diff;
mod error;
mod ident;
mod util;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use cmd::OutputFormat;

#[derive(Parser)]
#[command(name = "gist", version, about = "Create, update, and manage GitHub Gists", long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a gist from one or more files
    Create {
        /// File paths to include in the gist
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Description for the gist
        #[arg(short, long)]
        description: Option<String>,
        /// Make the gist public (default: secret)
        #[arg(short, long)]
        public: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Create a gist from files in a directory matching glob patterns
    FromDir {
        /// Directory to scan
        #[arg(default_value = ".")]
        directory: PathBuf,
        /// Glob patterns to include, repeatable (e.g. --patterns "*.py")
        #[arg(long = "patterns", required = true)]
        patterns: Vec<String>,
        /// Description for the gist
        #[arg(short, long)]
        description: Option<String>,
        /// Make the gist public (default: secret)
        #[arg(short, long)]
        public: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Create a quick secret gist from stdin
    Quick {
        /// Filename for the gist file
        #[arg(short, long, default_value = "snippet.txt")]
        filename: String,
        /// Description for the gist
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update an existing gist with a minimal diff
    Update {
        /// Gist id or URL to update
        gist: String,
        /// Local files to add or update in the gist
        #[arg(conflicts_with = "from_dir")]
        files: Vec<PathBuf>,
        /// Replace the gist description
        #[arg(short, long)]
        description: Option<String>,
        /// Update from a directory instead of individual files
        #[arg(long)]
        from_dir: Option<PathBuf>,
        /// Glob patterns when using --from-dir, repeatable
        #[arg(long = "patterns", requires = "from_dir")]
        patterns: Vec<String>,
        /// Explicitly add files
        #[arg(long = "add")]
        add: Vec<PathBuf>,
        /// Remove files from the gist by filename
        #[arg(long = "remove")]
        remove: Vec<String>,
        /// Remove remote files not present locally
        #[arg(long, requires = "from_dir")]
        sync: bool,
        /// Show what would change without changing anything
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        force: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Delete one or more gists permanently
    Delete {
        /// Gist ids or URLs to delete
        ids: Vec<String>,
        /// Read additional gist ids from a file, one per line
        #[arg(long)]
        from_file: Option<PathBuf>,
        /// Skip confirmation prompts
        #[arg(long)]
        force: bool,
        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
        /// Minimal output, only errors
        #[arg(short, long)]
        quiet: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// List your gists, newest first
    List {
        /// Gists per page (API maximum 100)
        #[arg(long, default_value_t = 30)]
        limit: u32,
        /// Page number to fetch
        #[arg(long)]
        page: Option<u32>,
        /// Only gists updated after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<DateTime<Utc>>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
    /// Save and inspect your personal access token
    Auth {
        /// Discard the stored token and prompt for a new one
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Create { files, description, public, output } => {
            cmd::create::handle_create(files, description, public, output)
        }
        Commands::FromDir { directory, patterns, description, public, output } => {
            cmd::from_dir::handle_from_dir(directory, patterns, description, public, output)
        }
        Commands::Quick { filename, description } => cmd::quick::handle_quick(filename, description),
        Commands::Update {
            gist,
            files,
            description,
            from_dir,
            patterns,
            add,
            remove,
            sync,
            dry_run,
            force,
            output,
        } => cmd::update::handle_update(cmd::update::UpdateArgs {
            gist,
            files,
            description,
            from_dir,
            patterns,
            add,
            remove,
            sync,
            dry_run,
            force,
            output,
        }),
        Commands::Delete { ids, from_file, force, dry_run, quiet, output } => {
            cmd::delete::handle_delete(ids, from_file, force, dry_run, quiet, output)
        }
        Commands::List { limit, page, since, output } => {
            cmd::list::handle_list(limit, page, since, output)
        }
        Commands::Auth { reset } => cmd::auth::handle_auth(reset),
    }
}
