// Rust guideline compliant 2026-10-12

//! Preferred-ID CLI Application
//!
//! Command-line interface for resolving preferred NamingSystem identifiers.

use clap::Parser;
use preferred_id_app::RepoContext;
use preferred_id_cli::commands;
use preferred_id_cli::commands::resolve::ResolveArgs;
use preferred_id_cli::terminal::{print_success, print_warning};
use preferred_id_cli::{create_formatter, should_use_color};
use preferred_id_core::{Config, NAMING_SYSTEM_TYPE};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "pid",
    version,
    about = "Resolve the preferred identifier of a FHIR NamingSystem",
    long_about = "pid stores FHIR NamingSystem resources in a local JSONL repository and answers the $preferred-id operation: given one known identifier, it returns the identifier of the requested kind (uri, oid, or uuid).",
    after_help = "Examples:\n  pid init\n  pid import naming-systems.json\n  pid list\n  pid show sample\n  pid resolve --id 1.234.5678.90\n  pid resolve --id http://test.uri.com --type oid --format plain\n  pid mcp --log-file pid-mcp.log\n"
)]
struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    /// Output format (defaults to the configured output_format)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log at the configured log_level instead of warn
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

impl From<OutputFormat> for preferred_id_core::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Table => Self::Table,
            OutputFormat::Plain => Self::Plain,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a preferred-id repository
    Init,

    /// Import resources from a JSON resource, JSON array, or JSONL file
    Import {
        /// Path to the file to import
        file: PathBuf,
    },

    /// List stored NamingSystem resources
    List,

    /// Print one stored resource as JSON
    Show {
        /// Logical id of the resource
        id: String,

        /// Resource type of the resource
        #[arg(long, default_value = NAMING_SYSTEM_TYPE)]
        resource_type: String,
    },

    /// Remove one stored resource
    Remove {
        /// Logical id of the resource
        id: String,

        /// Resource type of the resource
        #[arg(long, default_value = NAMING_SYSTEM_TYPE)]
        resource_type: String,
    },

    /// Run the $preferred-id operation
    Resolve {
        /// Known identifier of the NamingSystem
        #[arg(long)]
        id: Option<String>,

        /// Identifier kind to return (oid, uuid, anything else for uri)
        #[arg(long = "type")]
        kind: Option<String>,

        /// Resource type the operation is invoked on
        #[arg(long, default_value = NAMING_SYSTEM_TYPE)]
        resource_type: String,
    },

    /// Serve the repository over MCP on stdio
    Mcp {
        /// Log level (error, warn, info, debug); defaults to the configured log_level
        #[arg(long)]
        log_level: Option<String>,

        /// Write JSON logs to this file instead of stderr
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
}

/// Loads the repository config when one exists, falling back to defaults.
fn repo_config(repo: Option<&std::path::Path>) -> Config {
    RepoContext::discover(repo)
        .and_then(|context| context.load_config())
        .unwrap_or_default()
}

fn init_tracing(verbose: bool, config: &Config) {
    let level = if verbose {
        config.log_level.parse().unwrap_or(Level::INFO)
    } else {
        Level::WARN
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let repo = cli.repo.as_deref();

    let config = repo_config(repo);
    let use_color = !cli.no_color && should_use_color();
    let format = cli
        .format
        .map(preferred_id_core::OutputFormat::from)
        .unwrap_or(config.output_format);
    let formatter = create_formatter(format, use_color, config.pretty_json);

    if !matches!(cli.command, Some(Commands::Mcp { .. })) {
        init_tracing(cli.verbose, &config);
    }

    let result = match cli.command {
        Some(Commands::Init) => commands::init::execute(repo).map(|_| 0),
        Some(Commands::Import { file }) => {
            commands::import::execute(repo, &file).map(|summary| {
                if summary.skipped > 0 {
                    print_warning(
                        &format!("{} entries were skipped", summary.skipped),
                        use_color,
                    );
                } else {
                    print_success("Import complete", use_color);
                }
                0
            })
        }
        Some(Commands::List) => commands::list::execute(repo, formatter.as_ref()).map(|_| 0),
        Some(Commands::Show { id, resource_type }) => {
            commands::show::execute(repo, &resource_type, &id, config.pretty_json).map(|_| 0)
        }
        Some(Commands::Remove { id, resource_type }) => {
            commands::remove::execute(repo, &resource_type, &id).map(|_| 0)
        }
        Some(Commands::Resolve {
            id,
            kind,
            resource_type,
        }) => commands::resolve::execute(
            repo,
            ResolveArgs {
                id,
                kind,
                resource_type,
            },
            formatter.as_ref(),
        )
        .map(commands::resolve::exit_code),
        Some(Commands::Mcp {
            log_level,
            log_file,
        }) => commands::mcp::execute(cli.repo.clone(), log_level, log_file).map(|_| 0),
        None => {
            println!("Use --help for usage information");
            Ok(0)
        }
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{}", formatter.format_error(&format!("{:#}", err)));
            std::process::exit(1);
        }
    }
}
