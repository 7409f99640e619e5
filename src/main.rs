//! CLI entry point for doclink.
//!
//! Commands for fetching definitions and documentation out of a
//! repository at a given revision, listing a file's declarations, and
//! managing configuration.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use doclink::parsing::get_registry;
use doclink::{Settings, Target, Workspace};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Declaration and documentation lookup
#[derive(Parser)]
#[command(
    name = "doclink",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fetch declarations and their documentation from codebases",
    long_about = "Check out a revision in a scratch workspace, parse the requested file, and print the declarations matching a target path such as 'Class1.method1()'.",
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Repository source: exactly one of URL or local path
#[derive(clap::Args)]
struct RepoArgs {
    /// Repository URL to clone
    #[arg(long, conflicts_with = "local")]
    repo: Option<String>,

    /// Local repository path to copy
    #[arg(long)]
    local: Option<PathBuf>,

    /// Revision to check out (branch, tag, or commit SHA)
    #[arg(long, default_value = "HEAD")]
    rev: String,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Initialize project
    #[command(about = "Set up .doclink directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Fetch definition and documentation for a target
    #[command(
        about = "Print definition and documentation of matching declarations",
        after_help = "Examples:\n  doclink fetch 'Class1.method1()' --local . --file src/Class1.java\n  doclink fetch Struct1 --as-type --repo https://example.com/r.git --file main.go\n  doclink fetch staticFunction --local ../proj --rev v1.2 --file pkg/util.go"
    )]
    Fetch {
        /// Target path: Type.member, a bare function name, or a type with --as-type
        target: String,

        #[command(flatten)]
        repo: RepoArgs,

        /// Path of the file inside the repository
        #[arg(long)]
        file: PathBuf,

        /// Treat a bare target as a type name instead of a function name
        #[arg(long)]
        as_type: bool,
    },

    /// Fetch documentation only
    #[command(about = "Print only the documentation of matching declarations")]
    Docs {
        /// Target path, as for fetch
        target: String,

        #[command(flatten)]
        repo: RepoArgs,

        /// Path of the file inside the repository
        #[arg(long)]
        file: PathBuf,

        /// Treat a bare target as a type name instead of a function name
        #[arg(long)]
        as_type: bool,
    },

    /// Print a line range of a file at a revision
    #[command(about = "Print an inclusive zero-based line range of a file")]
    Lines {
        #[command(flatten)]
        repo: RepoArgs,

        /// Path of the file inside the repository
        #[arg(long)]
        file: PathBuf,

        /// First line, zero-based
        #[arg(long)]
        start: usize,

        /// Last line, inclusive
        #[arg(long)]
        end: usize,
    },

    /// List every declaration of a local file
    #[command(about = "Parse one file and print all declarations with their comments")]
    List {
        /// Path to a source file
        path: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print supported languages and their enablement
    #[command(about = "Show available languages and whether each is enabled")]
    Languages,

    /// Show current configuration settings
    #[command(about = "Display active settings")]
    Config,
}

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&settings);

    if let Err(e) = run(cli, settings) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// RUST_LOG wins when set; otherwise `debug = true` in settings raises
/// the default filter
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if settings.debug { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, settings: Arc<Settings>) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            let path = Settings::init_config_file(&cwd, force)?;
            println!("Created {}", path.display());
        }

        Commands::Fetch {
            target,
            repo,
            file,
            as_type,
        } => {
            let target = parse_target(&target, as_type)?;
            let workspace = open_workspace(&repo, settings)?;
            let definitions = workspace.fetch_definition(&target, &repo.rev, &file)?;
            let docs = workspace.fetch_documentation(&target, &repo.rev, &file)?;

            if definitions.is_empty() {
                println!("No declaration matches '{target}' in {}", file.display());
                return Ok(());
            }

            for (definition, doc) in definitions.iter().zip(docs.iter()) {
                if !doc.is_empty() {
                    println!("--- Documentation ---\n{doc}");
                }
                println!("--- Definition ---\n{definition}\n");
            }
        }

        Commands::Docs {
            target,
            repo,
            file,
            as_type,
        } => {
            let target = parse_target(&target, as_type)?;
            let workspace = open_workspace(&repo, settings)?;
            let docs = workspace.fetch_documentation(&target, &repo.rev, &file)?;

            if docs.is_empty() {
                println!("No declaration matches '{target}' in {}", file.display());
                return Ok(());
            }
            for doc in docs {
                println!("{doc}");
            }
        }

        Commands::Lines {
            repo,
            file,
            start,
            end,
        } => {
            let workspace = open_workspace(&repo, settings)?;
            for line in workspace.fetch_lines(&repo.rev, &file, start, end)? {
                println!("{line}");
            }
        }

        Commands::List { path, json } => {
            let source = std::fs::read_to_string(&path)?;
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default();

            let registry = get_registry()
                .lock()
                .map_err(|_| anyhow::anyhow!("language registry lock poisoned"))?;
            let Some(definition) = registry.get_by_extension(extension) else {
                anyhow::bail!(
                    "no parser claims extension '.{extension}' (see 'doclink languages')"
                );
            };
            let mut parser = registry.create_parser(definition.id(), &settings)?;
            let declarations = parser.parse(&source);

            if json {
                println!("{}", serde_json::to_string_pretty(&declarations)?);
            } else {
                for decl in declarations {
                    println!(
                        "{:5} {} {}",
                        decl.range.start_line + 1,
                        decl.kind,
                        decl.qualified_name()
                    );
                    if let Some(doc) = decl.doc_comment {
                        for line in doc.lines() {
                            println!("      # {line}");
                        }
                    }
                }
            }
        }

        Commands::Languages => {
            let registry = get_registry()
                .lock()
                .map_err(|_| anyhow::anyhow!("language registry lock poisoned"))?;
            for def in registry.iter_all() {
                let state = if def.is_enabled(&settings) {
                    "enabled"
                } else {
                    "disabled"
                };
                println!(
                    "{:10} {:9} .{}",
                    def.name(),
                    state,
                    def.extensions().join(" .")
                );
            }
        }

        Commands::Config => {
            println!("{}", toml::to_string_pretty(settings.as_ref())?);
        }
    }

    Ok(())
}

fn parse_target(raw: &str, as_type: bool) -> anyhow::Result<Target> {
    let target = if as_type {
        Target::parse_type(raw)?
    } else {
        Target::parse(raw)?
    };
    Ok(target)
}

fn open_workspace(repo: &RepoArgs, settings: Arc<Settings>) -> anyhow::Result<Workspace> {
    match (&repo.repo, &repo.local) {
        (Some(url), None) => Ok(Workspace::clone(url, settings)?),
        (None, Some(path)) => Ok(Workspace::open_local(path, settings)?),
        (None, None) => anyhow::bail!("one of --repo or --local is required"),
        (Some(_), Some(_)) => unreachable!("clap rejects --repo with --local"),
    }
}
