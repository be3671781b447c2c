//! MCP Companion CLI
//!
//! Sets up the project memory store and rules document, and views, updates and
//! appends to the store from the command line.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use companion_core::ops::{self, AddOutcome, FocusChange, UpdateOutcome, ViewOutcome};
use companion_core::setup::{self, SetupReport};
use companion_core::{EntryType, Prompter, Storage, StorageError};

/// MCP Companion - project memory for Cursor IDE collaboration
#[derive(Parser)]
#[command(name = "mcp-companion")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Setup MCP for enhanced Cursor IDE collaboration")]
#[command(long_about = "Keeps a structured AI memory in .mcp/ai_memory.json and collaboration rules in .cursor/rules/companion.mdc.\n\nRunning without a command performs setup.")]
struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the memory store and rules document
    Setup,

    /// Show the memory summary or one section
    Memory {
        /// Top-level section to print (e.g. decision_log)
        #[arg(long)]
        section: Option<String>,
    },

    /// Update project version or development focus
    Update {
        /// New current version
        #[arg(long)]
        version: Option<String>,
        /// Upcoming change to add to the development focus
        #[arg(long)]
        focus: Option<String>,
    },

    /// Add a detailed memory entry
    Add {
        /// Answer the questions interactively
        #[arg(long, short = 'i')]
        interactive: bool,
        /// Entry type (feature, decision, session, architecture, pattern, solution, bugfix, optimization)
        #[arg(long = "type", value_name = "TYPE")]
        entry_type: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch a parsed command. `Ok(false)` means the failure was already reported.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let root = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    debug!("Project root: {}", root.display());

    match cli.command.unwrap_or(Commands::Setup) {
        Commands::Setup => Ok(run_setup(&root)),
        Commands::Memory { section } => run_memory(&root, section.as_deref()),
        Commands::Update { version, focus } => run_update(&root, version, focus),
        Commands::Add {
            interactive,
            entry_type,
        } => run_add(&root, interactive, entry_type),
    }
}

/// Turn a load failure into a message the user can act on
fn storage_error(err: StorageError) -> anyhow::Error {
    match err {
        StorageError::MissingStore(path) => anyhow::anyhow!(
            "No memory store found at {}. Run `mcp-companion setup` first.",
            path.display()
        ),
        other => other.into(),
    }
}

/// Run setup command
fn run_setup(root: &Path) -> bool {
    println!("{}", "=== MCP Cursor Companion Setup ===".cyan().bold());
    println!();

    let result = setup::initialize_with_progress(root, Utc::now(), |step| {
        println!("  {} {}", ">".cyan(), step);
    });

    match result {
        Ok(report) => {
            print_setup_success(&report);
            true
        }
        Err(e) => {
            println!();
            eprintln!("{} {}", "Setup failed:".red().bold(), e);
            println!();
            println!("{}", "Troubleshooting:".yellow().bold());
            println!("1. Ensure you have write permissions in the project directory");
            println!("2. Check if Cursor IDE is properly installed");
            println!("3. Try running the command with administrator privileges");
            false
        }
    }
}

fn print_setup_success(report: &SetupReport) {
    println!();
    println!("{}", "Setup completed successfully!".green().bold());
    println!();
    println!("{}: {}", "Project".white().bold(), report.project_name);
    let memory_state = if report.memory_created {
        "created".green()
    } else {
        "kept existing".yellow()
    };
    println!(
        "{}: {} ({})",
        "Memory".white().bold(),
        report.memory_path.display(),
        memory_state
    );
    println!("{}: {}", "Rules".white().bold(), report.rules_path.display());

    println!();
    println!("{}", "What's New:".cyan().bold());
    println!("1. Enhanced AI Context Management");
    println!("2. Project-Specific Knowledge Base");
    println!("3. Smart Code Generation");
    println!("4. Improved Collaboration Features");
    println!();
    println!("{}", "Next Steps:".cyan().bold());
    println!("1. Restart Cursor IDE to activate new features");
    println!("2. Use Cmd/Ctrl + Shift + A to access AI features");
    println!("3. Start coding with enhanced AI assistance");
    println!();
    println!("{}", "Pro Tip:".yellow().bold());
    println!("The AI companion learns from your codebase over time.");
    println!("The more you use it, the better it becomes at helping you!");
}

/// Run memory (view) command
fn run_memory(root: &Path, section: Option<&str>) -> anyhow::Result<bool> {
    let storage = Storage::new(root);
    let outcome = ops::view(&storage, section).map_err(storage_error)?;

    match outcome {
        ViewOutcome::Summary(summary) => {
            println!("{}", "=== AI Memory ===".cyan().bold());
            println!();
            println!(
                "{}: {}",
                "Project".white().bold(),
                summary.project_name.as_deref().unwrap_or("(unnamed)")
            );
            println!(
                "{}: {}",
                "Version".white().bold(),
                summary.current_version.as_deref().unwrap_or("(unset)")
            );
            println!("{}: {}", "Features".white().bold(), summary.stats.features);
            println!("{}: {}", "Decisions".white().bold(), summary.stats.decisions);
            println!("{}: {}", "Sessions".white().bold(), summary.stats.sessions);
            println!("{}: {}", "Detailed Memories".white().bold(), summary.stats.memories);
            println!();
            print_sections(&summary.sections);
            println!();
            println!(
                "{}",
                "Use --section <name> to print a section.".dimmed()
            );
        }
        ViewOutcome::Section { name, value } => {
            println!("{}", format!("=== {} ===", name).cyan().bold());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ViewOutcome::UnknownSection {
            requested,
            available,
        } => {
            eprintln!(
                "{} Section '{}' not found",
                "!".yellow().bold(),
                requested
            );
            print_sections(&available);
        }
    }

    Ok(true)
}

fn print_sections(sections: &[String]) {
    println!("{}", "Available sections:".white().bold());
    if sections.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for name in sections {
        println!("  {} {}", "-".dimmed(), name);
    }
}

/// Run update command
fn run_update(root: &Path, version: Option<String>, focus: Option<String>) -> anyhow::Result<bool> {
    let storage = Storage::new(root);
    let request = ops::UpdateRequest { version, focus };
    let outcome = ops::update(&storage, &request, Utc::now()).map_err(storage_error)?;

    match outcome {
        UpdateOutcome::NothingRequested => {
            println!(
                "{}",
                "No updates specified. Use --version and/or --focus.".yellow()
            );
        }
        UpdateOutcome::Applied { changes, saved } => {
            if let Some(version) = &changes.version {
                println!("{} Version set to {}", "OK".green(), version.as_str().bold());
            }
            match &changes.focus {
                Some(FocusChange::Added(focus)) => {
                    println!("{} Added upcoming change: {}", "OK".green(), focus);
                }
                Some(FocusChange::AlreadyPresent(focus)) => {
                    println!(
                        "{} Upcoming change already listed: {}",
                        "-".dimmed(),
                        focus
                    );
                }
                None => {}
            }
            if saved {
                println!();
                println!("{}", "Memory updated successfully".green().bold());
            }
        }
    }

    Ok(true)
}

/// Run add command
fn run_add(root: &Path, interactive: bool, entry_type: Option<String>) -> anyhow::Result<bool> {
    let storage = Storage::new(root);
    let request = ops::AddRequest {
        interactive,
        entry_type,
    };

    if interactive {
        println!("{}", "=== Add Memory Entry ===".cyan().bold());
        println!();
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let outcome = match ops::add(&storage, &request, &mut prompter, Utc::now()) {
        Ok(outcome) => outcome,
        Err(ops::AddError::Storage(e)) => return Err(storage_error(e)),
        Err(e) => return Err(e.into()),
    };

    match outcome {
        AddOutcome::Added(report) => {
            println!();
            println!(
                "{}",
                format!("Added {} memory ({} total)", report.entry_type, report.total_memories)
                    .green()
                    .bold()
            );
            if let Some(registry) = report.registry {
                println!("  {} Also recorded in {}", ">".cyan(), registry.section());
            }
        }
        AddOutcome::Unsupported {
            requested,
            known_type,
        } => {
            if !known_type {
                println!(
                    "{} Unknown entry type '{}'. Valid types: {}",
                    "!".yellow().bold(),
                    requested,
                    entry_type_list()
                );
            }
            println!(
                "{}",
                "Non-interactive mode is not yet implemented. Please use --interactive.".yellow()
            );
        }
        AddOutcome::Usage => {
            println!("{}", "Usage:".white().bold());
            println!("  mcp-companion add --interactive");
            println!();
            println!("{}: {}", "Entry types".white().bold(), entry_type_list());
        }
    }

    Ok(true)
}

fn entry_type_list() -> String {
    EntryType::ALL
        .iter()
        .map(EntryType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
