//! tasktrack - personal task tracking from the command line.
//!
//! Each invocation performs one operation against the local store and
//! exits; every mutating command is followed by a fresh listing.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use tasktrack::config::{self, Config};
use tasktrack::display::{self, ShowFilter};
use tasktrack::{Outcome, TaskRepository, TaskStore};

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(version = "0.1.0")]
#[command(about = "Track personal tasks from the command line", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the task database (defaults to the per-user config dir)
    #[arg(long, global = true, env = "TASKTRACK_DB", value_name = "PATH")]
    db: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task: tasktrack add "buy milk" --category groceries
    Add {
        /// Task description (title-cased; words with capitals kept verbatim)
        task: String,

        /// Category for the task (defaults to the configured default)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete the task at POSITION (1-based)
    Delete {
        position: u32,
    },

    /// Update the task at POSITION; only supplied fields change
    Update {
        position: u32,

        /// New task description
        #[arg(short, long)]
        task: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Mark the task at POSITION as completed
    Done {
        position: u32,
    },

    /// Mark the task at POSITION as in progress
    Working {
        position: u32,
    },

    /// Archive the task at POSITION (hidden from default listings)
    Archive {
        position: u32,
    },

    /// Delete every task
    Wipe {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show the task table
    Show {
        /// Comma-separated category filter; "archive" reveals archived tasks
        categories: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "tasktrack=debug,info"
    } else {
        "tasktrack=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> tasktrack::Result<()> {
    let db_path = match cli.db {
        Some(path) => path,
        None => config::default_db_path()?,
    };
    let config_dir = db_path
        .parent()
        .map_or_else(config::data_dir, |dir| Ok(dir.to_path_buf()))?;

    let config = Config::load(&config_dir)?;
    let store = TaskStore::open(&db_path)?;
    let mut repo = TaskRepository::new(store);

    match cli.command {
        Commands::Add { task, category } => {
            let category = category.unwrap_or_else(|| config.default_category.clone());
            let added = repo.insert(&task, &category)?;
            println!(
                "{} Added {} ({})",
                "OK".green().bold(),
                added.description,
                added.category
            );
            show(&repo, None, &config)?;
        }

        Commands::Delete { position } => {
            let index = to_index(position);
            if report(repo.delete_at(index)?, position) {
                println!("{} Deleted task {}", "OK".green().bold(), position);
            }
            show(&repo, None, &config)?;
        }

        Commands::Update {
            position,
            task,
            category,
        } => {
            let index = to_index(position);
            let mut patch = tasktrack::TaskPatch::default();
            if let Some(task) = task {
                patch = patch.with_description(task);
            }
            if let Some(category) = category {
                patch = patch.with_category(category);
            }
            if report(repo.update_at(index, patch)?, position) {
                println!("{} Updated task {}", "OK".green().bold(), position);
            }
            show(&repo, None, &config)?;
        }

        Commands::Done { position } => {
            let index = to_index(position);
            if report(repo.complete_at(index)?, position) {
                println!("{} Task {} marked as completed", "OK".green().bold(), position);
            }
            show(&repo, None, &config)?;
        }

        Commands::Working { position } => {
            let index = to_index(position);
            if report(repo.start_at(index)?, position) {
                println!("{} Task {} marked as ongoing", "OK".green().bold(), position);
            }
            show(&repo, None, &config)?;
        }

        Commands::Archive { position } => {
            let index = to_index(position);
            if report(repo.archive_at(index)?, position) {
                println!("{} Task {} archived", "OK".green().bold(), position);
            }
            show(&repo, None, &config)?;
        }

        Commands::Wipe { force } => {
            if !force {
                eprintln!(
                    "{} This will delete every task. Use --force to confirm.",
                    "Warning:".yellow().bold()
                );
                std::process::exit(1);
            }
            repo.wipe()?;
            println!("{} All tasks deleted", "OK".green().bold());
            show(&repo, None, &config)?;
        }

        Commands::Show { categories } => {
            show(&repo, categories.as_deref(), &config)?;
        }
    }

    Ok(())
}

/// Translate a 1-based user position to a 0-based index.
///
/// Position 0 is rejected with a pointer to `wipe`: the old behavior of
/// wiping the list through `delete 0` made accidental data loss too easy.
fn to_index(position: u32) -> i64 {
    if position == 0 {
        eprintln!(
            "{} Position 0 is reserved. To delete every task, run {}",
            "Error:".red().bold(),
            "tasktrack wipe --force".cyan()
        );
        std::process::exit(1);
    }
    i64::from(position) - 1
}

/// Print the informational note for out-of-range positions.
/// Returns true when the mutation was applied.
fn report(outcome: Outcome, position: u32) -> bool {
    match outcome {
        Outcome::Applied => true,
        Outcome::NoSuchPosition { .. } => {
            println!("{} No task at position {}", "Note:".yellow(), position);
            false
        }
    }
}

fn show(repo: &TaskRepository, categories: Option<&str>, config: &Config) -> tasktrack::Result<()> {
    let tasks = repo.tasks()?;
    let filter = ShowFilter::parse(categories);
    print!("{}", display::render(&tasks, &filter, config));
    Ok(())
}
