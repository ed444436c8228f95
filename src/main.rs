//! Taskpanel - Markdown checkbox task panel
//!
//! Command-line front end: list, toggle and locate the tasks of a vault,
//! scaffold its folders and keep a refreshing view open.

use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use taskpanel::scaffold::{create_daily_log, create_task_file, ensure_layout};
use taskpanel::{
    panel, render_forest, Completion, FsVault, PanelConfig, RenderOptions, TaskId, TaskPanel,
    TaskPanelError, UpdateOutcome,
};

#[derive(Parser)]
#[command(name = "taskpanel")]
#[command(version)]
#[command(about = "Browse and toggle Markdown checkbox tasks in a notes vault", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Vault directory (defaults to current directory)
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every task of the task folder as a nested checklist
    List {
        /// Output the flat task list as JSON
        #[arg(long)]
        json: bool,

        /// Show task ids
        #[arg(long)]
        ids: bool,

        /// Hide completed tasks and their subtasks
        #[arg(long)]
        hide_completed: bool,
    },

    /// Mark a task complete
    Check {
        /// Task id as shown by `list --ids`
        id: String,
    },

    /// Mark a task incomplete
    Uncheck {
        /// Task id as shown by `list --ids`
        id: String,
    },

    /// Flip a task's completion
    Toggle {
        /// Task id as shown by `list --ids`
        id: String,
    },

    /// Print the file and 1-based line a task is on now
    Locate {
        /// Task id as shown by `list --ids`
        id: String,
    },

    /// Create an empty, timestamped task file
    New,

    /// Create today's daily log from the template
    DailyLog,

    /// Create the folder layout and the log template
    Init,

    /// Re-render the task list on every refresh until Ctrl+C
    Watch {
        /// Refresh interval in milliseconds (0 renders once)
        #[arg(long, value_name = "MS")]
        interval: Option<u64>,

        /// Hide completed tasks and their subtasks
        #[arg(long)]
        hide_completed: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration as JSON
    Show,

    /// Show the settings file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "taskpanel=debug,info"
    } else {
        "taskpanel=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let vault_path = cli.vault.canonicalize().unwrap_or(cli.vault.clone());

    if !vault_path.is_dir() {
        eprintln!(
            "{} Vault directory does not exist: {}",
            "Error:".red().bold(),
            vault_path.display()
        );
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &vault_path).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if e.is_recoverable() {
            eprintln!("   Run {} to see current task ids", "taskpanel list --ids".cyan());
        }
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(command: Commands, vault_path: &Path) -> taskpanel::Result<()> {
    let config = PanelConfig::load(vault_path)?;

    match command {
        Commands::List {
            json,
            ids,
            hide_completed,
        } => {
            let mut panel = TaskPanel::new(config, FsVault::new(vault_path));
            let snapshot = panel.snapshot()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.tasks)?);
            } else {
                let options = RenderOptions {
                    show_ids: ids,
                    hide_completed,
                };
                print!("{}", render_forest(&snapshot.forest(), &options));
            }
        }

        Commands::Check { id } => update(config, vault_path, &id, Completion::Check)?,
        Commands::Uncheck { id } => update(config, vault_path, &id, Completion::Uncheck)?,
        Commands::Toggle { id } => update(config, vault_path, &id, Completion::Toggle)?,

        Commands::Locate { id } => {
            let mut panel = TaskPanel::new(config, FsVault::new(vault_path));
            let snapshot = panel.snapshot()?;
            let task = snapshot
                .find(&TaskId::from(id.as_str()))
                .ok_or(TaskPanelError::UnknownTaskId { id })?;

            match panel.locate(task)? {
                Some(line) => println!("{}:{}", task.file_path, line + 1),
                None => {
                    return Err(TaskPanelError::task_not_found(
                        task.file_path.as_str(),
                        task.text.as_str(),
                    ))
                }
            }
        }

        Commands::New => {
            let mut vault = FsVault::new(vault_path);
            let path = create_task_file(&mut vault, &config, Local::now().naive_local())?;
            println!("{} Created {}", "OK".green().bold(), path);
        }

        Commands::DailyLog => {
            let mut vault = FsVault::new(vault_path);
            match create_daily_log(&mut vault, &config, Local::now().date_naive())? {
                Some(path) => println!("{} Created {}", "OK".green().bold(), path),
                None => println!("{} Today's log already exists", "OK".green()),
            }
        }

        Commands::Init => {
            let mut vault = FsVault::new(vault_path);
            let mut created = ensure_layout(&mut vault, &config)?;

            let settings_path = PanelConfig::settings_path(vault_path);
            if !settings_path.exists() {
                config.save(vault_path)?;
                created.push(format!("settings: {}", settings_path.display()));
            }

            if created.is_empty() {
                println!("{} Vault layout already complete", "OK".green());
            } else {
                println!("{} Created:", "OK".green().bold());
                for item in &created {
                    println!("   {}", item);
                }
            }

            if config.daily_log_enabled {
                let today = Local::now().date_naive();
                if let Some(path) = create_daily_log(&mut vault, &config, today)? {
                    println!("{} Created {}", "OK".green().bold(), path);
                }
            }
        }

        Commands::Watch {
            interval,
            hide_completed,
        } => {
            let mut config = config;
            if let Some(interval) = interval {
                config.refresh_interval = interval;
            }

            let options = RenderOptions {
                show_ids: false,
                hide_completed,
            };
            let mut task_panel = TaskPanel::new(config, FsVault::new(vault_path));
            let rendered = panel::watch(&mut task_panel, |snapshot| {
                println!(
                    "{} {}",
                    "Refresh".cyan().bold(),
                    Local::now().format("%H:%M:%S").to_string().dimmed()
                );
                print!("{}", render_forest(&snapshot.forest(), &options));
            })
            .await?;
            tracing::debug!("Rendered {} snapshots", rendered);
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Path => {
                let path = PanelConfig::settings_path(vault_path);
                let status = if path.exists() {
                    "exists".green()
                } else {
                    "not found, using defaults".yellow()
                };
                println!("{} ({})", path.display(), status);
            }
        },
    }

    Ok(())
}

fn update(
    config: PanelConfig,
    vault_path: &Path,
    id: &str,
    completion: Completion,
) -> taskpanel::Result<()> {
    let mut panel = TaskPanel::new(config, FsVault::new(vault_path));
    let snapshot = panel.snapshot()?;
    let (task, outcome) = panel.update(&snapshot, &TaskId::from(id), completion)?;

    let marker = if completion.resolve(task.completed) {
        "[x]"
    } else {
        "[ ]"
    };
    match outcome {
        UpdateOutcome::Written { line } => println!(
            "{} {} {} ({}:{})",
            "OK".green().bold(),
            marker,
            task.text,
            task.file_path,
            line + 1
        ),
        UpdateOutcome::AlreadySet { line } => println!(
            "{} {} {} already set ({}:{})",
            "OK".green(),
            marker,
            task.text,
            task.file_path,
            line + 1
        ),
    }
    Ok(())
}
