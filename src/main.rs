use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use gitshim::{
    init_telemetry, init_with, open_with, CommandOutput, GitshimConfig, ProcessCommandExecutor,
    Repo,
};

#[derive(Parser)]
#[command(name = "gitshim")]
#[command(about = "Run basic git operations against a working tree")]
struct Cli {
    /// Repository to operate on
    #[arg(long, short = 'C', global = true, default_value = ".")]
    repo: PathBuf,
    /// Run `git init` when the directory is not a repository yet
    #[arg(long, global = true)]
    auto_create: bool,
    /// Print listings as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a repository
    Init,
    #[command(flatten)]
    Repo(RepoCommand),
}

/// Commands that run against an opened repository
#[derive(Subcommand)]
enum RepoCommand {
    /// Run an arbitrary git command template, `?` marks each argument slot
    Run {
        template: String,
        args: Vec<String>,
    },
    /// Stage files
    Add {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Commit staged changes
    Commit {
        #[arg(long, short = 'm')]
        message: String,
        /// Stage modified and deleted files first (commit -a)
        #[arg(long, short = 'a')]
        all: bool,
    },
    /// Clone this repository to a local path
    Clone { target: PathBuf },
    /// Remove untracked files
    Clean {
        /// Also remove untracked directories
        #[arg(long, short = 'd')]
        dirs: bool,
    },
    /// List local branches
    Branches,
    /// Print the checked-out branch
    CurrentBranch,
    /// List remotes
    Remotes,
    /// Exit 0 if the remote exists, 1 otherwise
    RemoteExists { name: String },
    /// Create a branch at HEAD
    CreateBranch { name: String },
    /// Delete a branch
    DeleteBranch {
        name: String,
        /// Delete even if unmerged (branch -D)
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Check out a branch
    Checkout { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    GitshimConfig::load_env_file()?;
    let config = GitshimConfig::load()?;
    init_telemetry(&config.observability.log_level, config.observability.json_logs)?;

    tokio::runtime::Runtime::new()?.block_on(async { run_command(cli, config).await })
}

async fn run_command(cli: Cli, config: GitshimConfig) -> Result<()> {
    let executor = Arc::new(ProcessCommandExecutor);
    let program = config.git.program.as_str();

    let command = match cli.command {
        Commands::Init => {
            let opened = init_with(&cli.repo, executor, program).await?;
            println!("Initialized git repository in {}", opened.repo.path().display());
            return Ok(());
        }
        Commands::Repo(command) => command,
    };

    let auto_create = cli.auto_create || config.git.auto_create;
    let opened = open_with(&cli.repo, auto_create, executor, program)
        .await
        .with_context(|| format!("Failed to open {}", cli.repo.display()))?;
    if opened.created {
        eprintln!("Initialized git repository in {}", opened.repo.path().display());
    }
    let repo = opened.repo;

    match command {
        RepoCommand::Run { template, args } => print_output(repo.run(&template, args.as_slice()).await?),
        RepoCommand::Add { files } => print_output(repo.add(&files).await?),
        RepoCommand::Commit { message, all } => {
            let output = if all {
                repo.commit_all(&message).await?
            } else {
                repo.commit(&message).await?
            };
            print_output(output);
        }
        RepoCommand::Clone { target } => {
            let clone = repo.clone_to(&target).await?;
            println!("{}", clone.path().display());
        }
        RepoCommand::Clean { dirs } => print_output(repo.clean(dirs).await?),
        RepoCommand::Branches => {
            let branches = repo.list_branches().await?;
            if cli.json {
                print_json(&branches)?;
            } else {
                for branch in branches {
                    let marker = if branch.is_current { '*' } else { ' ' };
                    println!("{marker} {}", branch.name);
                }
            }
        }
        RepoCommand::CurrentBranch => match repo.current_branch().await? {
            Some(name) => println!("{name}"),
            None => anyhow::bail!("No branch is checked out"),
        },
        RepoCommand::Remotes => list_remotes(&repo, cli.json).await?,
        RepoCommand::RemoteExists { name } => {
            if !repo.remote_exists(&name).await? {
                std::process::exit(1);
            }
        }
        RepoCommand::CreateBranch { name } => print_output(repo.create_branch(&name).await?),
        RepoCommand::DeleteBranch { name, force } => {
            print_output(repo.delete_branch(&name, force).await?)
        }
        RepoCommand::Checkout { name } => print_output(repo.checkout(&name).await?),
    }

    Ok(())
}

async fn list_remotes(repo: &Repo, json: bool) -> Result<()> {
    let remotes = repo.list_remotes().await?;
    if json {
        print_json(&remotes)?;
    } else {
        for remote in remotes {
            println!("{remote}");
        }
    }
    Ok(())
}

fn print_output(output: CommandOutput) {
    print!("{}", output.stdout);
    eprint!("{}", output.stderr);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
