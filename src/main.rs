use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use lit::Repository;
use lit::artifacts::core::PagerWriter;
use minus::Pager;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal local version control tool",
    long_about = "lit records snapshots of a file tree, deduplicates file contents by hash \
    and lets several named branches share one commit history.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path \
        and records an empty initial commit on the main branch."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stores the contents of the given files in the content store and stages them. \
        Directories are expanded to every file below them."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "rm",
        about = "Unstage a file",
        long_about = "This command removes a file from the staging area, drops its blob when nothing else \
        references it and deletes the working file unless --cached is given."
    )]
    Rm {
        #[arg(long, help = "Keep the working file")]
        cached: bool,
        #[arg(index = 1, help = "The file to unstage")]
        path: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files as a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create, delete or list branches",
        long_about = "This command manages branches. Deleting a branch also removes the commits \
        that only that branch could reach."
    )]
    Branch {
        #[command(subcommand)]
        action: Option<BranchAction>,
    },
    #[command(
        name = "checkout",
        about = "Switch to another branch",
        long_about = "This command makes the given branch current and restores its files in the work tree."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to another commit",
        long_about = "This command points the current branch at the given commit (full id or unique prefix) \
        and restores that commit's files in the work tree."
    )]
    Reset {
        #[arg(index = 1, help = "The commit id or prefix")]
        commit: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the current branch",
        long_about = "This command shows the commits reachable from the current branch, newest first."
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit in the repository",
        long_about = "This command shows every commit the repository holds, in creation order."
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Find commits by message",
        long_about = "This command prints the ids of all commits whose message matches exactly."
    )]
    Find {
        #[arg(index = 1, help = "The commit message to look for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command shows the current branch, the staged files and how the work tree \
        differs from them."
    )]
    Status,
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the content store",
        long_about = "This command computes the blob id of a file and can store the blob. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the blob to the content store")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of a blob",
        long_about = "This command prints a blob from the content store. \
        It requires the id (or a unique prefix) of the blob to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The blob id to print")]
        sha: String,
    },
}

#[derive(Subcommand)]
enum BranchAction {
    #[command(about = "Create a branch at the current commit")]
    Create {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Delete a branch and prune its private commits")]
    Delete {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "List branches")]
    List,
}

fn open_repository(writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), writer)
}

fn use_pager() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_repository(Box::new(std::io::stdout()))?,
            };

            repository.init()?
        }
        Commands::Add { paths } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.add(paths)?
        }
        Commands::Rm { cached, path } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.rm(path, *cached)?
        }
        Commands::Commit { message } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.commit(message.as_str())?
        }
        Commands::Branch { action } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            match action {
                Some(BranchAction::Create { name }) => repository.create_branch(name)?,
                Some(BranchAction::Delete { name }) => repository.delete_branch(name)?,
                Some(BranchAction::List) | None => repository.list_branches()?,
            }
        }
        Commands::Checkout { branch } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.checkout(branch)?
        }
        Commands::Reset { commit } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.reset(commit)?
        }
        Commands::Log | Commands::GlobalLog => {
            let global = matches!(cli.command, Commands::GlobalLog);

            if use_pager() {
                let pager = Pager::new();
                let repository = open_repository(Box::new(PagerWriter::new(pager.clone())))?;

                if global {
                    repository.global_log()?
                } else {
                    repository.log()?
                }
                minus::page_all(pager)?;
            } else {
                let repository = open_repository(Box::new(std::io::stdout()))?;

                if global {
                    repository.global_log()?
                } else {
                    repository.log()?
                }
            }
        }
        Commands::Find { message } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;

            repository.find(message)?
        }
        Commands::Status => {
            let repository = open_repository(Box::new(std::io::stdout()))?;

            repository.status()?
        }
        Commands::HashObject { write, file } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::CatFile { sha } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;

            repository.cat_file(sha)?
        }
    }

    Ok(())
}
