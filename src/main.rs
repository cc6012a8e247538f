use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use twig::areas::repository::Repository;
use twig::artifacts::core::config;
use twig::artifacts::core::pager::PagerWriter;
use twig::artifacts::core::telemetry;
use twig::errors::RepositoryError;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny distributed version control system",
    long_about = "twig keeps content-addressed snapshots of a working tree, with branches, \
    three-way merges and push/fetch/pull between repositories on the same filesystem.",
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
        about = "Create an empty repository in the current directory",
        long_about = "This command creates the .twig directory with a root commit on branch master."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal",
        long_about = "This command unstages a file staged for addition. A file tracked by the \
        current commit is staged for removal and deleted from the working tree."
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command creates a new commit on the current branch with the specified message."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and working tree state")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "This command either switches to a branch (`checkout <branch>`), restores a file \
        from the head commit (`checkout -- <file>`) or restores a file from a given commit \
        (`checkout <commit> -- <file>`)."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to, or the commit to restore from")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch to delete")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id, possibly abbreviated")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register another repository as a remote")]
    AddRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
        #[arg(index = 2, help = "The remote repository directory or its .twig directory")]
        location: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1, help = "The remote name")]
        name: String,
    },
    #[command(name = "push", about = "Publish the current head to a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "fetch", about = "Copy a remote branch into <remote>/<branch>")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "pull", about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints a blob's bytes or a commit's stored form. \
        Commit ids may be abbreviated."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id")]
        object: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
            && !config::pager_disabled()
            && std::io::stdout().is_terminal()
    }
}

fn main() -> Result<()> {
    telemetry::init();
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match run(cli.command) {
        Err(error) => match error.downcast_ref::<RepositoryError>() {
            Some(repository_error) => {
                eprintln!("{repository_error}");
                Ok(())
            }
            None => Err(error),
        },
        ok => ok,
    }
}

fn run(command: Commands) -> Result<()> {
    let pwd = std::env::current_dir()?;

    if let Commands::Init = command {
        let mut repository = Repository::init(&pwd, Box::new(std::io::stdout()))?;
        return repository.flush();
    }

    let pager = command.is_paged().then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };
    let mut repository = Repository::open(&pwd, writer)?;

    match &command {
        // handled above, before a repository exists
        Commands::Init => {}
        Commands::Add { file } => repository.add(file)?,
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, file } => match (target, file) {
            (commit, Some(file)) => repository.checkout_file(commit.as_deref(), file)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => anyhow::bail!(RepositoryError::IncorrectOperands),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => {
            repository.merge(branch)?;
        }
        Commands::AddRemote { name, location } => repository.add_remote(name, location)?,
        Commands::RmRemote { name } => repository.rm_remote(name)?,
        Commands::Push { remote, branch } => repository.push(remote, branch)?,
        Commands::Fetch { remote, branch } => {
            repository.fetch(remote, branch)?;
        }
        Commands::Pull { remote, branch } => {
            repository.pull(remote, branch)?;
        }
        Commands::CatFile { object } => repository.cat_file(object)?,
    }

    repository.flush()?;

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
