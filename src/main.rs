use anyhow::Result;
use clap::{Parser, Subcommand};
use kit::areas::repository::Repository;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A minimal git-style version control storage engine",
    long_about = "Kit implements the storage core of a version control system: \
    a content-addressable object database, a binary staging index and an \
    atomic, lockfile-protected HEAD reference."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "add", about = "Stage file contents for the next commit")]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(name = "commit", about = "Record a snapshot of the workspace")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };

            repository.init()?
        }
        Commands::HashObject { write, file } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::Add { paths } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.add(paths)?
        }
        Commands::Commit { message } => {
            let pwd = std::env::current_dir()?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.commit(message.as_str())?
        }
    }

    Ok(())
}
