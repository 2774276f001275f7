mod console;
mod session;

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use guesstree_core::{DecisionTree, GameConfig, KnowledgeStore, LoadStatus, NodeRecord};
use guesstree_store::{DEFAULT_KNOWLEDGE_BASE, FileStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::console::Console;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Thinks of questions until it guesses what you have in mind, and learns when it fails",
    long_about = None
)]
struct Cli {
    /// Knowledge base file (.json, .yaml or .yml)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_KNOWLEDGE_BASE, global = true)]
    knowledge_base: PathBuf,

    /// Game texts and seed tree
    #[arg(short, long, value_name = "FILE.yaml", global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play interactively (default)
    Play,
    /// Print the knowledge base as a tree
    Show,
    /// Write the seed knowledge base
    Init {
        /// Replace an existing knowledge base
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let store = FileStore::for_path(&cli.knowledge_base);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let mut tree = open_tree(store, config);
            let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
            session::play(&mut tree, &mut console)
        }
        Command::Show => {
            let tree = open_tree(store, config);
            let mut console = Console::new(io::empty(), io::stdout().lock());
            session::show(&tree, &mut console)
        }
        Command::Init { force } => init(&store, &config, force),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_yaml_path(path)
            .with_context(|| format!("failed to load game config from {}", path.display())),
        None => GameConfig::from_default_yaml().context("built-in game config is invalid"),
    }
}

fn open_tree(store: FileStore, config: GameConfig) -> DecisionTree<FileStore> {
    let tree = DecisionTree::open(store, config);
    match tree.load_status() {
        LoadStatus::Restored => info!(
            path = %tree.store().path().display(),
            items = tree.item_count(),
            "loaded knowledge base"
        ),
        LoadStatus::Seeded => info!(
            path = %tree.store().path().display(),
            "no knowledge base yet, starting from the seed tree"
        ),
        LoadStatus::Recovered { .. } => info!(
            path = %tree.store().path().display(),
            "the file will be replaced once something new is learned"
        ),
    }
    tree
}

fn init(store: &FileStore, config: &GameConfig, force: bool) -> Result<()> {
    if store.exists() && !force {
        bail!(
            "{} already exists; pass --force to replace it",
            store.path().display()
        );
    }
    store
        .save(&NodeRecord::seed(&config.seed))
        .with_context(|| format!("failed to write {}", store.path().display()))?;
    println!("Wrote seed knowledge base to {}", store.path().display());
    Ok(())
}
