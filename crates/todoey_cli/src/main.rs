//! Developer CLI over the Todoey store.
//!
//! Drives the same category/item stores the mobile app uses, against a
//! SQLite file chosen by `--db` or `TODOEY_DB_PATH`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todoey_core::db::open_db;
use todoey_core::{
    init_logging, Category, CategoryStore, Item, ItemState, ItemStore, SqliteCategoryRepository,
    SqliteItemRepository, StoreConfig,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "todoey")]
#[command(about = "Todoey - categories and to-do items from the terminal")]
#[command(version)]
struct Cli {
    /// Store file (defaults to TODOEY_DB_PATH, then the temp directory)
    #[arg(long, global = true, value_name = "PATH", env = "TODOEY_DB_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the core library is linked
    Ping,
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },
    /// Manage items inside a category
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a category
    Add {
        name: String,
        /// Display color, stored as given
        #[arg(long, default_value = "")]
        color: String,
    },
    /// List categories in creation order
    List,
    /// Rename a category
    Rename { id: Uuid, name: String },
    /// Delete a category and all of its items
    Delete { id: Uuid },
}

#[derive(Subcommand)]
enum ItemCommands {
    /// Add an item to a category
    Add {
        category: Uuid,
        title: String,
        /// Display color, stored as given
        #[arg(long, default_value = "")]
        color: String,
    },
    /// List a category's items by title
    List { category: Uuid },
    /// Search a category's items, newest first
    Search {
        category: Uuid,
        #[arg(default_value = "")]
        query: String,
    },
    /// Flip an item's done flag
    Toggle { id: Uuid },
    /// Delete an item from a category
    Delete { category: Uuid, id: Uuid },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ping => {
            println!("todoey_core ping={}", todoey_core::ping());
            println!("todoey_core version={}", todoey_core::core_version());
            Ok(())
        }
        Commands::Category { action } => run_category(action, store_path(cli.db)?),
        Commands::Item { action } => run_item(action, store_path(cli.db)?),
    }
}

/// Loads `TODOEY_*` settings, starts file logging when configured, and
/// returns the store file, `--db` taking precedence.
fn store_path(db_flag: Option<PathBuf>) -> Result<PathBuf> {
    let config = StoreConfig::from_env().context("invalid TODOEY_* environment")?;

    if let Some(log_dir) = config.log_dir.as_ref() {
        let log_dir = log_dir.to_string_lossy();
        init_logging(config.log_level.as_str(), &log_dir).context("failed to start logging")?;
    }

    Ok(db_flag.unwrap_or(config.db_path))
}

fn run_category(action: CategoryCommands, db_path: PathBuf) -> Result<()> {
    let conn = open_db(&db_path).with_context(|| format!("cannot open {}", db_path.display()))?;
    let store = CategoryStore::new(SqliteCategoryRepository::try_new(&conn)?);

    match action {
        CategoryCommands::Add { name, color } => print_category(&store.create(name, color)?),
        CategoryCommands::List => {
            for category in store.list_all()? {
                print_category(&category);
            }
        }
        CategoryCommands::Rename { id, name } => print_category(&store.rename(id, &name)?),
        CategoryCommands::Delete { id } => {
            store.delete(id)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn run_item(action: ItemCommands, db_path: PathBuf) -> Result<()> {
    let conn = open_db(&db_path).with_context(|| format!("cannot open {}", db_path.display()))?;
    let store = ItemStore::new(SqliteItemRepository::try_new(&conn)?);

    match action {
        ItemCommands::Add {
            category,
            title,
            color,
        } => print_item(&store.add_item(category, title, color)?),
        ItemCommands::List { category } => {
            for item in store.list_items(category)? {
                print_item(&item);
            }
        }
        ItemCommands::Search { category, query } => {
            for item in store.search_items(category, &query)? {
                print_item(&item);
            }
        }
        ItemCommands::Toggle { id } => print_item(&store.toggle_done(id)?),
        ItemCommands::Delete { category, id } => {
            store.delete(category, id)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn print_category(category: &Category) {
    println!("{}\t{}\t{}", category.id, category.color_code, category.name);
}

fn print_item(item: &Item) {
    let mark = match item.state() {
        ItemState::Pending => "[ ]",
        ItemState::Completed => "[x]",
    };
    println!("{}\t{mark}\t{}", item.id, item.title);
}
