//! Command-line front end for wordflow.
//!
//! # Responsibility
//! - Resolve configuration (file, environment, flags) and start logging.
//! - Expose list/word CRUD and print board layouts as JSON.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rusqlite::Connection;
use serde_json::json;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use wordflow_core::db::open_db;
use wordflow_core::{
    core_version, init_logging, seed_demo_data, AppConfig, Board, BoardOptions,
    CreateWordListRequest, SpeedRange, SqliteWordListRepository, SqliteWordRepository, WordEntry,
    WordListService, WordService,
};

#[derive(Debug, Parser)]
#[command(name = "wordflow", version, about = "Weighted word lists and floating word boards")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory for rotating log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replace all data with the demo lists.
    Seed,
    /// Show one page of lists, newest first.
    Lists {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        cursor: Option<String>,
    },
    CreateList {
        name: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        order: Option<i64>,
    },
    RenameList {
        slug: String,
        name: String,
    },
    DeleteList {
        slug: String,
    },
    /// Show the words of a list, heaviest first.
    Words {
        slug: String,
    },
    AddWord {
        slug: String,
        text: String,
        #[arg(long)]
        weight: Option<i64>,
    },
    UpdateWord {
        id: String,
        text: String,
        #[arg(long)]
        weight: i64,
    },
    DeleteWord {
        id: String,
    },
    /// Lay out a list as a floating board and print the items.
    Board {
        /// Slug of the list to show; the newest list when omitted.
        #[arg(long)]
        list: Option<String>,
        /// Viewport height in px; 0 means unknown.
        #[arg(long, default_value_t = 0.0)]
        height: f64,
        #[arg(long)]
        density: Option<f64>,
        #[arg(long)]
        min_sec: Option<f64>,
        #[arg(long)]
        max_sec: Option<f64>,
        /// Seed for a reproducible layout.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = config.log_dir.as_deref() {
        let log_dir = absolute(log_dir)?;
        init_logging(&config.log_level, &log_dir.to_string_lossy()).map_err(|err| anyhow!(err))?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let mut conn = open_db(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;

    match cli.command {
        Command::Seed => {
            let summary = seed_demo_data(&mut conn)?;
            println!("seeded {} lists, {} words", summary.lists, summary.words);
        }
        Command::Lists { limit, cursor } => {
            let cursor = cursor.as_deref().map(parse_id).transpose()?;
            let page = list_service(&conn)?.list_page(limit, cursor)?;
            print_json(&json!({ "items": page.items, "next_cursor": page.next_cursor }))?;
        }
        Command::CreateList {
            name,
            slug,
            theme,
            order,
        } => {
            let created = list_service(&conn)?.create_list(&CreateWordListRequest {
                name,
                theme,
                order,
                slug,
            })?;
            print_json(&created)?;
        }
        Command::RenameList { slug, name } => {
            let service = list_service(&conn)?;
            let list = service
                .get_list_by_slug(&slug)?
                .ok_or_else(|| anyhow!("no list with slug `{slug}`"))?;
            print_json(&service.rename_list(list.id, &name)?)?;
        }
        Command::DeleteList { slug } => {
            let service = list_service(&conn)?;
            let list = service
                .get_list_by_slug(&slug)?
                .ok_or_else(|| anyhow!("no list with slug `{slug}`"))?;
            service.delete_list(list.id)?;
            println!("deleted {}", list.id);
        }
        Command::Words { slug } => {
            let list = list_service(&conn)?
                .get_list_with_words_by_slug(&slug)?
                .ok_or_else(|| anyhow!("no list with slug `{slug}`"))?;
            print_json(&json!({ "items": list.words }))?;
        }
        Command::AddWord { slug, text, weight } => {
            let list = list_service(&conn)?
                .get_list_by_slug(&slug)?
                .ok_or_else(|| anyhow!("no list with slug `{slug}`"))?;
            let created = word_service(&conn)?.create_word(list.id, &text, weight)?;
            print_json(&created)?;
        }
        Command::UpdateWord { id, text, weight } => {
            let updated = word_service(&conn)?.update_word(parse_id(&id)?, &text, weight)?;
            print_json(&updated)?;
        }
        Command::DeleteWord { id } => {
            word_service(&conn)?.delete_word(parse_id(&id)?)?;
            println!("deleted {id}");
        }
        Command::Board {
            list,
            height,
            density,
            min_sec,
            max_sec,
            seed,
        } => {
            let service = list_service(&conn)?;
            let loaded = match list.as_deref() {
                Some(slug) => service
                    .get_list_with_words_by_slug(slug)?
                    .ok_or_else(|| anyhow!("no list with slug `{slug}`"))?,
                None => service
                    .get_latest_list_with_words()?
                    .ok_or_else(|| anyhow!("no lists yet; run `wordflow seed` or `create-list`"))?,
            };
            let options = board_options(&config, density, min_sec, max_sec)?;
            let entries: Vec<WordEntry> = loaded.words.iter().map(WordEntry::from).collect();
            let seed = seed.unwrap_or_else(rand::random);
            print_board(options, entries, height, seed)?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db.clone() {
        config.database_path = db;
    }
    if let Some(log_dir) = cli.log_dir.clone() {
        config.log_dir = Some(log_dir);
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    Ok(config)
}

// Flags override the configured board; the merged result must still validate.
fn board_options(
    config: &AppConfig,
    density: Option<f64>,
    min_sec: Option<f64>,
    max_sec: Option<f64>,
) -> Result<BoardOptions> {
    let mut merged = config.clone();
    if let Some(density) = density {
        merged.board.density = density;
    }
    merged.board.speed_range_sec = SpeedRange {
        min: min_sec.unwrap_or(merged.board.speed_range_sec.min),
        max: max_sec.unwrap_or(merged.board.speed_range_sec.max),
    };
    merged.validate()?;
    Ok(merged.board)
}

fn print_board(
    options: BoardOptions,
    entries: Vec<WordEntry>,
    height: f64,
    seed: u64,
) -> Result<()> {
    let mut board = Board::seeded(options, seed);
    board.set_words(entries);
    board.mount(height);
    print_json(&json!({
        "seed": seed,
        "lanes": board.lane_count(),
        "viewport_class": board.options().viewport_class,
        "items": board.items(),
    }))
}

fn list_service(
    conn: &Connection,
) -> Result<WordListService<SqliteWordListRepository<'_>, SqliteWordRepository<'_>>> {
    Ok(WordListService::new(
        SqliteWordListRepository::try_new(conn)?,
        SqliteWordRepository::try_new(conn)?,
    ))
}

fn word_service(conn: &Connection) -> Result<WordService<SqliteWordRepository<'_>>> {
    Ok(WordService::new(SqliteWordRepository::try_new(conn)?))
}

fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).with_context(|| format!("`{value}` is not a valid id"))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

#[cfg(test)]
mod tests {
    use super::board_options;
    use wordflow_core::AppConfig;

    #[test]
    fn board_flags_override_config() {
        let options = board_options(&AppConfig::default(), Some(2.0), Some(5.0), None).unwrap();
        assert_eq!(options.density, 2.0);
        assert_eq!(options.speed_range_sec.min, 5.0);
        assert_eq!(options.speed_range_sec.max, 28.0);
    }

    #[test]
    fn invalid_board_flags_are_rejected() {
        let config = AppConfig::default();
        assert!(board_options(&config, Some(-1.0), None, None).is_err());
        assert!(board_options(&config, Some(f64::NAN), None, None).is_err());
        assert!(board_options(&config, None, Some(f64::INFINITY), None).is_err());
        assert!(board_options(&config, None, Some(30.0), Some(10.0)).is_err());
    }
}
