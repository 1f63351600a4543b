//! Core logic for wordflow: weighted word lists and the floating word board.
//! This crate owns every validation rule and the board layout math.

pub mod board;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod session;

pub use board::{
    lane_count, layout, Board, BoardOptions, DisplayItem, LayoutParams, SpeedRange, WordEntry,
};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::validation::ValidationError;
pub use model::word::{Word, WordId};
pub use model::word_list::{WordList, WordListId};
pub use repo::word_list_repo::{
    SqliteWordListRepository, WordListPage, WordListPageQuery, WordListRepository,
};
pub use repo::word_repo::{SqliteWordRepository, WordRepository};
pub use repo::{ConflictKind, RepoError, RepoResult};
pub use seed::{seed_demo_data, SeedSummary};
pub use service::word_list_service::{CreateWordListRequest, WordListService, WordListWithWords};
pub use service::word_service::{WordService, WordsResult};
pub use session::{Cached, Notice, SqliteBackend, WordListBackend, WordListSession};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
