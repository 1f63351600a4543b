//! Use-case services over list and word repositories.
//!
//! # Responsibility
//! - Turn request inputs (names, optional weights) into validated records.
//! - Keep CLI/session callers decoupled from SQL details.

pub mod word_list_service;
pub mod word_service;
