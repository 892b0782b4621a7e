//! Chess.com archive ingestion.
//!
//! Discovers a player's monthly archives, narrows them to a bounded
//! [selection window](select_window), and fetches each one conditionally
//! against the [`ValidatorStore`]. Fresh archives are written under
//! `{out_dir}/chesscom/{username}/{YYYY-MM}.json`; unchanged ones are skipped.

mod archive;
mod client;
mod error;
mod ingest;
mod select;
mod store;

pub use archive::{ArchiveRef, MonthKey, ParseMonthKeyError};
pub use client::{ChessComClient, DEFAULT_BASE_URL, MonthArchive};
pub use error::{IngestError, Result};
pub use ingest::{IngestOptions, IngestSummary, game_count, output_path, run_ingest};
pub use select::select_window;
pub use store::ValidatorStore;
