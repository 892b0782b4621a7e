use clap::{Parser, Subcommand};

pub mod chesscom;

#[derive(Clone, Debug, Parser)]
#[command(name = "chessbi", version = env!("CARGO_PKG_VERSION"), about = "ChessBI data ingestion", long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(name = "chesscom", about = "Ingest monthly game archives from Chess.com")]
    Chesscom(chesscom::ChesscomArgs),
}
