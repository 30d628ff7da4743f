use anyhow::{Context, Result};
use clap::Parser;
use record_catalog_server::search::{ArtistAlbum, SearchGateway, SqliteSearchGateway};
use rusqlite::Connection;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite database holding the `album` table.
    pub db_path: PathBuf,

    /// Create the `album` table if it does not exist yet.
    #[clap(long)]
    pub init: bool,
}

fn print_result(album: &ArtistAlbum) {
    println!(
        "{:>6} | {} - {} ({:.2})",
        album.id, album.artist, album.title, album.price
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    if cli_args.init {
        let conn = Connection::open(&cli_args.db_path)
            .with_context(|| format!("Could not open {:?}", cli_args.db_path))?;
        SqliteSearchGateway::create_schema(&conn)?;
        println!("Album table ready in {}", cli_args.db_path.display());
    }

    let gateway = SqliteSearchGateway::new(&cli_args.db_path, 1);
    println!("Cli Search using {}", cli_args.db_path.display());

    loop {
        println!("Please enter an artist name (empty matches all):");

        let mut user_input = String::new();
        let read = io::stdin()
            .read_line(&mut user_input)
            .context("Failed to read line")?;
        if read == 0 {
            return Ok(());
        }

        let user_input = user_input.trim();

        match gateway.search_by_artist(user_input).await {
            Ok(results) if results.is_empty() => {
                println!("No albums found for \"{}\".", user_input)
            }
            Ok(results) => {
                println!("Found {} albums for \"{}\":\n", results.len(), user_input);
                for album in &results {
                    print_result(album);
                }
            }
            Err(err) => println!("Search failed: {}", err),
        }
        println!();
    }
}
