use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::datetime;

use cardbook::initialize_db;

/// A utility for creating a test database for the REST API server of cardbook.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");

    conn.execute(
        "INSERT INTO user (name, email) VALUES (?1, ?2)",
        ("Test User", "test@example.com"),
    )?;
    let user_id = conn.last_insert_rowid();

    println!("Creating test credit cards...");

    conn.execute(
        "INSERT INTO credit_card (issuance_bank, number, user_id) VALUES (?1, ?2, ?3)",
        ("Kiwibank", "4111222233334444", user_id),
    )?;
    let card_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO credit_card (issuance_bank, number, user_id) VALUES (?1, ?2, ?3)",
        ("ANZ", "5555666677778888", user_id),
    )?;

    println!("Creating test balance history...");

    for (date, balance) in [
        (datetime!(2024 - 01 - 01 9:00 UTC), 100.0),
        (datetime!(2024 - 02 - 01 9:00 UTC), 180.0),
        (datetime!(2024 - 03 - 15 9:00 UTC), 250.0),
    ] {
        conn.execute(
            "INSERT INTO balance_history (date, balance, credit_card_id) VALUES (?1, ?2, ?3)",
            (date, balance, card_id),
        )?;
    }

    println!("Success!");

    Ok(())
}
