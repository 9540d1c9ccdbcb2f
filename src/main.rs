use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::debug;

use shardlog::data::{self, DropStore, StoreConfig, DEFAULT_DATA_FILE};
use shardlog::input;
use shardlog::session::Session;

#[derive(Parser, Debug)]
#[command(version, about = "Personal log of blood shard sales", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// JSON document holding the drops
    #[arg(short, long, global = true, env = "SHARDLOG_FILE", default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a single sale
    Add {
        /// Price in gp, e.g. 9700000 or 9,700,000
        #[arg(short, long)]
        price: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        /// HH:MM, defaults to now
        #[arg(long)]
        time: Option<String>,
    },
    /// Import drops from pasted chat text (stdin when no file is given)
    Import { path: Option<PathBuf> },
    List,
    Stats,
    /// Delete the data file
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Write all drops as CSV to stdout
    Export,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut session = Session::open(DropStore::new(StoreConfig { data_file: args.file }));
    if let Some(reason) = session.load_failure() {
        eprintln!("Failed to load {}: {}", session.store().path().display(), reason);
    }

    if args.debug {
        println!("=== Drops Before ===\n{:?}\n====================", session.drop_log());
    }

    match args.command {
        Command::Add { price, date, time } => {
            let price_gp = input::parse_price_input(&price)?;
            let when = input::manual_timestamp(date.as_deref(), time.as_deref(), Local::now().naive_local())?;
            let record = session.drop_log_mut().add_manual(when, price_gp);
            println!("Added {}", record);
            save(&session);
        },
        Command::Import { path } => {
            let text = match path {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text)?;
                    text
                },
            };
            let outcome = session.drop_log_mut().import_text(&text);
            println!("Imported {} shard(s).", outcome.imported);
            if outcome.imported > 0 {
                save(&session);
            }
        },
        Command::List => {
            for record in session.drop_log().iter() {
                println!("{}", record);
            }
        },
        Command::Stats => {
            let stats = session.drop_log().stats();
            println!("Drops:   {}", stats.count);
            println!("Total:   {}", stats.total_display());
            println!("Average: {}", stats.average_display());
        },
        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to delete all drops without --yes");
            }
            session.clear()?;
            println!("Deleted all drops.");
        },
        Command::Export => data::export_csv(session.drop_log().records(), io::stdout())?,
    }

    if args.debug {
        println!("=== Drops After ===\n{:?}\n===================", session.drop_log());
    }

    Ok(())
}

/// Write failures are reported and the session carries on.
fn save(session: &Session) {
    match session.save() {
        Ok(()) => debug!("saved {} drop(s)", session.drop_log().len()),
        Err(err) => eprintln!("Save failed: {}", err),
    }
}
