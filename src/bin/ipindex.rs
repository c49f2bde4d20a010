//! ipindex: CLI tool for indexing access logs and searching the index.

use clap::{Parser, Subcommand};
use ipindex::{Error, IndexerConfig, Indexer, IpIndex, SearchConfig, RECORD_WIDTH};
use std::fs::{self, File, OpenOptions};
use std::io::BufReader;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ipindex")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Index IPv4 addresses from access logs and search the index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every address found in an access log into a dated index file
    Index {
        /// Access log file to read from
        #[arg(short, long)]
        file: PathBuf,

        /// Date naming the index file to write into
        #[arg(short = 'D', long)]
        date: String,

        /// Directory holding index files
        #[arg(short, long, default_value = ipindex::config::DEFAULT_DST_DIR)]
        dst: PathBuf,

        /// Abort on the first line without a usable address
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check whether an address is in an index file
    Search {
        /// Index file to search in
        #[arg(short, long)]
        file: PathBuf,

        /// IPv4 address to look for
        #[arg(short, long)]
        ip: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            file,
            date,
            dst,
            strict,
            verbose,
        } => {
            let config = IndexerConfig::new(file, date)
                .with_dst_dir(dst)
                .with_strict(strict);
            if let Err(e) = index_log(&config, verbose) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Search { file, ip } => {
            let config = SearchConfig::new(file, ip);
            match search(&config) {
                Ok(true) => println!("IP {:?} was found!", config.address),
                Ok(false) => println!("IP {:?} was not found.", config.address),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn index_log(config: &IndexerConfig, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let index_path = config.index_path();
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent)?;
    }

    if verbose {
        println!("Reading log file: {:?}", config.source);
        println!("Writing index file: {:?}", index_path);
    }

    let source = File::open(&config.source)?;
    let store = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&index_path)?;

    let index = IpIndex::open(store)?;
    if verbose {
        println!("Resuming at line {}", index.next_line());
    }

    let mut indexer = Indexer::new(index, config.strict);
    let summary = indexer.index_reader(BufReader::new(source))?;

    println!(
        "Indexed {:?} -> {:?}: {} lines, {} addresses, {} skipped ({} records)",
        config.source,
        index_path,
        summary.lines,
        summary.written,
        summary.skipped,
        indexer.index().next_line()
    );
    Ok(())
}

fn search(config: &SearchConfig) -> Result<bool, Box<dyn std::error::Error>> {
    config.validate()?;

    if config.address.parse::<Ipv4Addr>().is_err() {
        return Err(Error::InvalidAddress(config.address.clone()).into());
    }

    // Writes never happen on lookup; the handle only needs to satisfy the store bounds.
    let store = File::open(&config.index_file)?;
    let size = store.metadata()?.len();
    if size < RECORD_WIDTH as u64 {
        return Err(Error::Config(format!("index file is empty, size: {}", size)).into());
    }

    let mut index = IpIndex::open(store)?;
    Ok(index.contains(&config.address)?)
}
