#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process};

mod app;
mod config;
mod status;

use status::StatusLine;

use clap::Parser;
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:?}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        config,
        verbosity,
        quiet,
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let config = config::load(&config)?;
    trace!(
        "Run configuration loaded: {} ISBNs, {} desired tags",
        config.isbns.len(),
        config.desired_tags.len()
    );

    let mut status = StatusLine::stderr(!quiet);
    let outcome = app::run(
        &config,
        &mut status,
        |isbn| isbnfetch::book_by_isbn(&config.api_key, isbn),
        isbnfetch::cover_by_url,
    )?;

    println!("{}: {outcome}", status::now_string());
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show warnings and errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new()
        .verbosity(verbosity)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "isbnfetch")]
#[clap(
    about = "Fetch book details for a list of ISBNs into a CSV report, with optional cover image downloads"
)]
#[clap(version, author)]
struct Cli {
    /// Path of the TOML file describing the run
    #[clap(short, long, parse(from_os_str), default_value = "isbnfetch.toml")]
    config: PathBuf,

    /// How chatty the program is while processing
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Disables the transient status line; warnings and errors are still printed to stderr.
    #[clap(short, long)]
    quiet: bool,
}
