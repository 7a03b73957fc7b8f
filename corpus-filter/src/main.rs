use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use corpus_filter::output::RenderMode;
use corpus_filter::{registry, FilterOptions};
use log::{debug, info};

/// Partition a CoNLL-U corpus into accepted and rejected sentences.
#[derive(Debug, Parser)]
#[command(name = "corpus-filter", version, about)]
struct Cli {
    /// Filter to apply (see --list)
    #[arg(required_unless_present = "list")]
    filter: Option<String>,

    /// CoNLL-U corpus
    #[arg(value_name = "INPUT", required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Output for accepted sentences
    #[arg(value_name = "ACCEPT", required_unless_present = "list")]
    accept: Option<PathBuf>,

    /// Output for excluded sentences (discarded when absent)
    #[arg(short, long, value_name = "FILE")]
    reject: Option<PathBuf>,

    /// Number of documents to read at a time
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    block_size: usize,

    /// Word list for lexical filters, one word per line
    #[arg(short, long, value_name = "FILE")]
    word_list: Option<PathBuf>,

    /// Write space-separated tokens instead of the sentence text
    #[arg(long)]
    tokenized: bool,

    /// List the available filters
    #[arg(long)]
    list: bool,

    /// Suppress logging and progress output
    #[arg(short, long)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    fn options(&self) -> Result<FilterOptions> {
        let input = self.input.as_ref().context("no input corpus given")?;
        let accept = self.accept.as_ref().context("no accept output given")?;

        let render = if self.tokenized {
            RenderMode::Tokens
        } else {
            RenderMode::Text
        };

        Ok(FilterOptions {
            input: input.clone(),
            accept: accept.clone(),
            reject: self.reject.clone(),
            block_size: self.block_size,
            word_list: self.word_list.clone(),
            render,
            progress: !self.quiet,
        })
    }

    fn run(&self) -> Result<()> {
        let name = self.filter.as_deref().context("no filter given")?;
        let entry = registry()
            .lookup(name)
            .context("registry: cannot select filter")?;

        let options = self.options()?;
        debug!("Options: {:?}", options);

        let mut filter = entry
            .filter_writer(&options)
            .with_context(|| format!("cannot set up filter {}", entry.name()))?;
        let stats = filter
            .filter_write()
            .with_context(|| format!("cannot filter {}", options.input.display()))?;
        filter.close().context("writer: cannot close outputs")?;

        info!(
            "{}: kept {} of {} sentences",
            entry.name(),
            stats.accepted(),
            stats.sentences
        );

        Ok(())
    }
}

fn list_filters() {
    for entry in registry().iter() {
        let word_list = if entry.requires_word_list() {
            " (requires --word-list)"
        } else {
            ""
        };
        println!("{:<24} {}{}", entry.name(), entry.description(), word_list);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    if cli.list {
        list_filters();
        return Ok(());
    }

    cli.run()
}
