mod cli;
mod config;
mod content;
mod marker;
mod utils;
mod wordpress;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use crate::cli::Cli;
use crate::config::Config;
use crate::content::{Article, load_article};
use crate::marker::{PublishMarker, read_marker, write_marker};
use crate::wordpress::{Client, PostPayload};

fn main() {
    let cli = Cli::try_parse();
    if let Err(err) = &cli {
        // --help and --version
        if !err.use_stderr() {
            err.exit();
        }
    }

    init_logging(cli.as_ref().is_ok_and(|cli| cli.verbose));

    if let Err(problem) = run(cli) {
        match problem.downcast_ref::<clap::Error>() {
            // already rendered with its own prefix and usage line
            Some(usage) => eprint!("{usage}"),
            None => eprintln!("error: {problem:#}"),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Result<Cli, clap::Error>) -> Result<()> {
    // Configuration problems are reported before anything else, including bad arguments.
    let config = Config::from_env()?;
    log::debug!("loaded configuration {config:?}");

    let cli = cli?;

    let article = load_article(&cli.file)?;
    log::debug!(
        "parsed {} front matter keys from {}",
        article.metadata.len(),
        article.path.display()
    );
    for (key, value) in article.metadata.iter() {
        log::debug!("  {key}: {value}");
    }

    let payload = PostPayload::from_article(&article)?;
    report_terms(&article);

    if cli.dry_run {
        let json = serde_json::to_string_pretty(&payload).context("failed to encode payload")?;
        println!("{json}");
        return Ok(());
    }

    warn_if_published(&article);

    let client = Client::new(&config);
    log::info!("publishing {} to {}", article.path.display(), client.endpoint());
    let created = client.create_post(&payload)?;

    println!("Published successfully");
    println!("Title: {}", created.title.rendered);
    println!("Status: {}", created.status);
    println!("URL: {}", created.link);
    println!("Post ID: {}", created.id);

    let marker = PublishMarker::for_post(&created)?;
    let marker_path = write_marker(&article.path, &marker)?;
    println!("Created publish marker {}", marker_path.display());

    Ok(())
}

// Term names would have to be resolved to ids before WordPress accepts them,
// so they are only shown.
fn report_terms(article: &Article) {
    if let Some(categories) = &article.categories {
        println!("Categories: {categories}");
    }
    if let Some(tags) = &article.tags {
        println!("Tags: {tags}");
    }
}

fn warn_if_published(article: &Article) {
    match read_marker(&article.path) {
        Ok(Some(previous)) => log::warn!(
            "{} was already published as post {} ({}) on {}; publishing again",
            article.path.display(),
            previous.post_id,
            previous.url,
            previous.published_at
        ),
        Ok(None) => {}
        Err(err) => log::warn!("ignoring unreadable publish marker: {err:#}"),
    }
}
