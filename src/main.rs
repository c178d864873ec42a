use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use beer_value_finder::{collector, enricher, scorer, store};

#[derive(Parser)]
#[command(name = "beer_value_finder")]
#[command(about = "Rank beers by volume-per-price and community rating")]
struct Cli {
    /// Rated-beer JSON file shared by all subcommands
    #[arg(long, default_value = store::DEFAULT_PATH)]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank all rated beers, regardless of style
    Best,
    /// Rank the beers of one style
    Style { name: String },
    /// Re-crawl the catalog and overwrite the record file
    UpdatePricing,
    /// Fetch community ratings for records that have none yet
    UpdateRatings,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Best => {
            let records = store::load_records(&cli.file)?;
            print_ranking(&scorer::best_values(&records)?);
        }
        Command::Style { name } => {
            let records = store::load_records(&cli.file)?;
            print_ranking(&scorer::style_values(&records, &name)?);
        }
        Command::UpdatePricing => collector::update_pricing(&cli.file)?,
        Command::UpdateRatings => enricher::update_ratings(&cli.file)?,
    }
    Ok(())
}

fn print_ranking(scored: &[scorer::ScoredProduct]) {
    for entry in scored {
        println!("{:>7.3}  {}", entry.score, entry.label());
    }
}
