use std::path::PathBuf;

use anyhow::Context as _;
use lanemix_rating::rebase_secondary_ratings;

use crate::{config::AppConfig, store::JsonStore};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RebaseSecondaryArg {
    /// Roster JSON file, updated in place
    #[arg(long)]
    roster: PathBuf,
    /// Secondary rating as a percentage of the primary rating
    #[arg(long, default_value_t = 80)]
    percent: u32,
}

pub(crate) fn run(arg: &RebaseSecondaryArg, config: &AppConfig) -> anyhow::Result<()> {
    let store = JsonStore::new(&arg.roster, None, &config.rating);
    let repo = store.open()?;
    let updated = rebase_secondary_ratings(&repo, arg.percent)?;
    store.save(repo).context("Failed to save roster")?;
    eprintln!(
        "Updated {updated} secondary rating(s) to {}% of primary",
        arg.percent
    );
    Ok(())
}
