use std::path::PathBuf;

use anyhow::Context as _;
use lanemix_balancer::{GenerateError, GenerationMode, validate_and_generate};

use crate::{
    config::AppConfig,
    session,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Roster JSON file
    #[arg(long)]
    roster: PathBuf,
    /// Session JSON file naming the ten selected participants
    #[arg(long)]
    session: PathBuf,
    /// Ignore session role exclusions
    #[arg(long)]
    relaxed: bool,
    /// Number of construction trials
    #[arg(long)]
    trials: Option<usize>,
    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads sharing the trial budget
    #[arg(long)]
    workers: Option<usize>,
    /// Output file path for the teams JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg, config: &AppConfig) -> anyhow::Result<()> {
    let GenerateArg {
        roster,
        session,
        relaxed,
        trials,
        seed,
        workers,
        output,
    } = arg;

    let roster = util::read_roster_file(roster, &config.rating)?;
    let entries = util::read_session_file(session)?;
    let selections = session::resolve_selections(&entries, &roster)?;

    let mut balancer = config.balancer.clone();
    if let Some(trials) = trials {
        balancer.trial_count = *trials;
    }
    if let Some(workers) = workers {
        balancer.workers = *workers;
    }
    if seed.is_some() {
        balancer.seed = *seed;
    }
    let mode = if *relaxed {
        GenerationMode::Relaxed
    } else {
        GenerationMode::Strict
    };

    let generated = validate_and_generate(&selections, &balancer, mode).map_err(|err| {
        let hint = match &err {
            GenerateError::InfeasibleConstraints { .. } | GenerateError::GenerationFailure { .. }
                if mode.is_strict() =>
            {
                "Team generation failed; rerun with --relaxed to ignore role exclusions"
            }
            _ => "Team generation failed",
        };
        anyhow::Error::new(err).context(hint)
    })?;

    let evaluation = &generated.evaluation;
    eprintln!(
        "Generated teams in {mode} mode ({} of {} trials completed)",
        generated.completed_trials, balancer.trial_count
    );
    eprintln!(
        "Preferences met: {}/10, primary roles: {}/10",
        evaluation.preference_count, evaluation.primary_role_count
    );
    util::print_teams(&generated.teams);
    for violation in generated.teams.exclusion_violations(&selections) {
        eprintln!(
            "  note: {} plays excluded role {}",
            violation.participant_id, violation.role
        );
    }

    util::save_json(&generated.teams, output.as_deref()).context("Failed to save teams")?;
    Ok(())
}
