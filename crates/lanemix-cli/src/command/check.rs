use std::path::PathBuf;

use anyhow::bail;
use lanemix_balancer::evaluator::Evaluation;
use lanemix_model::ExclusionViolation;
use serde::Serialize;

use crate::{
    session,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckArg {
    /// Teams JSON file
    #[arg(long)]
    teams: PathBuf,
    /// Session JSON file the teams were generated from
    #[arg(long)]
    session: PathBuf,
    /// Output file path for the audit JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    evaluation: Evaluation,
    violations: Vec<ExclusionViolation>,
}

pub(crate) fn run(arg: &CheckArg) -> anyhow::Result<()> {
    let CheckArg {
        teams,
        session,
        output,
    } = arg;

    let teams = util::read_teams_file(teams)?;
    let entries = util::read_session_file(session)?;
    let selections = session::resolve_selections(&entries, &util::participants_of(&teams))?;

    let report = CheckReport {
        evaluation: Evaluation::of(&teams, &selections),
        violations: teams.exclusion_violations(&selections),
    };
    util::print_teams(&teams);
    util::save_json(&report, output.as_deref())?;

    if !report.violations.is_empty() {
        for v in &report.violations {
            eprintln!(
                "  side {} #{}: {} plays excluded role {}",
                v.side, v.index, v.participant_id, v.role
            );
        }
        bail!("{} exclusion violation(s) found", report.violations.len());
    }
    eprintln!("No exclusion violations");
    Ok(())
}
