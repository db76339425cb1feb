use std::path::{Path, PathBuf};

use lanemix_balancer::adjust;
use lanemix_model::{Role, SessionSelection, Side, TeamPair};

use crate::{
    session,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SwapArg {
    /// Teams JSON file
    #[arg(long)]
    teams: PathBuf,
    /// Session JSON file; when given, moves into excluded roles are rejected
    #[arg(long)]
    session: Option<PathBuf>,
    side_x: Side,
    index_x: usize,
    side_y: Side,
    index_y: usize,
    /// Output file path (may be the input file)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReassignArg {
    /// Teams JSON file
    #[arg(long)]
    teams: PathBuf,
    /// Session JSON file; when given, excluded roles are rejected
    #[arg(long)]
    session: Option<PathBuf>,
    side: Side,
    index: usize,
    role: Role,
    /// Output file path (may be the input file)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load(
    teams: &Path,
    session: Option<&Path>,
) -> anyhow::Result<(TeamPair, Option<Vec<SessionSelection>>)> {
    let teams = util::read_teams_file(teams)?;
    let selections = match session {
        Some(path) => {
            let entries = util::read_session_file(path)?;
            Some(session::resolve_selections(&entries, &util::participants_of(&teams))?)
        }
        None => None,
    };
    Ok((teams, selections))
}

pub(crate) fn run_swap(arg: &SwapArg) -> anyhow::Result<()> {
    let (teams, selections) = load(&arg.teams, arg.session.as_deref())?;
    let swapped = match &selections {
        Some(selections) => adjust::swap_checked(
            &teams,
            selections,
            arg.side_x,
            arg.index_x,
            arg.side_y,
            arg.index_y,
        )?,
        None => adjust::swap(&teams, arg.side_x, arg.index_x, arg.side_y, arg.index_y)?,
    };
    util::print_teams(&swapped);
    util::save_json(&swapped, arg.output.as_deref())
}

pub(crate) fn run_reassign(arg: &ReassignArg) -> anyhow::Result<()> {
    let (teams, selections) = load(&arg.teams, arg.session.as_deref())?;
    let reassigned = match &selections {
        Some(selections) => {
            adjust::reassign_role_checked(&teams, selections, arg.side, arg.index, arg.role)?
        }
        None => adjust::reassign_role(&teams, arg.side, arg.index, arg.role)?,
    };
    util::print_teams(&reassigned);
    util::save_json(&reassigned, arg.output.as_deref())
}
