//! A repository persisted as two JSON files: the roster and the match log.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, bail};
use lanemix_rating::{InMemoryRepository, RatingConfig, StoredMatch};
use tracing::debug;

use crate::util;

#[derive(Debug, Clone)]
pub struct JsonStore {
    roster_path: PathBuf,
    matches_path: Option<PathBuf>,
    rating: RatingConfig,
}

impl JsonStore {
    pub fn new(roster_path: &Path, matches_path: Option<&Path>, rating: &RatingConfig) -> Self {
        Self {
            roster_path: roster_path.to_path_buf(),
            matches_path: matches_path.map(Path::to_path_buf),
            rating: rating.clone(),
        }
    }

    /// Loads both files into memory. A missing match log counts as empty.
    ///
    /// Rosters with a repeated id or a rating above the ceiling are rejected.
    pub fn open(&self) -> anyhow::Result<InMemoryRepository> {
        let participants = util::read_roster_file(&self.roster_path, &self.rating)?;
        let mut seen = HashSet::with_capacity(participants.len());
        if let Some(dup) = participants.iter().find(|p| !seen.insert(&p.id)) {
            bail!(
                "participant {} appears more than once in {}",
                dup.id,
                self.roster_path.display()
            );
        }
        let matches = match &self.matches_path {
            Some(path) if path.exists() => util::read_json_file::<Vec<StoredMatch>, _>("matches", path)?,
            _ => vec![],
        };
        debug!(
            roster = %self.roster_path.display(),
            participants = participants.len(),
            matches = matches.len(),
            "repository loaded"
        );
        Ok(InMemoryRepository::new(participants, matches))
    }

    /// Writes the repository back, oldest match first.
    pub fn save(&self, repo: InMemoryRepository) -> anyhow::Result<()> {
        let (participants, matches) = repo
            .into_parts()
            .context("Failed to read back repository state")?;
        util::save_json(&participants, Some(&self.roster_path))?;
        if let Some(path) = &self.matches_path {
            util::save_json(&matches, Some(path))?;
        }
        debug!(roster = %self.roster_path.display(), "repository saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use lanemix_model::{Participant, Role, Side, TeamEntry, TeamPair};
    use lanemix_rating::{Repository as _, report_result};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("lanemix-store-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn teams() -> TeamPair {
        let side = |prefix: &str| {
            Role::ALL
                .into_iter()
                .enumerate()
                .map(|(i, role)| {
                    let id = format!("{prefix}{i}");
                    TeamEntry::new(Participant::new(id.clone(), id, role, 1500, 1200), role)
                })
                .collect()
        };
        TeamPair::new(side("a"), side("b")).unwrap()
    }

    #[test]
    fn test_report_survives_save_and_reopen() {
        let dir = scratch_dir("report");
        let roster_path = dir.join("roster.json");
        let matches_path = dir.join("matches.json");
        let teams = teams();
        fs::write(
            &roster_path,
            serde_json::to_string(&util::participants_of(&teams)).unwrap(),
        )
        .unwrap();
        let _ = fs::remove_file(&matches_path);

        let store = JsonStore::new(&roster_path, Some(&matches_path), &RatingConfig::default());
        let repo = store.open().unwrap();
        assert!(repo.list_match_records().unwrap().is_empty());
        report_result(&repo, &teams, Side::A, &RatingConfig::default()).unwrap();
        store.save(repo).unwrap();

        let reopened = store.open().unwrap();
        let a0 = reopened
            .list_participants()
            .unwrap()
            .into_iter()
            .find(|p| p.id.as_str() == "a0")
            .unwrap();
        assert_eq!((a0.primary_rating, a0.wins), (1550, 1));
        assert_eq!(reopened.list_match_records().unwrap().len(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_duplicate_roster_ids_are_rejected() {
        let dir = scratch_dir("duplicate");
        let roster_path = dir.join("roster.json");
        let p = Participant::new("p1", "Alice", Role::Mid, 1500, 1200);
        fs::write(&roster_path, serde_json::to_string(&[&p, &p]).unwrap()).unwrap();

        let err = JsonStore::new(&roster_path, None, &RatingConfig::default())
            .open()
            .unwrap_err();
        assert!(err.to_string().contains("p1"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rating_above_ceiling_is_rejected() {
        let dir = scratch_dir("ceiling");
        let roster_path = dir.join("roster.json");
        let p = Participant::new("p1", "Alice", Role::Mid, 12_000, 1200);
        fs::write(&roster_path, serde_json::to_string(&[&p]).unwrap()).unwrap();

        let err = JsonStore::new(&roster_path, None, &RatingConfig::default())
            .open()
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("p1"), "{message}");
        assert!(message.contains("12000"), "{message}");

        let raised = RatingConfig {
            ceiling: 20_000,
            ..RatingConfig::default()
        };
        assert!(JsonStore::new(&roster_path, None, &raised).open().is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }
}
