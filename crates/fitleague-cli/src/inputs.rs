// Roster and results files handed to the engine.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use fitleague_core::model::{Match, Member, MemberId, Participant};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Completed and in-flight results, as exported by the result workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsFile {
    pub matches: Vec<Match>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// Read a roster: a JSON array of members. Duplicate ids are reported; the
/// engine keeps the first occurrence.
pub fn load_roster(path: &Path) -> anyhow::Result<Vec<Member>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    let members: Vec<Member> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse roster {}", path.display()))?;

    let mut seen = HashSet::new();
    for m in &members {
        if !seen.insert(m.user_id.as_str()) {
            warn!("roster lists {} more than once", m.user_id);
        }
    }
    info!("Loaded {} members from {}", members.len(), path.display());
    Ok(members)
}

/// Read a results file. Participant rows that point at no known match are
/// reported and otherwise left for the engine to ignore.
pub fn load_results(path: &Path) -> anyhow::Result<ResultsFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read results {}", path.display()))?;
    let results: ResultsFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse results {}", path.display()))?;

    let match_ids: HashSet<&str> = results.matches.iter().map(|m| m.id.as_str()).collect();
    let orphans = results
        .participants
        .iter()
        .filter(|p| !match_ids.contains(p.match_id.as_str()))
        .count();
    if orphans > 0 {
        warn!("{orphans} participant rows reference unknown matches");
    }
    info!(
        "Loaded {} matches ({} completed), {} participant rows",
        results.matches.len(),
        results.matches.iter().filter(|m| m.is_completed()).count(),
        results.participants.len()
    );
    Ok(results)
}

pub fn member_ids(members: &[Member]) -> Vec<MemberId> {
    members.iter().map(|m| m.user_id.clone()).collect()
}
