// Subcommand bodies. Each returns the JSON document to print on stdout.

use std::collections::BTreeMap;

use fitleague_core::model::{Member, MemberId, ScheduledMatch};
use fitleague_core::schedule::{appearance_counts, fixtures_by_week, generate_schedule};
use fitleague_core::standings::{
    calculate_standings, calculate_team_standings, ScoringFormat, Standing, TeamStanding,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::inputs::{member_ids, ResultsFile};

#[derive(Debug, Serialize)]
pub struct ScheduleReport<'a> {
    pub league: &'a str,
    pub sport: String,
    pub weeks: u32,
    pub seed: Option<u64>,
    pub calendar: BTreeMap<u32, Vec<&'a ScheduledMatch>>,
    pub appearances: BTreeMap<MemberId, usize>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StandingsReport {
    Members {
        format: ScoringFormat,
        standings: Vec<Standing>,
    },
    Teams {
        teams: Vec<TeamStanding>,
    },
}

/// The rules document for the configured league.
pub fn rules(config: &Config) -> anyhow::Result<String> {
    Ok(config.rules().to_json()?)
}

/// Generate the season calendar. `weeks` defaults to the configured season
/// length, `seed` to the configured one; with neither, partners are drawn
/// from a fresh seed.
pub fn schedule(
    config: &Config,
    roster: &[Member],
    weeks: Option<u32>,
    seed: Option<u64>,
) -> anyhow::Result<String> {
    let rules = config.rules();
    let weeks = weeks.unwrap_or(rules.schedule.season_weeks);
    let seed = seed.or(config.schedule.seed);
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    let fixtures = generate_schedule(&rules, &member_ids(roster), weeks, &mut rng);
    info!(
        "Scheduled {} fixtures for {} over {} weeks",
        fixtures.len(),
        config.league.name,
        weeks
    );

    let report = ScheduleReport {
        league: &config.league.name,
        sport: rules.sport().to_string(),
        weeks,
        seed,
        calendar: fixtures_by_week(&fixtures, weeks),
        appearances: appearance_counts(&fixtures).into_iter().collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Compute standings from a results file. `teams` switches to the doubles
/// team table.
pub fn standings(
    config: &Config,
    roster: &[Member],
    results: &ResultsFile,
    format: Option<ScoringFormat>,
    teams: bool,
) -> anyhow::Result<String> {
    let report = if teams {
        StandingsReport::Teams {
            teams: calculate_team_standings(&results.matches, &results.participants, roster),
        }
    } else {
        let format = format.unwrap_or_else(|| config.effective_scoring_format());
        info!("Ranking {} as {}", config.league.name, format);
        StandingsReport::Members {
            format,
            standings: calculate_standings(format, &results.matches, &results.participants, roster),
        }
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
