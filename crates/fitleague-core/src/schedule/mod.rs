// Fixture generation: round robins for singles and fixed doubles teams,
// weekly random partner draws for rotating doubles.
//
// Every generator is total. Rosters too small for a fixture give an empty
// calendar, never a partial team. Week numbers always run 1..=weeks.

pub mod doubles;
pub mod round_robin;

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::Rng;
use tracing::{debug, info};

use crate::model::{MemberId, ScheduledMatch};
use crate::rules::{FixturePlan, LeagueRules};

pub use doubles::generate_doubles_random_schedule;
pub use round_robin::{
    generate_doubles_assigned_schedule, generate_singles_schedule, pair_positionally,
};

/// Generate the full calendar a league's rules call for.
///
/// Fixed-partner leagues with organizer-assigned pairs play those pairs in
/// the order given; pairs naming someone who is not on the roster are
/// skipped, and roster members without a pair sit out. Without assigned
/// pairs, roster order decides the teams. Running leagues have no fixtures.
///
/// Regenerating replaces the previous calendar wholesale; guarding against
/// double generation is the caller's job.
pub fn generate_schedule<R: Rng>(
    rules: &LeagueRules,
    member_ids: &[MemberId],
    weeks: u32,
    rng: &mut R,
) -> Vec<ScheduledMatch> {
    let fixtures = match rules.fixture_plan() {
        FixturePlan::SinglesRoundRobin => generate_singles_schedule(member_ids, weeks),
        FixturePlan::DoublesRandom => generate_doubles_random_schedule(member_ids, weeks, rng),
        FixturePlan::DoublesAssigned { pairs } if pairs.is_empty() => {
            generate_doubles_assigned_schedule(member_ids, weeks)
        }
        FixturePlan::DoublesAssigned { pairs } => {
            let ordered = roster_from_pairs(&pairs, member_ids);
            generate_doubles_assigned_schedule(&ordered, weeks)
        }
        FixturePlan::NoFixtures => {
            debug!("{} league has no fixtures to generate", rules.sport());
            Vec::new()
        }
    };

    info!(
        "{} schedule: {} fixtures over {} weeks for {} members",
        rules.sport(),
        fixtures.len(),
        weeks,
        member_ids.len()
    );
    fixtures
}

/// Flatten assigned pairs into a positional roster, keeping only pairs whose
/// members are both on the roster.
fn roster_from_pairs(pairs: &[[MemberId; 2]], member_ids: &[MemberId]) -> Vec<MemberId> {
    let on_roster: HashSet<&str> = member_ids.iter().map(String::as_str).collect();
    let mut ordered = Vec::with_capacity(pairs.len() * 2);
    for [first, second] in pairs {
        if on_roster.contains(first.as_str()) && on_roster.contains(second.as_str()) {
            ordered.push(first.clone());
            ordered.push(second.clone());
        } else {
            debug!("skipping pair {first}/{second}: not both on the roster");
        }
    }
    ordered
}

/// How many fixtures each member appears in.
pub fn appearance_counts(fixtures: &[ScheduledMatch]) -> HashMap<MemberId, usize> {
    let mut counts: HashMap<MemberId, usize> = HashMap::new();
    for id in fixtures.iter().flat_map(|f| f.members()) {
        *counts.entry(id.clone()).or_default() += 1;
    }
    counts
}

/// Group fixtures into week buckets `1..=weeks`, keeping empty weeks so the
/// calendar has no gaps. Fixtures outside that range are dropped.
pub fn fixtures_by_week(
    fixtures: &[ScheduledMatch],
    weeks: u32,
) -> BTreeMap<u32, Vec<&ScheduledMatch>> {
    let mut calendar: BTreeMap<u32, Vec<&ScheduledMatch>> =
        (1..=weeks).map(|week| (week, Vec::new())).collect();
    for fixture in fixtures {
        if let Some(bucket) = calendar.get_mut(&fixture.week_number) {
            bucket.push(fixture);
        }
    }
    calendar
}
