// Doubles with partners drawn at random every week.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::model::{MemberId, ScheduledMatch};

/// Players needed for one doubles fixture.
const PLAYERS_PER_COURT: usize = 4;

/// Each week shuffles the whole roster and deals it out four at a time:
/// `[0,1] vs [2,3]`, `[4,5] vs [6,7]`, ... The `len % 4` players left over
/// sit that week out.
///
/// All randomness comes from `rng`; seed it for reproducible calendars.
pub fn generate_doubles_random_schedule<R: Rng>(
    member_ids: &[MemberId],
    weeks: u32,
    rng: &mut R,
) -> Vec<ScheduledMatch> {
    let mut fixtures = Vec::with_capacity(weeks as usize * (member_ids.len() / PLAYERS_PER_COURT));

    for week_number in 1..=weeks {
        let mut order = member_ids.to_vec();
        order.shuffle(rng);

        for court in order.chunks_exact(PLAYERS_PER_COURT) {
            fixtures.push(ScheduledMatch {
                week_number,
                team_a: court[..2].to_vec(),
                team_b: court[2..].to_vec(),
            });
        }
    }

    debug!(
        "generated {} random doubles fixtures for {} members over {} weeks ({} sitting out weekly)",
        fixtures.len(),
        member_ids.len(),
        weeks,
        member_ids.len() % PLAYERS_PER_COURT
    );
    fixtures
}
