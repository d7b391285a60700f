// Round-robin scheduling by the circle method.
//
// Entrant 0 stays fixed while everyone else rotates one seat per round.
// Seat i plays seat n-1-i. An odd field gets an empty seat (the bye); whoever
// faces it sits the week out.

use tracing::debug;

use crate::model::{MemberId, ScheduledMatch};

/// One pairing produced by the circle method: `(week_number, side_a, side_b)`.
pub(crate) type Pairing<T> = (u32, T, T);

/// Pair `entrants` round by round for weeks `1..=weeks`.
///
/// Round `r` rotates every entrant except the first by `(r-1) mod (n-1)`
/// seats, so a field of `n` (after adding the bye) meets every opponent once
/// in `n-1` weeks and repeats the cycle after that.
pub(crate) fn circle_pairings<T: Clone>(entrants: &[T], weeks: u32) -> Vec<Pairing<T>> {
    if entrants.is_empty() || weeks == 0 {
        return Vec::new();
    }

    let mut seats: Vec<Option<&T>> = entrants.iter().map(Some).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }
    let n = seats.len();
    let mut pairings = Vec::with_capacity(weeks as usize * n / 2);

    for week in 1..=weeks {
        let shift = (week as usize - 1) % (n - 1);
        let mut rotating = seats[1..].to_vec();
        rotating.rotate_right(shift);

        let mut order = Vec::with_capacity(n);
        order.push(seats[0]);
        order.extend(rotating);

        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (order[i], order[n - 1 - i]) {
                pairings.push((week, a.clone(), b.clone()));
            }
        }
    }

    pairings
}

/// Singles round robin over the roster. Deterministic: the same roster in
/// the same order always yields the same calendar.
pub fn generate_singles_schedule(member_ids: &[MemberId], weeks: u32) -> Vec<ScheduledMatch> {
    let fixtures: Vec<ScheduledMatch> = circle_pairings(member_ids, weeks)
        .into_iter()
        .map(|(week_number, a, b)| ScheduledMatch {
            week_number,
            team_a: vec![a],
            team_b: vec![b],
        })
        .collect();

    debug!(
        "generated {} singles fixtures for {} members over {} weeks",
        fixtures.len(),
        member_ids.len(),
        weeks
    );
    fixtures
}

/// Split the roster into fixed doubles teams in input order: `[0,1]`,
/// `[2,3]`, ... A trailing unpaired member is left out.
pub fn pair_positionally(member_ids: &[MemberId]) -> Vec<[MemberId; 2]> {
    member_ids
        .chunks_exact(2)
        .map(|pair| [pair[0].clone(), pair[1].clone()])
        .collect()
}

/// Doubles with fixed partners: teams are formed positionally, then played
/// as a round robin with the teams as entrants. Fewer than two teams means
/// no fixtures at all.
pub fn generate_doubles_assigned_schedule(
    member_ids: &[MemberId],
    weeks: u32,
) -> Vec<ScheduledMatch> {
    let teams = pair_positionally(member_ids);
    if teams.len() < 2 {
        debug!(
            "cannot schedule fixed doubles: {} members form {} team(s)",
            member_ids.len(),
            teams.len()
        );
        return Vec::new();
    }

    let fixtures: Vec<ScheduledMatch> = circle_pairings(&teams, weeks)
        .into_iter()
        .map(|(week_number, a, b)| ScheduledMatch {
            week_number,
            team_a: a.to_vec(),
            team_b: b.to_vec(),
        })
        .collect();

    debug!(
        "generated {} fixed doubles fixtures for {} teams over {} weeks",
        fixtures.len(),
        teams.len(),
        weeks
    );
    fixtures
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
