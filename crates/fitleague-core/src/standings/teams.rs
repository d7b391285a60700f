// Doubles standings per pair of players.
//
// A team is identified by its members alone: the same two players form the
// same team whichever side they played on and in whatever order their rows
// were recorded.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CompletedResults;
use crate::model::{Match, Member, MemberId, Participant, Side};

/// Minimum rows per side for a match to count as a doubles result.
const MIN_TEAM_SIZE: usize = 2;

/// One doubles pair's line in the team table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_key: String,
    pub player_ids: Vec<MemberId>,
    pub player_names: Vec<String>,
    pub rank: u32,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(rename = "winPct")]
    pub win_pct: u32,
}

/// Canonical identity of a team: member ids sorted and comma-joined.
pub fn team_key<S: AsRef<str>>(member_ids: &[S]) -> String {
    let mut ids: Vec<&str> = member_ids.iter().map(AsRef::as_ref).collect();
    ids.sort_unstable();
    ids.join(",")
}

/// Compute the doubles team table. Teams appear in order of their first
/// completed match; only teams that have played are listed.
///
/// A match counts only if it is completed, has a winner, and both sides have
/// at least two rows.
pub fn calculate_team_standings(
    matches: &[Match],
    participants: &[Participant],
    members: &[Member],
) -> Vec<TeamStanding> {
    let results = CompletedResults::collect(matches, participants);
    let names: HashMap<&str, &str> = members
        .iter()
        .map(|m| (m.user_id.as_str(), m.name.as_str()))
        .collect();

    let mut teams: Vec<TeamStanding> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in &results.matches {
        let Some(winner) = m.winner else {
            continue;
        };
        let rows = results.rows(&m.id);
        let side_ids = |side: Side| {
            rows.iter()
                .filter(|p| p.team == Some(side))
                .map(|p| p.user_id.as_str())
                .collect::<Vec<&str>>()
        };
        let (side_a, side_b) = (side_ids(Side::A), side_ids(Side::B));
        if side_a.len() < MIN_TEAM_SIZE || side_b.len() < MIN_TEAM_SIZE {
            debug!("match {} skipped for team standings: incomplete sides", m.id);
            continue;
        }

        for (side, ids) in [(Side::A, side_a), (Side::B, side_b)] {
            let key = team_key(&ids);
            let i = *index.entry(key.clone()).or_insert_with(|| {
                teams.push(new_team(key, &ids, &names));
                teams.len() - 1
            });
            let team = &mut teams[i];
            team.played += 1;
            if side == winner {
                team.wins += 1;
            } else {
                team.losses += 1;
            }
        }
    }

    for team in &mut teams {
        team.win_pct = win_pct(team.wins, team.played);
    }
    teams.sort_by(compare);
    for (i, team) in teams.iter_mut().enumerate() {
        team.rank = i as u32 + 1;
    }
    teams
}

fn new_team(key: String, ids: &[&str], names: &HashMap<&str, &str>) -> TeamStanding {
    let mut player_ids: Vec<MemberId> = ids.iter().map(|id| id.to_string()).collect();
    player_ids.sort();
    let player_names = player_ids
        .iter()
        .map(|id| names.get(id.as_str()).copied().unwrap_or(id.as_str()).to_string())
        .collect();
    TeamStanding {
        team_key: key,
        player_ids,
        player_names,
        rank: 0,
        played: 0,
        wins: 0,
        losses: 0,
        win_pct: 0,
    }
}

/// Whole-number win percentage, 0 before the first match.
fn win_pct(wins: u32, played: u32) -> u32 {
    if played == 0 {
        return 0;
    }
    (wins as f64 / played as f64 * 100.0).round() as u32
}

/// Most wins, then fewest losses, then best win percentage.
fn compare(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| a.losses.cmp(&b.losses))
        .then_with(|| b.win_pct.cmp(&a.win_pct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchStatus;

    fn members() -> Vec<Member> {
        vec![
            Member::new("a", "Ana"),
            Member::new("b", "Ben"),
            Member::new("c", "Cy"),
            Member::new("d", "Dee"),
            Member::new("e", "Eve"),
            Member::new("f", "Fay"),
        ]
    }

    fn doubles(id: &str, winner: Option<Side>, a: [&str; 2], b: [&str; 2]) -> (Match, Vec<Participant>) {
        let m = Match {
            id: id.to_string(),
            status: MatchStatus::Completed,
            week_number: 1,
            winner,
        };
        let rows = a
            .iter()
            .map(|u| Participant::on_side(id, *u, Side::A))
            .chain(b.iter().map(|u| Participant::on_side(id, *u, Side::B)))
            .collect();
        (m, rows)
    }

    #[test]
    fn team_key_ignores_order() {
        assert_eq!(team_key(&["b", "a"]), "a,b");
        assert_eq!(team_key(&["a", "b"]), team_key(&["b", "a"]));
    }

    #[test]
    fn swapped_partner_order_is_the_same_team() {
        let (m1, r1) = doubles("m1", Some(Side::A), ["a", "b"], ["c", "d"]);
        let (m2, r2) = doubles("m2", Some(Side::A), ["b", "a"], ["d", "c"]);
        let rows: Vec<Participant> = r1.into_iter().chain(r2).collect();

        let table = calculate_team_standings(&[m1, m2], &rows, &members());
        assert_eq!(table.len(), 2);
        let ab = &table[0];
        assert_eq!(ab.team_key, "a,b");
        assert_eq!(ab.player_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ab.player_names, vec!["Ana".to_string(), "Ben".to_string()]);
        assert_eq!((ab.played, ab.wins, ab.losses, ab.win_pct, ab.rank), (2, 2, 0, 100, 1));
        let cd = &table[1];
        assert_eq!((cd.played, cd.wins, cd.losses, cd.win_pct, cd.rank), (2, 0, 2, 0, 2));
    }

    #[test]
    fn same_pair_on_either_side_aggregates() {
        let (m1, r1) = doubles("m1", Some(Side::A), ["a", "b"], ["c", "d"]);
        let (m2, r2) = doubles("m2", Some(Side::A), ["e", "f"], ["b", "a"]);
        let (m3, r3) = doubles("m3", Some(Side::B), ["c", "d"], ["a", "b"]);
        let rows: Vec<Participant> = r1.into_iter().chain(r2).chain(r3).collect();

        let table = calculate_team_standings(&[m1, m2, m3], &rows, &members());
        let ab = table.iter().find(|t| t.team_key == "a,b").unwrap();
        assert_eq!((ab.played, ab.wins, ab.losses), (3, 2, 1));
        assert_eq!(ab.win_pct, 67);
        assert_eq!(ab.rank, 1);
    }

    #[test]
    fn incomplete_sides_and_missing_winners_are_skipped() {
        let (m1, mut r1) = doubles("m1", Some(Side::A), ["a", "b"], ["c", "d"]);
        r1.pop();
        let (m2, r2) = doubles("m2", None, ["a", "b"], ["c", "d"]);
        let rows: Vec<Participant> = r1.into_iter().chain(r2).collect();
        assert!(calculate_team_standings(&[m1, m2], &rows, &members()).is_empty());
    }

    #[test]
    fn unknown_members_fall_back_to_their_id() {
        let (m1, r1) = doubles("m1", Some(Side::B), ["a", "zed"], ["c", "d"]);
        let table = calculate_team_standings(&[m1], &r1, &members());
        let t = table.iter().find(|t| t.team_key == "a,zed").unwrap();
        assert_eq!(t.player_names, vec!["Ana".to_string(), "zed".to_string()]);
        assert_eq!(table[0].team_key, "c,d");
    }

    #[test]
    fn win_pct_rounds_to_whole_percent() {
        assert_eq!(win_pct(0, 0), 0);
        assert_eq!(win_pct(1, 3), 33);
        assert_eq!(win_pct(2, 3), 67);
        assert_eq!(win_pct(1, 2), 50);
    }
}
