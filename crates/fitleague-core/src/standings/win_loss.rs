// Win/loss accounting for singles and for doubles viewed per player.

use std::cmp::Ordering;

use super::{CompletedResults, Ledger, Standing};

/// Credit every member on the winning side with a win and every member on
/// the losing side with a loss. Matches without a recorded winner, and rows
/// without a side, count for nothing.
pub(super) fn tally(results: &CompletedResults<'_>, ledger: &mut Ledger) {
    for m in &results.matches {
        let Some(winner) = m.winner else {
            continue;
        };
        for p in results.rows(&m.id) {
            let Some(side) = p.team else {
                continue;
            };
            let Some(row) = ledger.row(&p.user_id) else {
                continue;
            };
            row.played += 1;
            if side == winner {
                row.wins += 1;
                row.points += 1.0;
            } else {
                row.losses += 1;
            }
        }
    }
}

/// Most wins first, then fewest losses, then most matches played.
pub(super) fn compare(a: &Standing, b: &Standing) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| a.losses.cmp(&b.losses))
        .then_with(|| b.played.cmp(&a.played))
}

#[cfg(test)]
mod tests {
    use super::super::tests::members;
    use super::super::{calculate_standings, ScoringFormat};
    use crate::model::{Match, MatchStatus, Participant, Side};

    fn completed(id: &str, week: u32, winner: Option<Side>) -> Match {
        Match {
            id: id.to_string(),
            status: MatchStatus::Completed,
            week_number: week,
            winner,
        }
    }

    fn singles(id: &str, a: &str, b: &str) -> Vec<Participant> {
        vec![
            Participant::on_side(id, a, Side::A),
            Participant::on_side(id, b, Side::B),
        ]
    }

    #[test]
    fn winners_and_losers_are_credited() {
        let roster = members(&["a", "b", "c", "d"]);
        let matches = vec![
            completed("m1", 1, Some(Side::A)),
            completed("m2", 2, Some(Side::B)),
        ];
        let mut rows = singles("m1", "a", "b");
        rows.extend(singles("m2", "c", "d"));

        let table = calculate_standings(ScoringFormat::Singles, &matches, &rows, &roster);
        let a = table.iter().find(|s| s.user_id == "a").unwrap();
        let d = table.iter().find(|s| s.user_id == "d").unwrap();
        let c = table.iter().find(|s| s.user_id == "c").unwrap();
        assert_eq!((a.played, a.wins, a.losses, a.points), (1, 1, 0, 1.0));
        assert_eq!((d.played, d.wins, d.losses, d.points), (1, 1, 0, 1.0));
        assert_eq!((c.played, c.wins, c.losses, c.points), (1, 0, 1, 0.0));
        assert!(table.iter().all(|s| s.draws == 0));
    }

    #[test]
    fn match_without_winner_counts_for_nothing() {
        let roster = members(&["a", "b"]);
        let matches = vec![completed("m1", 1, None)];
        let table =
            calculate_standings(ScoringFormat::Singles, &matches, &singles("m1", "a", "b"), &roster);
        assert!(table.iter().all(|s| s.played == 0));
    }

    #[test]
    fn ties_keep_roster_order_with_distinct_ranks() {
        let roster = members(&["e", "c", "a", "b", "x", "y"]);
        let matches = vec![
            completed("m1", 1, Some(Side::A)),
            completed("m2", 2, Some(Side::A)),
            completed("m3", 3, Some(Side::A)),
            completed("m4", 4, Some(Side::B)),
        ];
        let mut rows = singles("m1", "c", "x");
        rows.extend(singles("m2", "y", "c"));
        rows.extend(singles("m3", "e", "x"));
        rows.extend(singles("m4", "e", "y"));

        let table = calculate_standings(ScoringFormat::Singles, &matches, &rows, &roster);
        let order: Vec<&str> = table.iter().map(|s| s.user_id.as_str()).collect();
        // y: 2-0 (beat c, beat e); e: 1-1; c: 1-1; x: 0-2; a,b: 0-0.
        // a/b (0-0) rank above x (0-2) on fewer losses.
        assert_eq!(order, vec!["y", "e", "c", "a", "b", "x"]);
        let ranks: Vec<u32> = table.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn doubles_credits_both_partners() {
        let roster = members(&["a", "b", "c", "d"]);
        let matches = vec![completed("m1", 1, Some(Side::B))];
        let rows = vec![
            Participant::on_side("m1", "a", Side::A),
            Participant::on_side("m1", "b", Side::A),
            Participant::on_side("m1", "c", Side::B),
            Participant::on_side("m1", "d", Side::B),
        ];
        let table = calculate_standings(ScoringFormat::Doubles, &matches, &rows, &roster);
        let order: Vec<&str> = table.iter().map(|s| s.user_id.as_str()).collect();
        assert_eq!(order, vec!["c", "d", "a", "b"]);
        assert_eq!(table[0].wins, 1);
        assert_eq!(table[3].losses, 1);
    }

    #[test]
    fn rows_for_unknown_members_are_ignored() {
        let roster = members(&["a"]);
        let matches = vec![completed("m1", 1, Some(Side::A))];
        let table =
            calculate_standings(ScoringFormat::Singles, &matches, &singles("m1", "a", "ghost"), &roster);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].wins, 1);
    }
}
