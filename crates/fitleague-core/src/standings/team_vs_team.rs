// Team-vs-team: football-style 3/1/0 points from recorded side scores.

use std::cmp::Ordering;

use super::{desc, CompletedResults, Ledger, Standing};
use crate::model::{Participant, Side};

const WIN_POINTS: f64 = 3.0;
const DRAW_POINTS: f64 = 1.0;

/// A side's score is the first finite `score` among that side's rows; all
/// rows on a side carry the same team score.
fn side_score(rows: &[&Participant], side: Side) -> Option<f64> {
    rows.iter()
        .filter(|p| p.team == Some(side))
        .find_map(|p| p.score.filter(|s| s.is_finite()))
}

/// Award points to every member of each side and track goals for and
/// against per member. Matches missing either side's score are skipped.
pub(super) fn tally(results: &CompletedResults<'_>, ledger: &mut Ledger) {
    for m in &results.matches {
        let rows = results.rows(&m.id);
        let (Some(score_a), Some(score_b)) = (side_score(rows, Side::A), side_score(rows, Side::B))
        else {
            continue;
        };

        for p in rows {
            let (scored, conceded) = match p.team {
                Some(Side::A) => (score_a, score_b),
                Some(Side::B) => (score_b, score_a),
                None => continue,
            };
            let Some(row) = ledger.row(&p.user_id) else {
                continue;
            };
            row.played += 1;
            row.goal_difference += scored - conceded;
            match scored.partial_cmp(&conceded) {
                Some(Ordering::Greater) => {
                    row.wins += 1;
                    row.points += WIN_POINTS;
                }
                Some(Ordering::Less) => row.losses += 1,
                _ => {
                    row.draws += 1;
                    row.points += DRAW_POINTS;
                }
            }
        }
    }
}

/// Points, then wins, then goal difference.
pub(super) fn compare(a: &Standing, b: &Standing) -> Ordering {
    desc(a.points, b.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| desc(a.goal_difference, b.goal_difference))
}
