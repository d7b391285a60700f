// Individual performance formats: time trials and points totals.

use std::cmp::Ordering;

use super::{desc, CompletedResults, Ledger, Standing};
use crate::model::Participant;

/// Rank each session's timed finishers fastest first and award `N - i`
/// points to the finisher in position `i` of `N`. Rows without a finite time
/// did not finish and earn nothing. Equal times keep row order.
pub(super) fn tally_times(results: &CompletedResults<'_>, ledger: &mut Ledger) {
    for m in &results.matches {
        let mut finishers: Vec<(&Participant, f64)> = results
            .rows(&m.id)
            .iter()
            .filter_map(|p| {
                p.time_seconds
                    .filter(|t| t.is_finite())
                    .map(|t| (*p, t))
            })
            .collect();
        finishers.sort_by(|a, b| a.1.total_cmp(&b.1));

        let field = finishers.len();
        for (position, (p, time)) in finishers.into_iter().enumerate() {
            let Some(row) = ledger.row(&p.user_id) else {
                continue;
            };
            row.played += 1;
            row.total_time += time;
            row.points += (field - position) as f64;
            if position == 0 {
                row.wins += 1;
            }
        }
    }
}

/// Sum every row's recorded points. Missing or non-finite points count as 0.
pub(super) fn tally_points(results: &CompletedResults<'_>, ledger: &mut Ledger) {
    for p in results.all_rows() {
        let Some(row) = ledger.row(&p.user_id) else {
            continue;
        };
        let earned = p.points.filter(|v| v.is_finite()).unwrap_or(0.0);
        row.played += 1;
        row.total_points += earned;
        row.points += earned;
    }
}

pub(super) fn compare_points(a: &Standing, b: &Standing) -> Ordering {
    desc(a.points, b.points)
}

pub(super) fn compare_total_points(a: &Standing, b: &Standing) -> Ordering {
    desc(a.total_points, b.total_points)
}
