// Library root: league rules, fixture generation and standings computation.
//
// Everything in this crate is a pure function over caller-supplied data.
// Persistence, delivery and presentation live in the calling layer.

pub mod address;
pub mod error;
pub mod model;
pub mod rules;
pub mod schedule;
pub mod standings;

pub use error::RulesError;
pub use model::{Match, MatchStatus, Member, MemberId, Participant, ScheduledMatch, SetScores, Side};
pub use rules::{build_league_rules, LeagueRules, Sport};
pub use schedule::{
    generate_doubles_assigned_schedule, generate_doubles_random_schedule, generate_schedule,
    generate_singles_schedule,
};
pub use standings::{calculate_standings, calculate_team_standings, ScoringFormat, Standing, TeamStanding};
