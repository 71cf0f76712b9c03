//! Bracket business logic: seeding, bracket building, progression, roster import.

mod builder;
mod import;
mod progression;
mod seeding;

pub use builder::{build_bracket, generate_bracket, regenerate_bracket};
pub use import::import_participants_csv;
pub use progression::{
    clear_match_result, clear_result, report_match_result, report_result, start_match,
    start_tournament_match, ReportOutcome,
};
pub use seeding::{
    form_balanced_teams, form_balanced_teams_default, seed_teams_by_rating, shuffle_competitors,
};
