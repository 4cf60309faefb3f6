//! Contact form front end: configuration, draft persistence, terminal
//! presentation and the session loop that drives one form.
pub mod platform;
