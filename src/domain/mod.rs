pub mod commands;
pub mod coordinator;
pub mod eligibility;
pub mod models;
pub mod placement;
pub mod selection;
pub mod session;
pub mod transcript_layout;
