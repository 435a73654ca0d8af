// src/domain/mod.rs
pub mod account_model;
pub mod account_size_model;
pub mod date_range;
pub mod deal_stage;
pub mod demo_model;
pub mod demo_status;
pub mod leaderboard;
pub mod period;
pub mod role;
pub mod size_bucket;
pub mod user_model;
pub mod visibility_scope;
