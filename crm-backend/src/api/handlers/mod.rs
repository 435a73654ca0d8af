// src/api/handlers/mod.rs
pub mod analytics_handler;
pub mod leaderboard_handler;
pub mod system_handler;
