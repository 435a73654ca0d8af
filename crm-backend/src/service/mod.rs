// src/service/mod.rs
pub mod analytics_service;
pub mod leaderboard_service;
