// src/api/dto/mod.rs
pub mod analytics_dto;
pub mod leaderboard_dto;
