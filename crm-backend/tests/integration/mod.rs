// tests/integration/mod.rs

pub mod analytics_accounts_tests;
pub mod analytics_demos_tests;
