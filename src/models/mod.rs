pub mod config;
pub mod match_result;
pub mod researcher;
