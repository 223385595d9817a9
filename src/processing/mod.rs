use serde::Deserialize;

pub mod load;
pub mod matching;

/// Triggers pushed by the web layer over ZMQ.
#[derive(Deserialize, Debug)]
pub enum ZMQMessage {
    /// Full reload of both rosters.
    Load,
    /// Recompute and persist matches for one researcher, by email.
    Match(String),
    /// Recompute and persist matches for every external researcher.
    MatchAll,
}
