// Engine: action driver, fetch-once sampling cache, randomness and stats.

pub mod panel;
pub mod random;
pub mod sampler;
pub mod stats;
