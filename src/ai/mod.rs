mod agent;
mod greedy;

pub use agent::Agent;
pub use greedy::{BotDecision, GreedyAgent, Tier, PREFERENCE};
