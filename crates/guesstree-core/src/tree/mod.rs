mod arena;
pub mod config;
pub mod decision_tree;
pub mod dump;
pub mod error;
pub mod events;
pub mod ids;
pub mod node;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;
