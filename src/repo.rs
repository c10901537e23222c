#[cfg(test)]
pub mod memory;
mod subscriptions;

pub use subscriptions::*;
