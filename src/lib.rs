pub mod error;
pub mod experiment;
pub mod queue;
pub mod sim;

pub use error::{SimError, SimResult};

#[cfg(test)]
mod test;
