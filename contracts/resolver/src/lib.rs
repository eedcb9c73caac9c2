pub use crate::error::ContractError;

pub mod contract;
pub mod crypto;
mod error;
pub mod msg;
pub mod state;

#[cfg(test)]
mod tests;
