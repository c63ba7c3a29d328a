pub mod provider;
pub mod wallet;

pub use provider::EvmOracle;
