pub mod domain;
pub mod errors;
pub mod ports;
pub mod search;
pub mod services;
pub mod stores;
pub mod validation;

#[cfg(test)]
mod tests;

pub use errors::CoreError;
pub use validation::ValidationError;
