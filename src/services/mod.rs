// Service exports
pub mod registry;

pub use registry::{DonorRegistry, RegistryError};
