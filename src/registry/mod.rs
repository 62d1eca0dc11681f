// Registry module - THE ACTIVE VALIDATOR SET
// Consensus-owned validator list that governance replaces wholesale

mod memory;
mod traits;

pub use memory::MemoryRegistry;
pub use traits::{RegistryError, ValidatorRegistry};
