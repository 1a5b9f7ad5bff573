//! Bundled `demo` card pack.
//!
//! Registered on every node so a fresh deployment exercises the data,
//! webhook and realtime paths without external modules.

pub mod counter;
pub mod notes;

use std::sync::Arc;

use cs_02_card_catalog::{CardModule, CardRegistry, RegistryError};

pub use counter::CounterCard;
pub use notes::NotesCard;

/// Every module of the demo pack.
pub fn demo_pack() -> Vec<Arc<dyn CardModule>> {
    vec![Arc::new(CounterCard), Arc::new(NotesCard)]
}

pub fn register_demo_pack(registry: &mut CardRegistry) -> Result<(), RegistryError> {
    for module in demo_pack() {
        registry.register(module)?;
    }
    Ok(())
}
