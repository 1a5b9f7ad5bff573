pub mod errors;
pub mod gate;
pub mod key;

pub use errors::*;
pub use gate::*;
pub use key::*;
