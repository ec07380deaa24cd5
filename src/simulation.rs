pub mod realization;
pub mod scheduler;
pub mod sweep;

pub use realization::Realization;
pub use scheduler::{next_event, Event};
pub use sweep::Sweep;
