pub mod buffer;
pub mod server;
pub mod source;

pub use buffer::{Buffer, Eviction, Selection, Slot};
pub use server::Server;
pub use source::Source;
