//! Infrastructure inventory
//!
//! Server and document records held in memory for the process lifetime.

mod store;
mod types;

pub use store::RecordStore;
pub use types::{Document, Server};
