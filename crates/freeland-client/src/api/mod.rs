//! API endpoint modules.

mod node;

pub use node::{parse_assignment, NodeApi};
