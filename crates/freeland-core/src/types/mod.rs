mod authority;
mod identity;
mod node;
mod stage;

pub use authority::*;
pub use identity::*;
pub use node::*;
pub use stage::*;
