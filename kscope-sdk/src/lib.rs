pub mod access;
pub mod command;
pub mod error;
pub mod model;
pub mod sortorder;

pub use access::can;
pub use error::{AccessError, GvrError};
pub use model::{Gvr, Gvrs};
