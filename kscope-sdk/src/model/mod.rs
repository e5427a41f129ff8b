pub mod gvr;
pub mod gvrs;
pub mod meta;


pub use gvr::{join_path, Gvr};
pub use gvrs::Gvrs;
pub use meta::{ApiResource, GroupVersion, GroupVersionResource};
