pub mod store;
pub mod timer;
