pub mod data;
pub mod input;
pub mod session;
pub mod tracker;
