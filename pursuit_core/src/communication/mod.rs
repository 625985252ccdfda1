//! Topic-based pub/sub communication

pub mod hub;

pub use hub::Hub;
