pub mod geo;
pub mod message;
pub mod outlet;
