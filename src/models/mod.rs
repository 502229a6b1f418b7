pub mod release;
pub mod v3;

pub use release::{Binary, Release, Variant};
