mod components;
mod vector;

pub use vector::*;
