//! Host-side matrix views and operand generation

pub mod generate;
pub mod view;

pub use generate::{fill_uniform_int, seeded_rng};
pub use view::MatrixView;
