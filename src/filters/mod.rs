pub mod color;
pub mod constraint;
pub mod filter;
