pub mod bounds;
pub mod builder;
pub mod cost;
pub mod heuristic;
pub mod obvious;
pub mod optimal;
pub mod report;
pub mod strategy;
pub mod tree;
