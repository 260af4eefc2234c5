pub mod filtering;

pub use filtering::filter_targets;
