//! Evolutionary processes layered on a simulated genealogy.

pub mod mutation;

pub use mutation::{sim_mutations, MutationConfig};
