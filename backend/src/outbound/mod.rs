//! Driven-side adapters: implementations of the domain's outbound ports.

pub mod persistence;
