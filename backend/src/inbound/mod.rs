//! Driving-side adapters translating transport requests into port calls.

pub mod http;
