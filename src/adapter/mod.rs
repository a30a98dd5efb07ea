//! Adapters between the outside world and the domain.

pub mod inbound;
