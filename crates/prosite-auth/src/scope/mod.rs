//! Per-request authorization decisions over validated claims.

pub mod gate;

pub use gate::ScopeGate;
