// Domain layer: value types for the batch and the ports the adapters plug
// into. No I/O lives here.

pub mod model;
pub mod ports;
