// Domain layer: the prime list, notifications and the ports the engine talks through.

pub mod model;
pub mod ports;
