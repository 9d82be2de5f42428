// Domain layer: core models and ports (interfaces). No HTTP types here.

pub mod cas;
pub mod model;
pub mod ports;
