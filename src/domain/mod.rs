// Domain layer: core models and ports (interfaces).

pub mod endpoint;
pub mod model;
pub mod ports;
