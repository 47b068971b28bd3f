// Domain layer: platform-independent message models and ports (interfaces).

pub mod model;
pub mod ports;
