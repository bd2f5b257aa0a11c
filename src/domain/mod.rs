// Domain layer: entities, errors, and the ports the use cases depend on.

pub mod entities;
pub mod errors;
pub mod ports;
