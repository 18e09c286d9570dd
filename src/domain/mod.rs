// Domain layer: menu models and ports (interfaces). Ports refer to core's Catalog and settings types.

pub mod model;
pub mod nutrients;
pub mod person;
pub mod ports;
