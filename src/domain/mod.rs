// Domain layer: models, raw form payloads and ports. No I/O here.

pub mod form;
pub mod model;
pub mod ports;
