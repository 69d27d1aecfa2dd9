// Domain layer: records, report types, the query services and ports (interfaces).

pub mod model;
pub mod ports;
pub mod services;
