// Domain layer: models and the data source port. No transport or storage details here.

pub mod model;
pub mod ports;
