// Domain layer: request/response models, solver ports and problem-type labels.

pub mod model;
pub mod ports;
pub mod problem_type;
