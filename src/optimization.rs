mod gadgetization;
mod hadamard;
mod t_optimizer;
mod tohpe;

pub use gadgetization::gadgetize_internal_hadamards;
pub use hadamard::internal_h_opt;
pub use t_optimizer::optimize_t_gates;
pub use tohpe::tohpe;
