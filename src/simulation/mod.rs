pub mod math;
pub mod error;
pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod metrics;
pub mod stability;
pub mod scenario;
pub mod scheduler;
pub mod clock;
