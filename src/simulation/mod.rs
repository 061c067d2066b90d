pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod metrics;
pub mod generator;
pub mod observer;
pub mod packing;
pub mod driver;
pub mod scenario;
