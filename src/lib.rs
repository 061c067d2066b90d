pub mod simulation;
pub mod configuration;
pub mod output;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Disk, SimBox, System, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, PairRepulsion, WallRepulsion, LinearDrag};
pub use simulation::integrator::{verlet_integrator, verlet_step, advance};
pub use simulation::metrics::{BoundingBox, StepMetrics, bounding_box, potential_energy, kinetic_energy};
pub use simulation::generator::{generate_random, parse_configuration, load_configuration, serialize_configuration};
pub use simulation::packing::{PackingController, PackingHistory, PackingPhase, PackingStatus, CycleReport, PackingOutcome};
pub use simulation::observer::{Observer, NullObserver};
pub use simulation::driver::{Driver, DriverStatus};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, DomainConfig, DisksConfig, PackingConfig, OutputConfig, RunModeConfig};

pub use output::csv_log::CsvLog;

pub use benchmark::benchmark::{bench_forces, bench_verlet_curve};

pub use error::{SimError, Result};
