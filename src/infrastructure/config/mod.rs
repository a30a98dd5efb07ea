//! Infrastructure configuration modules.

pub mod logging;
pub mod optimizer;
pub mod settings;

pub use logging::LoggingConfig;
pub use optimizer::OptimizerConfig;
pub use settings::Config;
