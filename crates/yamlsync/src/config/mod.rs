pub mod args;
pub mod error;
pub mod settings;

pub use args::ProcessorArgs;
pub use error::ConfigError;
pub use settings::Settings;
