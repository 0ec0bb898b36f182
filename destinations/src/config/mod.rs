mod destinations_config;

pub use destinations_config::DestinationsConfig;
