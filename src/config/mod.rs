pub mod product;
pub mod registry;

pub use product::ProductConfig;
pub use registry::{ConfigurationNode, ConfigurationProperty, ConfigurationRegistry, PropertyType};
