pub mod ports;
pub mod registry;
pub mod services;
pub mod value_objects;
