pub mod entities;
pub mod helpers;
pub mod parsing;
pub mod ports;
pub mod prompts;
pub mod services;
