pub mod aggregate;
pub mod cancel;
pub mod collector;
pub mod commands;
pub mod context;
pub mod outcome;
pub mod present;
pub mod registry;
pub mod resolver;
pub mod report;
