pub mod cell;
pub mod collector;
pub mod factory;
pub mod focus;
pub mod registry;
