pub mod devices;
pub mod exec;
pub mod locator;
pub mod parse;
pub mod props;
pub mod runner;
pub mod screenshot;
