pub mod locator;
pub mod report;
