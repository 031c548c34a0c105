pub mod elevation;
pub mod labeling;
pub mod mercator;
pub mod messages;
pub mod models;
pub mod session;
