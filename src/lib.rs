pub mod errors;
pub mod generation;
pub mod preview;
pub mod publish;
pub mod session;
pub mod settings;
pub mod store;
pub mod ui;
pub mod workflow;
