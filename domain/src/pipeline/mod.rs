//! Request pipeline stages

mod stage;

pub use stage::Stage;
