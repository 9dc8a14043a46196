pub mod canvas;
pub mod error;
pub mod logging;
pub mod settings;
pub mod term;

pub use error::AppError;
