pub mod context;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use context::AppContext;
pub use error::{AppError, Result};
