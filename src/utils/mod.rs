// Gateway module for utils - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod errors;
mod logger;
mod window;

// Public re-exports - the ONLY way to access utils functionality
pub use errors::{GatewayError, ImmigoError};
pub use logger::init_logger;
pub use window::sliding_window;
