pub mod app;
pub mod modules;
pub mod types;
pub mod utils;

pub use app::{build_router, App};
pub use utils::response::{Envelope, ErrorBag, Failure, Responder, ResponseOptions};
