pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::{app, routes};
pub use state::AppState;
