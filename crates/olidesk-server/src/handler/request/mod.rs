//! Request types for HTTP handlers.

mod clients;
mod forms;
mod paths;
mod users;

pub use clients::*;
pub use forms::*;
pub use paths::*;
pub use users::*;
