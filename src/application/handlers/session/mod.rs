//! Session administration handlers.

mod create_session;
mod delete_session;
mod get_session;
mod list_sessions;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use delete_session::{DeleteSessionCommand, DeleteSessionHandler, DeleteSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_sessions::ListSessionsHandler;
