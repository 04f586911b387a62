//! CodeSource port - Supplies candidate session codes.

use crate::domain::session::SessionCode;

/// Produces candidate session codes.
///
/// Candidates need not be unique; the session registry retries on collision.
pub trait CodeSource: Send + Sync {
    fn next_code(&self) -> SessionCode;
}
