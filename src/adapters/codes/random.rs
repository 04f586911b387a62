//! Random session codes.

use crate::domain::session::SessionCode;
use crate::ports::CodeSource;

/// Draws uniformly random codes from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeSource;

impl RandomCodeSource {
    pub fn new() -> Self {
        Self
    }
}

impl CodeSource for RandomCodeSource {
    fn next_code(&self) -> SessionCode {
        SessionCode::random(&mut rand::thread_rng())
    }
}
