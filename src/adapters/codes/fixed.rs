//! Scripted session codes.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::foundation::ValidationError;
use crate::domain::session::SessionCode;
use crate::ports::CodeSource;

/// Yields codes in the given order, then keeps repeating the last one.
#[derive(Debug)]
pub struct FixedCodeSource {
    codes: Mutex<VecDeque<SessionCode>>,
}

impl FixedCodeSource {
    /// # Errors
    ///
    /// Fails if the list is empty or any entry is not a valid code.
    pub fn new<I, S>(codes: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|c| SessionCode::parse(c.as_ref()))
            .collect::<Result<VecDeque<_>, _>>()?;
        if codes.is_empty() {
            return Err(ValidationError::empty_field("codes"));
        }
        Ok(Self {
            codes: Mutex::new(codes),
        })
    }
}

impl CodeSource for FixedCodeSource {
    fn next_code(&self) -> SessionCode {
        let mut codes = match self.codes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if codes.len() > 1 {
            if let Some(code) = codes.pop_front() {
                return code;
            }
        }
        // Non-empty by construction.
        codes[0].clone()
    }
}
