//! Data contracts for the generate endpoint.
//!
//! `request` turns untrusted client JSON into a typed `GenerateRequest`.
//! `response` verifies model output before anything is relayed to the caller.
//! Both collect every violation instead of stopping at the first one.

pub mod request;
pub mod response;
pub mod vocab;

use std::fmt;

use serde::Serialize;

/// One broken constraint, addressed by field path (e.g. `vibe_keywords[2]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub constraint: String,
}

/// Every violation found while checking a payload against a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContractViolations(Vec<Violation>);

impl ContractViolations {
    pub fn push(&mut self, field: impl Into<String>, constraint: impl Into<String>) {
        self.0.push(Violation {
            field: field.into(),
            constraint: constraint.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if any violation is reported against `field`.
    #[cfg(test)]
    pub fn mentions(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ContractViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", violation.field, violation.constraint)?;
        }
        Ok(())
    }
}

impl std::error::Error for ContractViolations {}
