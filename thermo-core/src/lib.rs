//! Thermo Core - Fundamental types
//!
//! This crate provides the types shared by every Thermo crate:
//! - `CalcError`: typed errors for unit parsing, dimensional analysis,
//!   conversion, domain violations, missing inputs and registry lookups
//! - `Severity`: whether an error ends one calculation or the whole catalog

mod error;

pub use error::{codes, CalcError, Severity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{CalcError, Severity};
}
