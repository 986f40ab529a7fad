//! Core procurement planning types, fiscal identifiers, money and validation.
//!
//! Everything here is pure: no I/O, no logging, no global state. Fiscal and
//! money helpers never panic and report failure through `bool`, `Option`
//! or the unchanged input.

mod builder;
mod catalog;
mod contact;
mod error;
mod extenso;
mod field_errors;
pub mod fiscal;
pub mod money;
mod numbering;
mod types;
mod validation;

pub use builder::*;
pub use catalog::*;
pub use contact::*;
pub use error::*;
pub use extenso::*;
pub use field_errors::*;
pub use fiscal::*;
pub use money::*;
pub use numbering::*;
pub use types::*;
pub use validation::*;
