//! # contrata
//!
//! Domain library for the annual contracting plan (PCA) of Brazilian public
//! bodies: CPF/CNPJ check digits, BRL money formatting, Demand
//! Formalization Documents (DFDs) with their materials and responsible
//! parties, and the local-first draft workflow that persists them.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use contrata::core::*;
//! use rust_decimal_macros::dec;
//!
//! assert!(is_valid_cpf("529.982.247-25"));
//! assert!(is_valid_cnpj("11.444.777/0001-61"));
//! assert_eq!(format_document("11444777000161"), "11.444.777/0001-61");
//!
//! assert_eq!(format_amount(dec!(1234.56)), "R$\u{a0}1.234,56");
//! assert_eq!(parse_amount("R$ 1.234,56"), Some(dec!(1234.56)));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Fiscal identifiers, money, DFD types, builders, validation, numbering |
//! | `draft` | Local-first DFD drafts, `Store` port, submit with rollback |
//! | `rest` | `Store` adapter for a PostgREST-style backend |
//! | `consolidation` | Consolidation of demands by supply class |
//! | `report` | DFD report export (text + CSV) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "draft")]
pub mod draft;

#[cfg(feature = "rest")]
pub mod rest;

#[cfg(feature = "consolidation")]
pub mod consolidation;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "core")]
pub use crate::core::*;
