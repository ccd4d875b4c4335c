//! # ladle-core: Pure Business Logic for Ladle
//!
//! This crate is the **heart** of Ladle. It contains all business logic as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ladle Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Web Client                                │   │
//! │  │    Companies ──► Order Composer ──► Orders ──► Reports         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (JSON)                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  ladle-server (axum handlers)                   │   │
//! │  │    login, draft edits, submit_order, company CRUD, etc.        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ladle-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │   draft   │  │   │
//! │  │   │  Company  │  │   Money   │  │ pack/item │  │OrderDraft │  │   │
//! │  │   │   Order   │  │   cents   │  │ recompute │  │ mutations │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ladle-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Company, Employee, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`pricing`] - Bottom-up totals: pack, item, order
//! - [`draft`] - The order under composition and its edit operations
//! - [`validation`] - Business rule validation
//! - [`reports`] - Dashboard and monthly aggregates
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use ladle_core::money::Money;
//! use ladle_core::pricing;
//!
//! // Create money from cents (never from floats!)
//! let unit_price = Money::from_cents(250); // $2.50 per item
//!
//! // 3 packs of 4 items each
//! let totals = pricing::pack_total(3, 4, unit_price).unwrap();
//!
//! assert_eq!(totals.total_items, 12);
//! assert_eq!(totals.total_price, Money::from_cents(3000)); // $30.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod money;
pub mod pricing;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ladle_core::Money` instead of
// `use ladle_core::money::Money`

pub use draft::OrderDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::Totals;
pub use types::*;
