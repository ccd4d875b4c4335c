//! # Repository Module
//!
//! Database repository implementations for Ladle.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.companies().search("lakeside", 20)                          │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  CompanyRepository                                                     │
//! │  ├── search(&self, query, limit)                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, company)                                            │
//! │  └── update(&self, company)                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory database)                                   │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CompanyRepository`](company::CompanyRepository) - Company CRUD and search
//! - [`EmployeeRepository`](employee::EmployeeRepository) - Employee CRUD and search
//! - [`OrderRepository`](order::OrderRepository) - Order persistence and listing

pub mod company;
pub mod employee;
pub mod order;
