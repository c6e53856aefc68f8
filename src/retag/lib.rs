//! # Retag Architecture
//!
//! Retag rewrites the `tags` list in the frontmatter of many documents at
//! once: adding, removing or replacing tags across a folder, a hand-picked
//! set of files, or (when settings allow it) a whole vault. It is a library
//! that happens to have a CLI client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs and applies settings                   │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Batch engine: resolve scope, transform, write            │
//! │  - Builds on frontmatter.rs, tags.rs, scope.rs              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DocumentStore trait                             │
//! │  - VaultStore (production), InMemoryStore (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Core** (`frontmatter.rs`, `tags.rs`, `scope.rs`): pure functions,
//!    tested directly.
//! 2. **Commands** (`commands/*.rs`): batch behavior against
//!    [`store::memory::InMemoryStore`], including injected failures.
//! 3. **API** (`api.rs`): settings enforcement and dispatch.
//! 4. **CLI** (`tests/cli.rs`): the binary against temporary vaults.
//!
//! ## Module Overview

pub mod api;
pub mod cancel;
pub mod commands;
pub mod config;
pub mod error;
pub mod frontmatter;
pub mod model;
pub mod scope;
pub mod store;
pub mod tags;
