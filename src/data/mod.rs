//! Data layer: log parsing, particle reduction, reconciliation and checks.
//!
//! Architecture:
//! ```text
//!  target.txt   estimate.txt   [weights.txt]
//!        │            │              │
//!        ▼            ▼              ▼
//!   ┌──────────┐
//!   │  loader   │  parse whitespace-delimited floats → Log
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐   estimate = k × target ┌──────────┐
//!   │ reconcile  │ ─────────────────────▶ │  select   │ best particle / step
//!   └───────────┘                         └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ session   │  all runs, shared target enforced by `compare`
//!   └──────────┘
//! ```

pub mod compare;
pub mod error;
pub mod loader;
pub mod model;
pub mod reconcile;
pub mod select;
pub mod session;
