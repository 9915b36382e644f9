//! Core Kernel - Foundational types for the lecturer claims system
//!
//! This crate provides the building blocks shared by the claims domain and the
//! application layer:
//! - Money types with precise decimal arithmetic
//! - Clocks, timezones and date ranges
//! - Strongly-typed identifiers
//! - Port error types for repository adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, SystemClock, FixedClock, DateRange, Timezone, TemporalError};
pub use identifiers::{ClaimId, LecturerId};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
