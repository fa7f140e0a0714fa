//! Execute handlers for the quorum relay contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `deposit` - cw20 Receive hook and the deposit leg
//! - `release` - Send and SendBatch on the release leg
//! - `governance` - quorum-gated signer, threshold, admin fee and bridge wallet changes
//! - `fees` - fee withdrawals and operator fee settings
//! - `ownership` - two-step ownership, operators and access guards
//! - `native` - native coin receipt and withdrawal

mod deposit;
mod fees;
mod governance;
mod native;
pub(crate) mod ownership;
mod release;

pub use deposit::*;
pub use fees::*;
pub use governance::*;
pub use native::*;
pub use ownership::*;
pub use release::*;
