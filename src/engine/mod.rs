//! Collateral Engine - over-collateralized PUSD minting
//!
//! Users deposit approved CEP-18 collateral, mint PUSD against it, and must
//! keep their health factor above the minimum or become liquidatable by any
//! third party.
//!
//! The engine is the sole custodian of deposited collateral and the sole
//! owner of the PUSD mint/burn gate. All balance accounting flows through
//! an internal ledger with non-negativity checks; every ledger mutation
//! emits an event.

pub mod collateral_engine;
pub mod errors;
pub mod events;
pub mod feed;


pub use collateral_engine::CollateralEngine;
pub use errors::EngineError;
pub use events::*;
pub use feed::{PriceFeed, PriceRound, StaticPriceFeed};
