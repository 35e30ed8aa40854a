//! Price feeds - per-asset USD quote sources for collateral valuation
//!
//! Each registered collateral asset is backed by exactly one feed. The
//! engine only consumes the `PriceFeed` interface; `StaticPriceFeed` is the
//! admin-set implementation used in deployments and tests.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::EngineError;

/// A single price observation
#[odra::odra_type]
pub struct PriceRound {
    /// USD price per whole token, scaled by 1e18
    pub answer: U256,
    /// Block time of the last update
    pub updated_at: u64,
}

/// Interface the engine uses to read a quote source
#[odra::external_contract]
pub trait PriceFeed {
    /// Latest price observation for the feed's asset
    fn latest_round(&self) -> PriceRound;
}

/// Admin-set price feed
#[odra::module]
pub struct StaticPriceFeed {
    /// Latest answer (USD per whole token, scaled by 1e18)
    answer: Var<U256>,
    /// Block time of the last update
    updated_at: Var<u64>,
    /// Admin address
    admin: Var<Address>,
}

#[odra::module]
impl StaticPriceFeed {
    /// Initialize the feed with its first answer
    pub fn init(&mut self, initial_answer: U256) {
        if initial_answer == U256::zero() {
            self.env().revert(EngineError::PriceFeedUnavailable);
        }
        let caller = self.env().caller();
        self.admin.set(caller);
        self.answer.set(initial_answer);
        self.updated_at.set(self.env().get_block_time());
    }

    /// Push a new answer (admin only)
    pub fn set_answer(&mut self, answer: U256) {
        self.only_admin();
        if answer == U256::zero() {
            self.env().revert(EngineError::PriceFeedUnavailable);
        }
        self.answer.set(answer);
        self.updated_at.set(self.env().get_block_time());
    }

    /// Latest price observation
    pub fn latest_round(&self) -> PriceRound {
        PriceRound {
            answer: self.answer.get_or_default(),
            updated_at: self.updated_at.get_or_default(),
        }
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(EngineError::Unauthorized);
        if caller != admin {
            self.env().revert(EngineError::Unauthorized);
        }
    }
}
