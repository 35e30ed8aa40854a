//! CEP-18 compatible collateral tokens for deployment and testing
//!
//! `CollateralToken` is deployed once per asset with its own name, symbol
//! and decimal precision (e.g. WETH with 18, WBTC with 8), standing in for
//! whatever CEP-18 asset the engine is configured to accept.
use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;
use crate::engine::collateral_engine::CollateralEngineContractRef;

/// Configurable CEP-18 token with an open mint, used as engine collateral
/// in demos and tests
#[odra::module]
pub struct CollateralToken {
    name: Var<String>,
    symbol: Var<String>,
    decimals: Var<u8>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl CollateralToken {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
    }

    pub fn name(&self) -> String { self.name.get_or_default() }
    pub fn symbol(&self) -> String { self.symbol.get_or_default() }
    pub fn decimals(&self) -> u8 { self.decimals.get_or_default() }
    pub fn total_supply(&self) -> U256 { self.total_supply.get_or_default() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.balances.get(&owner).unwrap_or_default() }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.allowances.get(&(owner, spender)).unwrap_or_default() }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);
        if current_allowance < amount { self.env().revert(TokenError::InsufficientAllowance); }
        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Open mint faucet for tests and demo deployments
    pub fn mint(&mut self, to: Address, amount: U256) {
        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);
        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);
        self.env().emit_event(Transfer { from: Address::from(self.env().self_address()), to, value: amount });
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount { self.env().revert(TokenError::InsufficientBalance); }
        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);
        self.env().emit_event(Transfer { from, to, value: amount });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        self.env().emit_event(Approval { owner, spender, value: amount });
    }
}

/// Custody double that re-enters the engine from inside `transfer_from`,
/// used to exercise the engine's entry lock
#[odra::module]
pub struct ReentrantToken {
    decimals: Var<u8>,
    /// Engine to call back into during custody transfer
    target: Var<Address>,
}

#[odra::module]
impl ReentrantToken {
    pub fn init(&mut self) {
        self.decimals.set(18);
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn set_target(&mut self, engine: Address) {
        self.target.set(engine);
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        let _ = owner;
        U256::zero()
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let _ = (to, amount);
        true
    }

    /// Re-enters the engine mid-transfer instead of moving any balance
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let _ = (from, to);
        if let Some(engine) = self.target.get() {
            let token = Address::from(self.env().self_address());
            let mut engine_ref = CollateralEngineContractRef::new(self.env(), engine);
            engine_ref.deposit_collateral(token, amount);
        }
        true
    }
}
