//! Phantom USD (PUSD) - the synthetic dollar minted against collateral
//!
//! CEP-18 compatible token whose mint and burn entry points are gated to a
//! single owner. The deployer hands ownership to the collateral engine at
//! wiring time, making the engine the only party able to change supply.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval, OwnershipTransferred};
use crate::errors::TokenError;

/// PUSD token module implementing the CEP-18 standard with owner-gated supply
#[odra::module]
pub struct PhantomUsd {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Sole address allowed to mint and burn
    owner: Var<Address>,
}

#[odra::module]
impl PhantomUsd {
    /// Initialize the token. The deployer becomes the initial owner.
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.name.set(String::from("Phantom USD"));
        self.symbol.set(String::from("PUSD"));
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.owner.set(caller);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Get the current owner
    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(TokenError::Unauthorized)
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint new tokens (owner only)
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        self.only_owner();

        if amount == U256::zero() {
            self.env().revert(TokenError::ZeroAmount);
        }

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to,
            value: amount,
        });
        true
    }

    /// Burn tokens from the owner's own balance (owner only)
    pub fn burn(&mut self, amount: U256) {
        self.only_owner();

        if amount == U256::zero() {
            self.env().revert(TokenError::ZeroAmount);
        }

        let caller = self.env().caller();
        let current_balance = self.balance_of(caller);
        if current_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&caller, current_balance - amount);

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply - amount);

        self.env().emit_event(Transfer {
            from: caller,
            to: Address::from(self.env().self_address()),
            value: amount,
        });
    }

    /// Hand the mint/burn gate to a new owner (owner only)
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.only_owner();

        let previous_owner = self.owner();
        self.owner.set(new_owner);

        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    // Internal functions

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(TokenError::Unauthorized);
        if caller != owner {
            self.env().revert(TokenError::Unauthorized);
        }
    }
}

/// Engine-facing interface of the synthetic asset
#[odra::external_contract]
pub trait StablecoinToken {
    /// Mint new tokens to an address
    fn mint(&mut self, to: Address, amount: U256) -> bool;

    /// Burn tokens from the caller's balance
    fn burn(&mut self, amount: U256);

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Get total supply
    fn total_supply(&self) -> U256;
}

/// External interface for interacting with CEP-18 collateral tokens
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Approve a spender
    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Get token decimals
    fn decimals(&self) -> u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostRef, NoArgs};

    fn setup() -> (odra::host::HostEnv, PhantomUsdHostRef) {
        let env = odra_test::env();
        let token = PhantomUsd::deploy(&env, NoArgs);
        (env, token)
    }

    #[test]
    fn test_init() {
        let (env, token) = setup();
        assert_eq!(token.name(), "Phantom USD");
        assert_eq!(token.symbol(), "PUSD");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), U256::zero());
        assert_eq!(token.owner(), env.get_account(0));
    }

    #[test]
    fn test_owner_mint_and_burn() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let amount = U256::from(1000);

        assert!(token.mint(owner, amount));
        assert_eq!(token.balance_of(owner), amount);
        assert_eq!(token.total_supply(), amount);

        token.burn(amount);
        assert_eq!(token.balance_of(owner), U256::zero());
        assert_eq!(token.total_supply(), U256::zero());
    }

    #[test]
    fn test_mint_requires_owner() {
        let (env, mut token) = setup();
        let outsider = env.get_account(1);

        env.set_caller(outsider);
        let result = token.try_mint(outsider, U256::from(1000));
        assert_eq!(result, Err(TokenError::Unauthorized.into()));
    }

    #[test]
    fn test_burn_requires_owner() {
        let (env, mut token) = setup();
        let outsider = env.get_account(1);
        token.mint(outsider, U256::from(500));

        env.set_caller(outsider);
        let result = token.try_burn(U256::from(500));
        assert_eq!(result, Err(TokenError::Unauthorized.into()));
    }

    #[test]
    fn test_zero_mint_rejected() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let result = token.try_mint(owner, U256::zero());
        assert_eq!(result, Err(TokenError::ZeroAmount.into()));
    }

    #[test]
    fn test_transfer_ownership_moves_mint_gate() {
        let (env, mut token) = setup();
        let new_owner = env.get_account(1);

        token.transfer_ownership(new_owner);
        assert_eq!(token.owner(), new_owner);

        // Previous owner can no longer mint
        let result = token.try_mint(new_owner, U256::from(1));
        assert_eq!(result, Err(TokenError::Unauthorized.into()));

        env.set_caller(new_owner);
        assert!(token.mint(new_owner, U256::from(1)));
    }

    #[test]
    fn test_transfer_and_transfer_from() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let user = env.get_account(1);
        let spender = env.get_account(2);

        token.mint(owner, U256::from(1000));
        token.transfer(user, U256::from(400));
        assert_eq!(token.balance_of(owner), U256::from(600));
        assert_eq!(token.balance_of(user), U256::from(400));

        env.set_caller(user);
        token.approve(spender, U256::from(300));

        env.set_caller(spender);
        token.transfer_from(user, spender, U256::from(300));
        assert_eq!(token.balance_of(user), U256::from(100));
        assert_eq!(token.balance_of(spender), U256::from(300));
        assert_eq!(token.allowance(user, spender), U256::zero());
    }

    #[test]
    fn test_transfer_from_without_allowance_fails() {
        let (env, mut token) = setup();
        let owner = env.get_account(0);
        let spender = env.get_account(1);
        token.mint(owner, U256::from(100));

        env.set_caller(spender);
        let result = token.try_transfer_from(owner, spender, U256::from(100));
        assert_eq!(result, Err(TokenError::InsufficientAllowance.into()));
    }
}
