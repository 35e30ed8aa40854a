//! Events for the Collateral Engine

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when collateral is deposited
#[odra::event]
pub struct CollateralDeposited {
    /// Address that deposited collateral
    pub account: Address,
    /// Collateral asset address
    pub asset: Address,
    /// Amount of collateral deposited
    pub amount: U256,
    /// Timestamp of deposit
    pub timestamp: u64,
}

/// Event emitted when collateral leaves an account's position, by
/// redemption or by liquidation seizure
#[odra::event]
pub struct CollateralRedeemed {
    /// Account whose position was debited
    pub from: Address,
    /// Address receiving custody
    pub to: Address,
    /// Collateral asset address
    pub asset: Address,
    /// Amount of collateral moved
    pub amount: U256,
    /// Timestamp of redemption
    pub timestamp: u64,
}

/// Event emitted when PUSD debt is minted
#[odra::event]
pub struct DebtMinted {
    /// Account taking on the debt
    pub account: Address,
    /// Amount of PUSD minted
    pub amount: U256,
    /// Timestamp of mint
    pub timestamp: u64,
}

/// Event emitted when PUSD debt is repaid and burned
#[odra::event]
pub struct DebtBurned {
    /// Account whose debt was reduced
    pub account: Address,
    /// Address that surrendered the PUSD
    pub payer: Address,
    /// Amount of PUSD burned
    pub amount: U256,
    /// Timestamp of burn
    pub timestamp: u64,
}

/// Event emitted when a position is liquidated
#[odra::event]
pub struct Liquidated {
    /// Account being liquidated
    pub target: Address,
    /// Address of the liquidator
    pub liquidator: Address,
    /// Collateral asset seized
    pub collateral_asset: Address,
    /// Amount of debt repaid
    pub debt_covered: U256,
    /// Amount of collateral seized, bonus included
    pub collateral_seized: U256,
    /// Timestamp of liquidation
    pub timestamp: u64,
}
