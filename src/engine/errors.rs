//! Error types for the Collateral Engine

use odra::prelude::*;

/// Errors that can occur in the collateral engine
#[odra::odra_error]
pub enum EngineError {
    // Validation Errors
    /// Zero amount not allowed
    InvalidAmount = 1,
    /// Asset is not in the collateral registry
    AssetNotAllowed = 2,
    /// Constructor asset and feed lists differ in length
    MismatchedAssetsAndFeeds = 3,
    /// Asset listed twice in the constructor registry
    DuplicateCollateralAsset = 4,
    /// Liquidation threshold or bonus outside the valid percent range
    InvalidRiskParameters = 5,

    // Insufficiency Errors
    /// Debit exceeds the account's collateral balance
    InsufficientCollateral = 6,
    /// Debit exceeds the account's minted debt
    InsufficientDebt = 7,

    // Valuation Errors
    /// Price feed returned no usable answer
    PriceFeedUnavailable = 8,
    /// Price feed answer is older than the staleness window
    StalePrice = 9,

    // Invariant Errors
    /// Health factor below the minimum after the operation
    HealthFactorBroken = 10,
    /// Target account is solvent, cannot liquidate
    HealthFactorOk = 11,
    /// Liquidation left the target no healthier
    HealthFactorNotImproved = 12,

    // Collaborator Failures
    /// Synthetic token refused to mint
    MintFailed = 13,
    /// Token custody transfer reported failure
    TransferFailed = 14,

    // General Errors
    /// Math overflow occurred
    MathOverflow = 15,
    /// Locked - reentrancy guard
    Locked = 16,
    /// Caller is not authorized
    Unauthorized = 17,
    /// Engine configuration missing
    NotInitialized = 18,
}
