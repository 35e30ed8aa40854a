//! Error definitions for the PUSD token
use odra::prelude::*;

/// Custom errors for the PUSD token contract
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Caller is not the token owner
    Unauthorized = 102,

    /// Zero amount not allowed
    ZeroAmount = 103,
}
