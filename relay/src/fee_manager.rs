//! Fee Manager Module
//!
//! Splits every released amount into an admin fee, a fixed gas fee and the
//! recipient's share, and tracks what the relay has collected.
//!
//! ## Fee Structure
//!
//! | Fee Type  | Amount                          | Destination                          |
//! |-----------|---------------------------------|--------------------------------------|
//! | Admin fee | `amount * admin_fee_bps / 10000` | bridge wallet if set, else accumulator |
//! | Gas fee   | fixed `gas_fee`                 | gas accumulator                      |
//!
//! `recipient_amount + admin_fee + gas_fee == amount` holds for every split.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdResult, Storage, Uint128};
use cw_storage_plus::Item;

use crate::error::ContractError;

// ============================================================================
// Constants
// ============================================================================

/// Maximum admin fee in basis points (10% = 1000 bps)
pub const MAX_ADMIN_FEE_BPS: u64 = 1000;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10000;

// ============================================================================
// Data Structures
// ============================================================================

/// Fee configuration parameters
#[cw_serde]
pub struct FeeConfig {
    /// Admin fee in basis points, `1..=MAX_ADMIN_FEE_BPS`
    pub admin_fee_bps: u64,
    /// Fixed fee charged on every release
    pub gas_fee: Uint128,
    /// Deposits must be strictly larger than this
    pub min_transfer_amount: Uint128,
    /// Receives admin fees directly when set
    pub bridge_wallet: Option<Addr>,
}

impl FeeConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        validate_admin_fee(self.admin_fee_bps)
    }
}

/// Fees collected and not yet withdrawn
#[cw_serde]
#[derive(Default)]
pub struct FeeAccumulator {
    pub admin_fee_accumulated: Uint128,
    pub gas_fee_accumulated: Uint128,
}

/// One amount broken into its fee components
#[cw_serde]
pub struct FeeSplit {
    pub admin_fee: Uint128,
    pub gas_fee: Uint128,
    pub recipient_amount: Uint128,
}

impl FeeSplit {
    pub fn total_fees(&self) -> Uint128 {
        self.admin_fee + self.gas_fee
    }
}

// ============================================================================
// Storage
// ============================================================================

pub const FEE_CONFIG: Item<FeeConfig> = Item::new("fee_config");

pub const FEE_ACCUMULATOR: Item<FeeAccumulator> = Item::new("fee_accumulator");

// ============================================================================
// Fee Calculation Functions
// ============================================================================

pub fn validate_admin_fee(fee_bps: u64) -> Result<(), ContractError> {
    if fee_bps == 0 || fee_bps > MAX_ADMIN_FEE_BPS {
        return Err(ContractError::AdminFeeInvalid {
            fee_bps,
            max_bps: MAX_ADMIN_FEE_BPS,
        });
    }
    Ok(())
}

/// A bridge wallet must be a valid address other than the relay itself.
pub fn validate_bridge_wallet(
    api: &dyn Api,
    relay: &Addr,
    wallet: &str,
) -> Result<Addr, ContractError> {
    if wallet.trim().is_empty() {
        return Err(ContractError::BridgeWalletInvalid {
            reason: "bridge wallet must not be empty".to_string(),
        });
    }
    let addr = api
        .addr_validate(wallet)
        .map_err(|e| ContractError::BridgeWalletInvalid {
            reason: e.to_string(),
        })?;
    if addr == *relay {
        return Err(ContractError::BridgeWalletInvalid {
            reason: "bridge wallet cannot be the relay itself".to_string(),
        });
    }
    Ok(addr)
}

/// Admin fee for `amount` at `fee_bps`, rounded down.
pub fn calculate_admin_fee(amount: Uint128, fee_bps: u64) -> Uint128 {
    amount.multiply_ratio(fee_bps as u128, BPS_DENOMINATOR)
}

/// Sum of the admin and gas fee for `amount`, without the positivity check
/// that [`split_amount`] applies.
pub fn total_fee(config: &FeeConfig, amount: Uint128) -> StdResult<Uint128> {
    Ok(calculate_admin_fee(amount, config.admin_fee_bps).checked_add(config.gas_fee)?)
}

/// Split `amount` into fees and the recipient's share.
///
/// Fails with `InvalidAmount` unless something is left for the recipient.
pub fn split_amount(config: &FeeConfig, amount: Uint128) -> Result<FeeSplit, ContractError> {
    let admin_fee = calculate_admin_fee(amount, config.admin_fee_bps);
    let gas_fee = config.gas_fee;
    let fees = admin_fee.checked_add(gas_fee)?;

    if amount <= fees {
        return Err(ContractError::InvalidAmount {
            reason: format!(
                "amount {} does not cover admin fee {} and gas fee {}",
                amount, admin_fee, gas_fee
            ),
        });
    }

    Ok(FeeSplit {
        admin_fee,
        gas_fee,
        recipient_amount: amount - fees,
    })
}

// ============================================================================
// Accounting
// ============================================================================

/// Book the fees of one release.
///
/// The gas fee always accumulates. The admin fee accumulates only when no
/// bridge wallet is configured; otherwise the wallet is returned and the
/// caller pays it out.
pub fn accrue_fees(
    storage: &mut dyn Storage,
    config: &FeeConfig,
    split: &FeeSplit,
) -> StdResult<Option<Addr>> {
    let mut acc = FEE_ACCUMULATOR.load(storage)?;
    acc.gas_fee_accumulated = acc.gas_fee_accumulated.checked_add(split.gas_fee)?;

    let payout = match &config.bridge_wallet {
        Some(wallet) => Some(wallet.clone()),
        None => {
            acc.admin_fee_accumulated = acc.admin_fee_accumulated.checked_add(split.admin_fee)?;
            None
        }
    };

    FEE_ACCUMULATOR.save(storage, &acc)?;
    Ok(payout)
}

/// Take `amount` out of the admin fee accumulator. Returns what remains.
pub fn debit_admin_fee(
    storage: &mut dyn Storage,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    ensure_positive(amount)?;
    let mut acc = FEE_ACCUMULATOR.load(storage)?;
    if amount > acc.admin_fee_accumulated {
        return Err(ContractError::InsufficientAdminFee {
            available: acc.admin_fee_accumulated,
            requested: amount,
        });
    }
    acc.admin_fee_accumulated -= amount;
    FEE_ACCUMULATOR.save(storage, &acc)?;
    Ok(acc.admin_fee_accumulated)
}

/// Take `amount` out of the gas fee accumulator. Returns what remains.
pub fn debit_gas_fee(storage: &mut dyn Storage, amount: Uint128) -> Result<Uint128, ContractError> {
    ensure_positive(amount)?;
    let mut acc = FEE_ACCUMULATOR.load(storage)?;
    if amount > acc.gas_fee_accumulated {
        return Err(ContractError::InsufficientGasFee {
            available: acc.gas_fee_accumulated,
            requested: amount,
        });
    }
    acc.gas_fee_accumulated -= amount;
    FEE_ACCUMULATOR.save(storage, &acc)?;
    Ok(acc.gas_fee_accumulated)
}

fn ensure_positive(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "withdrawal amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
