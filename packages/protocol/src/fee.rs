//! Bridge fee computation
//!
//! ## Formula
//!
//! ```text
//! base = gas_limit * gas_price + payload_length * price_per_byte
//! fee  = base * (10000 + protocol_fee_bps) / 10000
//! ```
//!
//! `gas_price` is the destination gas price already expressed in source
//! native units, as published by the price feed.

use cosmwasm_std::{StdError, StdResult, Uint256};

// ============================================================================
// Constants
// ============================================================================

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum protocol fee (100%)
pub const MAX_PROTOCOL_FEE_BPS: u16 = 10_000;

// ============================================================================
// Calculation
// ============================================================================

pub fn bridge_fee(
    gas_limit: u64,
    gas_price: Uint256,
    payload_length: u64,
    price_per_byte: Uint256,
    protocol_fee_bps: u16,
) -> StdResult<Uint256> {
    let execution = Uint256::from(gas_limit).checked_mul(gas_price)?;
    let transport = Uint256::from(payload_length).checked_mul(price_per_byte)?;
    let base = execution.checked_add(transport)?;
    let scaled = base.checked_mul(Uint256::from(BPS_DENOMINATOR + u64::from(protocol_fee_bps)))?;
    Ok(scaled / Uint256::from(BPS_DENOMINATOR))
}

pub fn validate_protocol_fee_bps(fee_bps: u16) -> StdResult<()> {
    if fee_bps > MAX_PROTOCOL_FEE_BPS {
        return Err(StdError::generic_err(format!(
            "Protocol fee {} bps exceeds maximum {} bps",
            fee_bps, MAX_PROTOCOL_FEE_BPS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_without_protocol_fee() {
        // 200_000 gas at 10 + 300 bytes at 2
        let fee = bridge_fee(200_000, Uint256::from(10u64), 300, Uint256::from(2u64), 0).unwrap();
        assert_eq!(fee, Uint256::from(2_000_600u64));
    }

    #[test]
    fn test_fee_with_protocol_fee() {
        // 1% on top of 1_000_000
        let fee = bridge_fee(100_000, Uint256::from(10u64), 0, Uint256::zero(), 100).unwrap();
        assert_eq!(fee, Uint256::from(1_010_000u64));

        // 100% doubles the base
        let fee = bridge_fee(100_000, Uint256::from(10u64), 0, Uint256::zero(), 10_000).unwrap();
        assert_eq!(fee, Uint256::from(2_000_000u64));
    }

    #[test]
    fn test_fee_rounds_down() {
        // base 3, 1 bps: 3 * 10001 / 10000 = 3
        let fee = bridge_fee(3, Uint256::one(), 0, Uint256::zero(), 1).unwrap();
        assert_eq!(fee, Uint256::from(3u64));
    }

    #[test]
    fn test_zero_prices_give_zero_fee() {
        let fee = bridge_fee(u64::MAX, Uint256::zero(), u64::MAX, Uint256::zero(), 10_000).unwrap();
        assert!(fee.is_zero());
    }

    #[test]
    fn test_zero_gas_and_payload_give_zero_fee() {
        let fee = bridge_fee(0, Uint256::from(10u64), 0, Uint256::from(2u64), 10_000).unwrap();
        assert!(fee.is_zero());
    }

    #[test]
    fn test_fee_overflow_is_error() {
        assert!(bridge_fee(2, Uint256::MAX, 0, Uint256::zero(), 0).is_err());
        assert!(bridge_fee(1, Uint256::MAX, 0, Uint256::zero(), 1).is_err());
    }

    #[test]
    fn test_validate_protocol_fee_bps() {
        assert!(validate_protocol_fee_bps(0).is_ok());
        assert!(validate_protocol_fee_bps(10_000).is_ok());
        assert!(validate_protocol_fee_bps(10_001).is_err());
    }
}
