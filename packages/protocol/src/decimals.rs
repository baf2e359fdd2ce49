use cosmwasm_std::Uint256;
use thiserror::Error;

/// Largest power of ten that fits in 256 bits.
pub const MAX_DECIMAL_SHIFT: u8 = 77;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecimalsError {
    #[error("Decimal conversion overflow: {amount} from {decimals_in} to {decimals_out} decimals")]
    Overflow {
        amount: Uint256,
        decimals_in: u8,
        decimals_out: u8,
    },
}

fn pow10(exp: u8) -> Option<Uint256> {
    Uint256::from(10u8).checked_pow(u32::from(exp)).ok()
}

/// Rescale `amount` from `decimals_in` to `decimals_out` decimal places.
///
/// Narrowing truncates toward zero; narrowing by more than
/// `MAX_DECIMAL_SHIFT` places always yields zero. Widening that would not fit
/// in 256 bits is an error.
pub fn convert(amount: Uint256, decimals_in: u8, decimals_out: u8) -> Result<Uint256, DecimalsError> {
    use std::cmp::Ordering;

    match decimals_out.cmp(&decimals_in) {
        Ordering::Equal => Ok(amount),
        Ordering::Greater => {
            if amount.is_zero() {
                return Ok(amount);
            }
            pow10(decimals_out - decimals_in)
                .and_then(|factor| amount.checked_mul(factor).ok())
                .ok_or(DecimalsError::Overflow {
                    amount,
                    decimals_in,
                    decimals_out,
                })
        }
        Ordering::Less => match pow10(decimals_in - decimals_out) {
            Some(divisor) => Ok(amount / divisor),
            None => Ok(Uint256::zero()),
        },
    }
}

/// Largest amount not above `amount` that survives a local -> remote -> local
/// round trip unchanged.
pub fn remove_dust(amount: Uint256, local: u8, remote: u8) -> Result<Uint256, DecimalsError> {
    convert(convert(amount, local, remote)?, remote, local)
}
