//! Packed price words
//!
//! Gas prices are stored four to a 256-bit group word, slot `i` in bits
//! `[64*i, 64*i + 64)`. Each chain has a header word pointing at its slot:
//!
//! | bits        | field                         |
//! |-------------|-------------------------------|
//! | `[0, 8)`    | slot offset within the group  |
//! | `[8, 40)`   | group id                      |
//! | `[40, 64)`  | reserved                      |
//! | `[64, 192)` | flat price per payload byte   |
//! | `[192,256)` | reserved                      |

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Uint128, Uint256};
use thiserror::Error;

pub const SLOTS_PER_GROUP: u8 = 4;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PriceError {
    #[error("Invalid slot offset {slot}: must be below 4")]
    InvalidSlotOffset { slot: u8 },
}

/// Prices as the router consumes them.
#[cw_serde]
#[derive(Default, Eq)]
pub struct PriceRecord {
    /// Destination gas price expressed in source native units
    pub gas_price: Uint256,
    pub price_per_byte: Uint256,
}

pub fn pack_gas_prices(prices: [u64; SLOTS_PER_GROUP as usize]) -> Uint256 {
    let mut bytes = [0u8; 32];
    for (slot, price) in prices.iter().enumerate() {
        let end = 32 - slot * 8;
        bytes[end - 8..end].copy_from_slice(&price.to_be_bytes());
    }
    Uint256::from_be_bytes(bytes)
}

pub fn unpack_gas_price(word: Uint256, slot: u8) -> Result<u64, PriceError> {
    if slot >= SLOTS_PER_GROUP {
        return Err(PriceError::InvalidSlotOffset { slot });
    }
    let bytes = word.to_be_bytes();
    let end = 32 - usize::from(slot) * 8;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[end - 8..end]);
    Ok(u64::from_be_bytes(buf))
}

#[cw_serde]
#[derive(Default, Copy, Eq)]
pub struct ChainPriceHeader {
    pub slot_offset: u8,
    pub group_id: u32,
    pub price_per_byte: Uint128,
}

impl ChainPriceHeader {
    pub fn pack(&self) -> Uint256 {
        let mut bytes = [0u8; 32];
        bytes[31] = self.slot_offset;
        bytes[27..31].copy_from_slice(&self.group_id.to_be_bytes());
        bytes[8..24].copy_from_slice(&self.price_per_byte.u128().to_be_bytes());
        Uint256::from_be_bytes(bytes)
    }

    /// Reserved bits are ignored.
    pub fn unpack(word: Uint256) -> Result<Self, PriceError> {
        let bytes = word.to_be_bytes();
        let slot_offset = bytes[31];
        if slot_offset >= SLOTS_PER_GROUP {
            return Err(PriceError::InvalidSlotOffset { slot: slot_offset });
        }

        let mut group = [0u8; 4];
        group.copy_from_slice(&bytes[27..31]);
        let mut per_byte = [0u8; 16];
        per_byte.copy_from_slice(&bytes[8..24]);

        Ok(Self {
            slot_offset,
            group_id: u32::from_be_bytes(group),
            price_per_byte: Uint128::new(u128::from_be_bytes(per_byte)),
        })
    }
}
