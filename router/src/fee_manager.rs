//! Fee Manager Module
//!
//! Prices every outbound message and collects the payment.
//!
//! ## Fee Structure
//!
//! | Component          | Source                                   |
//! |--------------------|------------------------------------------|
//! | Execution cost     | `gas_limit * gas_price` (price feed)     |
//! | Transport cost     | `payload_length * price_per_byte`        |
//! | Protocol surcharge | per-destination bps on top of the sum    |
//!
//! The whole payment is forwarded to the fee collector, never just the fee.
//! If that transfer fails the coins stay with the router until swept.

use cosmwasm_std::{
    coins, BankMsg, Deps, MessageInfo, StdResult, Storage, SubMsg, Uint128, Uint256,
};
use xbridge_protocol::fee::bridge_fee;
use xbridge_protocol::interfaces::PriceFeedQueryMsg;
use xbridge_protocol::price::PriceRecord;

use crate::error::ContractError;
use crate::msg::BridgeFeeResponse;
use crate::state::{Config, PENDING_FEE, PROTOCOL_FEES, REPLY_FEE_TRANSFER, STATS};

/// Price a message of `payload_length` bytes to `chain_id`.
pub fn compute_bridge_fee(
    deps: Deps,
    config: &Config,
    chain_id: u64,
    gas_limit: u64,
    payload_length: u64,
) -> StdResult<BridgeFeeResponse> {
    let prices: PriceRecord = deps
        .querier
        .query_wasm_smart(&config.price_feed, &PriceFeedQueryMsg::Prices { chain_id })?;
    let protocol_fee_bps = PROTOCOL_FEES
        .may_load(deps.storage, chain_id)?
        .unwrap_or_default();

    let fee = bridge_fee(
        gas_limit,
        prices.gas_price,
        payload_length,
        prices.price_per_byte,
        protocol_fee_bps,
    )?;

    Ok(BridgeFeeResponse {
        chain_id,
        fee,
        gas_limit,
        gas_price: prices.gas_price,
        payload_length,
        price_per_byte: prices.price_per_byte,
        protocol_fee_bps,
    })
}

/// Amount of `denom` attached to the call. Any other denom is rejected.
pub fn paid_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    let mut paid = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != denom {
            return Err(ContractError::UnexpectedFunds {
                expected: denom.to_string(),
                denom: coin.denom.clone(),
            });
        }
        paid = paid.checked_add(coin.amount)?;
    }
    Ok(paid)
}

/// Check the payment covers `required` and build the transfer of the whole
/// payment to the fee collector.
///
/// Returns `None` when nothing was paid (a zero fee).
pub fn collect_fee(
    storage: &mut dyn Storage,
    config: &Config,
    info: &MessageInfo,
    required: Uint256,
) -> Result<(Option<SubMsg>, Uint128), ContractError> {
    let paid = paid_amount(info, &config.fee_denom)?;
    if Uint256::from(paid) < required {
        return Err(ContractError::InsufficientFee { required, paid });
    }
    if paid.is_zero() {
        return Ok((None, paid));
    }

    let mut stats = STATS.load(storage)?;
    stats.total_fees_collected = stats.total_fees_collected.checked_add(paid)?;
    STATS.save(storage, &stats)?;
    PENDING_FEE.save(storage, &paid)?;

    let transfer = BankMsg::Send {
        to_address: config.fee_collector.to_string(),
        amount: coins(paid.u128(), &config.fee_denom),
    };
    Ok((
        Some(SubMsg::reply_on_error(transfer, REPLY_FEE_TRANSFER)),
        paid,
    ))
}

/// The collector refused the transfer; the coins remain with the router.
pub fn record_retained_fee(storage: &mut dyn Storage) -> Result<Uint128, ContractError> {
    let amount = PENDING_FEE.may_load(storage)?.unwrap_or_default();
    PENDING_FEE.remove(storage);

    let mut stats = STATS.load(storage)?;
    stats.total_fees_retained = stats.total_fees_retained.checked_add(amount)?;
    STATS.save(storage, &stats)?;
    Ok(amount)
}
