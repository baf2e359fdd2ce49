//! Two-chain test harness.
//!
//! Chain A (id 1) and chain B (id 2) each get a price feed, router, master
//! router, transport stand-in, CW20 token, and connector. Both live in one
//! `App`; `relay` carries envelopes from one transport outbox to the other
//! chain's master router.

#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Api, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdResult, Uint128, Uint256,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse, TokenInfoResponse};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use cw_storage_plus::Item;

use connector::msg::{ExecuteMsg, InstantiateMsg, IsExecutionFailedResponse, QueryMsg};
use connector::state::TokenType;
use xbridge_protocol::interfaces::TransportExecuteMsg;
use xbridge_protocol::price::{pack_gas_prices, ChainPriceHeader};
use xbridge_protocol::status::parse_status_data;
use xbridge_protocol::{ChainConfig, Origin, Status};

pub const DENOM: &str = "unative";
pub const CHAIN_A: u64 = 1;
pub const CHAIN_B: u64 = 2;
pub const PROTOCOL_VERSION: u8 = 1;
pub const GAS_LIMIT: u64 = 200_000;
pub const MIN_GAS_LIMIT: u64 = 100_000;
pub const GAS_PRICE: u64 = 1;
pub const PRICE_PER_BYTE: u128 = 1;

// ============================================================================
// Transport stand-in
// ============================================================================

const OUTBOX: Item<Vec<TransportExecuteMsg>> = Item::new("outbox");

#[cw_serde]
pub enum TransportQueryMsg {
    Outbox {},
}

fn transport_instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new())
}

fn transport_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: TransportExecuteMsg,
) -> StdResult<Response> {
    let mut outbox = OUTBOX.may_load(deps.storage)?.unwrap_or_default();
    outbox.push(msg);
    OUTBOX.save(deps.storage, &outbox)?;
    Ok(Response::new())
}

fn transport_query(deps: Deps, _env: Env, _msg: TransportQueryMsg) -> StdResult<Binary> {
    to_json_binary(&OUTBOX.may_load(deps.storage)?.unwrap_or_default())
}

// ============================================================================
// Setup
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    A,
    B,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

#[derive(Clone, Copy)]
pub struct ChainParams {
    pub decimals: u8,
    pub token_type: TokenType,
}

impl ChainParams {
    pub fn mint_burn(decimals: u8) -> Self {
        Self {
            decimals,
            token_type: TokenType::MintBurn,
        }
    }

    pub fn lock_unlock(decimals: u8) -> Self {
        Self {
            decimals,
            token_type: TokenType::LockUnlock,
        }
    }
}

pub struct Chain {
    pub chain_id: u64,
    pub decimals: u8,
    pub feed: Addr,
    pub transport: Addr,
    pub master: Addr,
    pub router: Addr,
    pub token: Addr,
    pub connector: Addr,
}

struct Codes {
    feed: u64,
    transport: u64,
    master: u64,
    router: u64,
    token: u64,
    connector: u64,
}

pub struct Suite {
    pub app: App,
    pub a: Chain,
    pub b: Chain,
    pub admin: Addr,
    pub user: Addr,
    pub collector: Addr,
    relayed: [usize; 2],
}

fn store_codes(app: &mut App) -> Codes {
    Codes {
        feed: app.store_code(Box::new(ContractWrapper::new(
            price_feed::contract::execute,
            price_feed::contract::instantiate,
            price_feed::contract::query,
        ))),
        transport: app.store_code(Box::new(ContractWrapper::new(
            transport_execute,
            transport_instantiate,
            transport_query,
        ))),
        master: app.store_code(Box::new(
            ContractWrapper::new(
                master_router::contract::execute,
                master_router::contract::instantiate,
                master_router::contract::query,
            )
            .with_reply(master_router::contract::reply),
        )),
        router: app.store_code(Box::new(
            ContractWrapper::new(
                router::contract::execute,
                router::contract::instantiate,
                router::contract::query,
            )
            .with_reply(router::contract::reply),
        )),
        token: app.store_code(Box::new(ContractWrapper::new(
            cw20_base::contract::execute,
            cw20_base::contract::instantiate,
            cw20_base::contract::query,
        ))),
        connector: app.store_code(Box::new(
            ContractWrapper::new(
                connector::contract::execute,
                connector::contract::instantiate,
                connector::contract::query,
            )
            .with_reply(connector::contract::reply),
        )),
    }
}

fn deploy_chain(
    app: &mut App,
    codes: &Codes,
    chain_id: u64,
    remote_chain_id: u64,
    params: ChainParams,
    admin: &Addr,
    user: &Addr,
    collector: &Addr,
) -> Chain {
    let label = |name: &str| format!("{}-{}", name, chain_id);

    let feed = app
        .instantiate_contract(
            codes.feed,
            admin.clone(),
            &price_feed::msg::InstantiateMsg {
                admin: admin.to_string(),
                providers: vec![],
            },
            &[],
            label("price-feed"),
            None,
        )
        .unwrap();
    app.execute_contract(
        admin.clone(),
        feed.clone(),
        &price_feed::msg::ExecuteMsg::SetPrices {
            group_ids: vec![0],
            packed_values: vec![pack_gas_prices([GAS_PRICE, 0, 0, 0])],
        },
        &[],
    )
    .unwrap();
    app.execute_contract(
        admin.clone(),
        feed.clone(),
        &price_feed::msg::ExecuteMsg::SetChainInfo {
            chain_ids: vec![remote_chain_id],
            packed_headers: vec![ChainPriceHeader {
                slot_offset: 0,
                group_id: 0,
                price_per_byte: Uint128::new(PRICE_PER_BYTE),
            }
            .pack()],
        },
        &[],
    )
    .unwrap();

    let transport = app
        .instantiate_contract(
            codes.transport,
            admin.clone(),
            &Empty {},
            &[],
            label("transport"),
            None,
        )
        .unwrap();

    let master = app
        .instantiate_contract(
            codes.master,
            admin.clone(),
            &master_router::msg::InstantiateMsg {
                admin: admin.to_string(),
                transport: transport.to_string(),
                protocol_version: PROTOCOL_VERSION,
                max_payload_size: 10_000,
            },
            &[],
            label("master-router"),
            None,
        )
        .unwrap();

    let router = app
        .instantiate_contract(
            codes.router,
            admin.clone(),
            &router::msg::InstantiateMsg {
                admin: admin.to_string(),
                master_router: master.to_string(),
                price_feed: feed.to_string(),
                fee_collector: collector.to_string(),
                fee_denom: DENOM.to_string(),
                this_chain_id: chain_id,
                update_gas_limit: 300_000,
            },
            &[],
            label("router"),
            None,
        )
        .unwrap();

    for msg in [
        master_router::msg::ExecuteMsg::SetRoute {
            message_type: 1,
            router: Some(router.to_string()),
        },
        master_router::msg::ExecuteMsg::SetRoute {
            message_type: 2,
            router: Some(router.to_string()),
        },
        master_router::msg::ExecuteMsg::SetRouterAuthorization {
            router: router.to_string(),
            authorized: true,
        },
    ] {
        app.execute_contract(admin.clone(), master.clone(), &msg, &[])
            .unwrap();
    }

    let token = app
        .instantiate_contract(
            codes.token,
            admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: format!("Bridged Token {}", chain_id),
                symbol: "XBT".to_string(),
                decimals: params.decimals,
                initial_balances: vec![Cw20Coin {
                    address: user.to_string(),
                    amount: units(1_000_000, params.decimals),
                }],
                mint: Some(MinterResponse {
                    minter: admin.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            label("token"),
            None,
        )
        .unwrap();

    let connector = app
        .instantiate_contract(
            codes.connector,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                router: router.to_string(),
                token: token.to_string(),
                token_type: params.token_type,
                decimals: params.decimals,
            },
            &[],
            label("connector"),
            None,
        )
        .unwrap();

    app.execute_contract(
        admin.clone(),
        token.clone(),
        &Cw20ExecuteMsg::UpdateMinter {
            new_minter: Some(connector.to_string()),
        },
        &[],
    )
    .unwrap();

    Chain {
        chain_id,
        decimals: params.decimals,
        feed,
        transport,
        master,
        router,
        token,
        connector,
    }
}

/// Canonical address bytes, the identifier format on the wire.
pub fn canonical(app: &App, addr: &Addr) -> Binary {
    Binary::from(app.api().addr_canonicalize(addr.as_str()).unwrap().to_vec())
}

pub fn setup(a: ChainParams, b: ChainParams) -> Suite {
    let mut app = App::default();
    let admin = Addr::unchecked("admin");
    let user = Addr::unchecked("user");
    let collector = Addr::unchecked("collector");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &admin, coins(1_000_000_000_000, DENOM))
            .unwrap();
        router
            .bank
            .init_balance(storage, &user, coins(1_000_000_000_000, DENOM))
            .unwrap();
    });

    let codes = store_codes(&mut app);
    let chain_a = deploy_chain(&mut app, &codes, CHAIN_A, CHAIN_B, a, &admin, &user, &collector);
    let chain_b = deploy_chain(&mut app, &codes, CHAIN_B, CHAIN_A, b, &admin, &user, &collector);

    // master routers and connectors know each other
    for (local, remote) in [(&chain_a, &chain_b), (&chain_b, &chain_a)] {
        app.execute_contract(
            admin.clone(),
            local.master.clone(),
            &master_router::msg::ExecuteMsg::SetRemoteMasterRouter {
                chain_id: remote.chain_id,
                master_router: canonical(&app, &remote.master),
            },
            &[],
        )
        .unwrap();
        app.execute_contract(
            admin.clone(),
            local.connector.clone(),
            &ExecuteMsg::SetChainConfig {
                chain_ids: vec![remote.chain_id],
                configs: vec![ChainConfig {
                    peer: canonical(&app, &remote.connector),
                    min_gas_limit: MIN_GAS_LIMIT,
                    remote_decimals: remote.decimals,
                    paused: false,
                }],
            },
            &[],
        )
        .unwrap();
    }

    Suite {
        app,
        a: chain_a,
        b: chain_b,
        admin,
        user,
        collector,
        relayed: [0, 0],
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn status_of(res: &AppResponse) -> Status {
    res.data.as_deref().and_then(parse_status_data).unwrap()
}

impl Suite {
    pub fn chain(&self, side: Side) -> &Chain {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    fn other(side: Side) -> Side {
        match side {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn canonical(&self, addr: &Addr) -> Binary {
        canonical(&self.app, addr)
    }

    /// Deliver every envelope sent from `from` since the last relay.
    pub fn relay(&mut self, from: Side) -> Vec<Status> {
        let src_transport = self.chain(from).transport.clone();
        let dst = self.chain(Self::other(from));
        let (dst_transport, dst_master) = (dst.transport.clone(), dst.master.clone());

        let outbox: Vec<TransportExecuteMsg> = self
            .app
            .wrap()
            .query_wasm_smart(&src_transport, &TransportQueryMsg::Outbox {})
            .unwrap();

        let start = self.relayed[from.index()];
        self.relayed[from.index()] = outbox.len();

        outbox[start..]
            .iter()
            .map(|sent| {
                let TransportExecuteMsg::SendMessage { message, .. } = sent;
                let res = self
                    .app
                    .execute_contract(
                        dst_transport.clone(),
                        dst_master.clone(),
                        &master_router::msg::ExecuteMsg::ExecuteProposal {
                            message: message.clone(),
                        },
                        &[],
                    )
                    .unwrap();
                status_of(&res)
            })
            .collect()
    }

    pub fn estimate_fee(&self, from: Side, recipient: &Binary, custom_payload: &Binary) -> u128 {
        let chain = self.chain(from);
        let fee: router::msg::BridgeFeeResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &chain.router,
                &router::msg::QueryMsg::EstimateBridgeFee {
                    connector: chain.connector.to_string(),
                    dst_chain_id: self.chain(Self::other(from)).chain_id,
                    recipient: recipient.clone(),
                    custom_payload: custom_payload.clone(),
                    gas_limit: GAS_LIMIT,
                },
            )
            .unwrap();
        Uint128::try_from(fee.fee).unwrap().u128()
    }

    pub fn approve(&mut self, side: Side, amount: Uint128) {
        let (token, connector) = {
            let chain = self.chain(side);
            (chain.token.clone(), chain.connector.clone())
        };
        self.app
            .execute_contract(
                self.user.clone(),
                token,
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: connector.to_string(),
                    amount,
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    /// Bridge from `from` to the user's own address on the other chain.
    pub fn try_bridge_with(
        &mut self,
        from: Side,
        amount: Uint128,
        recipient: Binary,
        custom_payload: Binary,
    ) -> anyhow::Result<AppResponse> {
        let fee = self.estimate_fee(from, &recipient, &custom_payload);
        self.approve(from, amount);
        let connector = self.chain(from).connector.clone();
        let dst_chain_id = self.chain(Self::other(from)).chain_id;
        self.app.execute_contract(
            self.user.clone(),
            connector,
            &ExecuteMsg::Bridge {
                dst_chain_id,
                recipient,
                amount,
                gas_limit: GAS_LIMIT,
                custom_payload,
            },
            &coins(fee, DENOM),
        )
    }

    pub fn bridge(&mut self, from: Side, amount: Uint128) -> AppResponse {
        let recipient = self.canonical(&self.user.clone());
        self.try_bridge_with(from, amount, recipient, Binary::default())
            .unwrap()
    }

    pub fn balance(&self, side: Side, addr: &Addr) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.chain(side).token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn supply(&self, side: Side) -> Uint128 {
        let res: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(&self.chain(side).token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply
    }

    pub fn native_balance(&self, addr: &Addr) -> u128 {
        self.app.wrap().query_balance(addr, DENOM).unwrap().amount.u128()
    }

    pub fn admin_exec(&mut self, contract: &Addr, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(self.admin.clone(), contract.clone(), msg, &[])
    }

    /// Origin the chain `to` sees for messages from the other chain.
    pub fn origin_at(&self, to: Side) -> Origin {
        let from = self.chain(Self::other(to));
        Origin {
            src_chain_id: from.chain_id,
            src_peer: self.canonical(&from.connector),
            src_decimals: self.chain(to).decimals,
        }
    }

    pub fn is_execution_failed(
        &self,
        side: Side,
        recipient: &Binary,
        amount: Uint256,
        nonce: u64,
    ) -> bool {
        let res: IsExecutionFailedResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.chain(side).connector,
                &QueryMsg::IsExecutionFailed {
                    recipient: recipient.clone(),
                    amount,
                    custom_payload: Binary::default(),
                    origin: self.origin_at(side),
                    nonce,
                },
            )
            .unwrap();
        res.failed
    }
}

/// `whole` tokens at `decimals`
pub fn units(whole: u128, decimals: u8) -> Uint128 {
    Uint128::new(whole * 10u128.pow(u32::from(decimals)))
}
