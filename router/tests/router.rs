//! Integration tests for the router using cw-multi-test.
//!
//! The connector and master router are stand-ins that record what they
//! receive, so the router is exercised on its own.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::testing::{
    mock_dependencies, mock_dependencies_with_balance, mock_env, mock_info,
};
use cosmwasm_std::{
    coins, from_json, to_json_binary, Addr, Api, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Empty,
    Env, MessageInfo, Reply, Response, StdError, StdResult, SubMsgResult, Uint128, Uint256,
};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use cw_storage_plus::{Item, Map};

use router::msg::{BridgeFeeResponse, ExecuteMsg, InstantiateMsg, QueryMsg, StatsResponse};
use router::state::{CONFIG, REPLY_FEE_TRANSFER};
use router::ContractError;
use xbridge_protocol::codec::{ConfigUpdate, DeployRequest, ValueTransfer};
use xbridge_protocol::interfaces::{
    ChainConfigsResponse, ConnectorExecuteMsg, ConnectorQueryMsg, MasterRouterExecuteMsg,
};
use xbridge_protocol::price::{pack_gas_prices, ChainPriceHeader};
use xbridge_protocol::status::parse_status_data;
use xbridge_protocol::{ChainConfig, MessageType, Status};

const DENOM: &str = "unative";
const THIS_CHAIN: u64 = 1;
const REMOTE_CHAIN: u64 = 2;
const PAUSED_CHAIN: u64 = 3;
const UNCONFIGURED_CHAIN: u64 = 4;
const GAS_PRICE: u64 = 10;
const PRICE_PER_BYTE: u128 = 2;

// ============================================================================
// Stand-in contracts
// ============================================================================

#[cw_serde]
struct MockConnectorInit {
    chains: Vec<(u64, ChainConfig)>,
    /// Status returned from `Redeem`; `None` makes it fail
    redeem_status: Option<u8>,
}

const MOCK_CHAINS: Map<u64, ChainConfig> = Map::new("chains");
const MOCK_REDEEM_STATUS: Item<Option<u8>> = Item::new("redeem_status");
const MOCK_LAST_CALL: Item<ConnectorExecuteMsg> = Item::new("last_call");

fn connector_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: MockConnectorInit,
) -> StdResult<Response> {
    for (chain_id, config) in msg.chains {
        MOCK_CHAINS.save(deps.storage, chain_id, &config)?;
    }
    MOCK_REDEEM_STATUS.save(deps.storage, &msg.redeem_status)?;
    Ok(Response::new())
}

fn connector_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ConnectorExecuteMsg,
) -> StdResult<Response> {
    MOCK_LAST_CALL.save(deps.storage, &msg)?;
    match msg {
        ConnectorExecuteMsg::Redeem { .. } => match MOCK_REDEEM_STATUS.load(deps.storage)? {
            Some(code) => Ok(Response::new().set_data(Binary::from(vec![code]))),
            None => Err(StdError::generic_err("redeem rejected")),
        },
        ConnectorExecuteMsg::UpdateChainConfigs { .. } => {
            Ok(Response::new().set_data(Binary::from(vec![Status::Success.code()])))
        }
    }
}

#[cw_serde]
enum MockQueryMsg {
    ChainConfigs { chain_ids: Vec<u64> },
    LastCall {},
    Proposals {},
}

fn connector_query(deps: Deps, _env: Env, msg: MockQueryMsg) -> StdResult<Binary> {
    match msg {
        MockQueryMsg::ChainConfigs { chain_ids } => {
            let configs = chain_ids
                .into_iter()
                .map(|id| Ok(MOCK_CHAINS.may_load(deps.storage, id)?.unwrap_or_default()))
                .collect::<StdResult<Vec<_>>>()?;
            to_json_binary(&ChainConfigsResponse { configs })
        }
        MockQueryMsg::LastCall {} => to_json_binary(&MOCK_LAST_CALL.may_load(deps.storage)?),
        MockQueryMsg::Proposals {} => Err(StdError::generic_err("not a master router")),
    }
}

const MOCK_PROPOSALS: Item<Vec<MasterRouterExecuteMsg>> = Item::new("proposals");

fn master_instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new())
}

fn master_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: MasterRouterExecuteMsg,
) -> StdResult<Response> {
    let mut proposals = MOCK_PROPOSALS.may_load(deps.storage)?.unwrap_or_default();
    proposals.push(msg);
    MOCK_PROPOSALS.save(deps.storage, &proposals)?;
    Ok(Response::new())
}

fn master_query(deps: Deps, _env: Env, _msg: MockQueryMsg) -> StdResult<Binary> {
    to_json_binary(&MOCK_PROPOSALS.may_load(deps.storage)?.unwrap_or_default())
}

// ============================================================================
// Test Setup
// ============================================================================

struct Suite {
    app: App,
    router: Addr,
    connector: Addr,
    master: Addr,
    admin: Addr,
    collector: Addr,
}

fn remote_peer() -> Binary {
    Binary::from(vec![0xaa; 32])
}

fn setup_with(redeem_status: Option<u8>) -> Suite {
    let mut app = App::default();
    let admin = Addr::unchecked("admin");
    let collector = Addr::unchecked("collector");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &admin, coins(10_000_000_000, DENOM))
            .unwrap();
    });

    let feed_code = app.store_code(Box::new(ContractWrapper::new(
        price_feed::contract::execute,
        price_feed::contract::instantiate,
        price_feed::contract::query,
    )));
    let router_code = app.store_code(Box::new(
        ContractWrapper::new(
            router::contract::execute,
            router::contract::instantiate,
            router::contract::query,
        )
        .with_reply(router::contract::reply),
    ));
    let connector_code = app.store_code(Box::new(ContractWrapper::new(
        connector_execute,
        connector_instantiate,
        connector_query,
    )));
    let master_code = app.store_code(Box::new(ContractWrapper::new(
        master_execute,
        master_instantiate,
        master_query,
    )));

    let feed = app
        .instantiate_contract(
            feed_code,
            admin.clone(),
            &price_feed::msg::InstantiateMsg {
                admin: admin.to_string(),
                providers: vec![],
            },
            &[],
            "price-feed",
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
            chain_ids: vec![REMOTE_CHAIN],
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

    let master = app
        .instantiate_contract(master_code, admin.clone(), &Empty {}, &[], "master", None)
        .unwrap();

    let router = app
        .instantiate_contract(
            router_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                master_router: master.to_string(),
                price_feed: feed.to_string(),
                fee_collector: collector.to_string(),
                fee_denom: DENOM.to_string(),
                this_chain_id: THIS_CHAIN,
                update_gas_limit: 300_000,
            },
            &[],
            "router",
            None,
        )
        .unwrap();

    let connector = app
        .instantiate_contract(
            connector_code,
            admin.clone(),
            &MockConnectorInit {
                chains: vec![
                    (
                        REMOTE_CHAIN,
                        ChainConfig {
                            peer: remote_peer(),
                            min_gas_limit: 100_000,
                            remote_decimals: 18,
                            paused: false,
                        },
                    ),
                    (
                        PAUSED_CHAIN,
                        ChainConfig {
                            peer: remote_peer(),
                            min_gas_limit: 100_000,
                            remote_decimals: 18,
                            paused: true,
                        },
                    ),
                ],
                redeem_status,
            },
            &[],
            "connector",
            None,
        )
        .unwrap();

    app.send_tokens(admin.clone(), connector.clone(), &coins(1_000_000_000, DENOM))
        .unwrap();

    Suite {
        app,
        router,
        connector,
        master,
        admin,
        collector,
    }
}

fn setup() -> Suite {
    setup_with(Some(Status::Success.code()))
}

fn bridge_msg(dst_chain_id: u64, gas_limit: u64) -> ExecuteMsg {
    ExecuteMsg::Bridge {
        sender: "user".to_string(),
        recipient: Binary::from(vec![0x11; 20]),
        amount: Uint256::from(5_000_000u64),
        src_decimals: 18,
        dst_chain_id,
        gas_limit,
        custom_payload: Binary::default(),
    }
}

fn estimate(suite: &Suite, gas_limit: u64) -> BridgeFeeResponse {
    suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.router,
            &QueryMsg::EstimateBridgeFee {
                connector: suite.connector.to_string(),
                dst_chain_id: REMOTE_CHAIN,
                recipient: Binary::from(vec![0x11; 20]),
                custom_payload: Binary::default(),
                gas_limit,
            },
        )
        .unwrap()
}

fn proposals(suite: &Suite) -> Vec<MasterRouterExecuteMsg> {
    suite
        .app
        .wrap()
        .query_wasm_smart(&suite.master, &MockQueryMsg::Proposals {})
        .unwrap()
}

fn balance(suite: &Suite, addr: &Addr) -> u128 {
    suite.app.wrap().query_balance(addr, DENOM).unwrap().amount.u128()
}

fn status_of(res: &AppResponse) -> Option<Status> {
    res.data.as_deref().and_then(parse_status_data)
}

fn canonical(suite: &Suite, addr: &Addr) -> Binary {
    Binary::from(
        suite
            .app
            .api()
            .addr_canonicalize(addr.as_str())
            .unwrap()
            .to_vec(),
    )
}

// ============================================================================
// Outbound
// ============================================================================

#[test]
fn test_bridge_charges_fee_and_sends_proposal() {
    let mut suite = setup();
    let fee = estimate(&suite, 200_000);

    assert_eq!(fee.gas_price, Uint256::from(GAS_PRICE));
    assert_eq!(fee.price_per_byte, Uint256::from(PRICE_PER_BYTE));
    assert_eq!(
        fee.fee,
        Uint256::from(200_000u64 * GAS_PRICE) + Uint256::from(fee.payload_length * 2)
    );

    let paid = Uint128::try_from(fee.fee).unwrap().u128();
    suite
        .app
        .execute_contract(
            suite.connector.clone(),
            suite.router.clone(),
            &bridge_msg(REMOTE_CHAIN, 200_000),
            &coins(paid, DENOM),
        )
        .unwrap();

    assert_eq!(balance(&suite, &suite.collector), paid);
    assert_eq!(balance(&suite, &suite.router), 0);

    let sent = proposals(&suite);
    assert_eq!(sent.len(), 1);
    let MasterRouterExecuteMsg::SendProposal {
        dst_chain_id,
        message_type,
        destination,
        payload,
    } = sent[0].clone();
    assert_eq!(dst_chain_id, REMOTE_CHAIN);
    assert_eq!(message_type, MessageType::ValueTransfer.as_u8());
    assert_eq!(destination, remote_peer());
    assert_eq!(payload.len() as u64, fee.payload_length);

    let transfer = ValueTransfer::decode_payload(destination.to_vec(), &payload).unwrap();
    assert_eq!(transfer.src_chain_id, THIS_CHAIN);
    assert_eq!(transfer.src_peer, canonical(&suite, &suite.connector).to_vec());
    assert_eq!(transfer.amount, Uint256::from(5_000_000u64));
    assert_eq!(transfer.src_decimals, 18);
    assert_eq!(transfer.gas_limit, 200_000);
}

#[test]
fn test_overpayment_goes_to_collector() {
    let mut suite = setup();
    let fee = Uint128::try_from(estimate(&suite, 200_000).fee).unwrap().u128();

    suite
        .app
        .execute_contract(
            suite.connector.clone(),
            suite.router.clone(),
            &bridge_msg(REMOTE_CHAIN, 200_000),
            &coins(fee + 12_345, DENOM),
        )
        .unwrap();

    assert_eq!(balance(&suite, &suite.collector), fee + 12_345);

    let stats: StatsResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.router, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_bridges, 1);
    assert_eq!(stats.total_fees_collected, Uint128::new(fee + 12_345));
}

#[test]
fn test_insufficient_fee_rejected() {
    let mut suite = setup();
    let fee = estimate(&suite, 200_000).fee;
    let short = Uint128::try_from(fee).unwrap().u128() - 1;

    let err = suite
        .app
        .execute_contract(
            suite.connector.clone(),
            suite.router.clone(),
            &bridge_msg(REMOTE_CHAIN, 200_000),
            &coins(short, DENOM),
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::InsufficientFee {
            required: fee,
            paid: Uint128::new(short),
        })
    );
    assert!(proposals(&suite).is_empty());
}

#[test]
fn test_destination_checks() {
    let mut suite = setup();
    let funds = coins(100_000_000, DENOM);

    let cases = [
        (
            bridge_msg(PAUSED_CHAIN, 200_000),
            ContractError::ChainPaused {
                chain_id: PAUSED_CHAIN,
            },
        ),
        (
            bridge_msg(UNCONFIGURED_CHAIN, 200_000),
            ContractError::ChainNotConfigured {
                chain_id: UNCONFIGURED_CHAIN,
            },
        ),
        (
            bridge_msg(REMOTE_CHAIN, 99_999),
            ContractError::GasLimitTooLow {
                gas_limit: 99_999,
                min_gas_limit: 100_000,
            },
        ),
    ];

    for (msg, expected) in cases {
        let err = suite
            .app
            .execute_contract(suite.connector.clone(), suite.router.clone(), &msg, &funds)
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ContractError>(), Some(&expected));
    }
}

#[test]
fn test_wrong_fee_denom_rejected() {
    let mut suite = setup();
    suite
        .app
        .init_modules(|router, _, storage| {
            router
                .bank
                .init_balance(storage, &Addr::unchecked("payer"), coins(1_000, "uother"))
        })
        .unwrap();

    // a non-connector caller cannot even be priced
    let res = suite.app.execute_contract(
        Addr::unchecked("payer"),
        suite.router.clone(),
        &bridge_msg(REMOTE_CHAIN, 200_000),
        &coins(1_000, "uother"),
    );
    assert!(res.is_err());

    suite
        .app
        .send_tokens(
            Addr::unchecked("payer"),
            suite.connector.clone(),
            &coins(1_000, "uother"),
        )
        .unwrap();
    let err = suite
        .app
        .execute_contract(
            suite.connector.clone(),
            suite.router.clone(),
            &bridge_msg(REMOTE_CHAIN, 200_000),
            &coins(1_000, "uother"),
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::UnexpectedFunds {
            expected: DENOM.to_string(),
            denom: "uother".to_string(),
        })
    );
}

#[test]
fn test_protocol_fee_applied() {
    let mut suite = setup();
    let base = estimate(&suite, 200_000).fee;

    suite
        .app
        .execute_contract(
            suite.admin.clone(),
            suite.router.clone(),
            &ExecuteMsg::SetProtocolFee {
                chain_ids: vec![REMOTE_CHAIN],
                fee_bps: vec![250],
            },
            &[],
        )
        .unwrap();

    let with_fee = estimate(&suite, 200_000);
    assert_eq!(with_fee.protocol_fee_bps, 250);
    assert_eq!(
        with_fee.fee,
        base * Uint256::from(10_250u64) / Uint256::from(10_000u64)
    );

    let err = suite
        .app
        .execute_contract(
            suite.admin.clone(),
            suite.router.clone(),
            &ExecuteMsg::SetProtocolFee {
                chain_ids: vec![REMOTE_CHAIN],
                fee_bps: vec![10_001],
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::InvalidFeeBps { fee_bps: 10_001 })
    );
}

#[test]
fn test_zero_gas_and_payload_cost_nothing() {
    let mut suite = setup();
    suite
        .app
        .execute_contract(
            suite.admin.clone(),
            suite.router.clone(),
            &ExecuteMsg::SetProtocolFee {
                chain_ids: vec![REMOTE_CHAIN],
                fee_bps: vec![500],
            },
            &[],
        )
        .unwrap();

    let quote: BridgeFeeResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.router,
            &QueryMsg::BridgeFee {
                chain_id: REMOTE_CHAIN,
                gas_limit: 0,
                payload_length: 0,
            },
        )
        .unwrap();
    assert!(!quote.gas_price.is_zero());
    assert!(!quote.price_per_byte.is_zero());
    assert_eq!(quote.protocol_fee_bps, 500);
    assert_eq!(quote.fee, Uint256::zero());
}

#[test]
fn test_request_to_update_config_fans_out() {
    let mut suite = setup();
    let new_configs = vec![ChainConfig {
        peer: Binary::from(vec![0xbb; 20]),
        min_gas_limit: 1,
        remote_decimals: 6,
        paused: false,
    }];

    let funds = coins(100_000_000, DENOM);
    suite
        .app
        .execute_contract(
            suite.connector.clone(),
            suite.router.clone(),
            &ExecuteMsg::RequestToUpdateConfig {
                dst_chain_ids: vec![REMOTE_CHAIN, PAUSED_CHAIN],
                chain_ids: vec![9],
                configs: new_configs.clone(),
            },
            &funds,
        )
        .unwrap();

    let sent = proposals(&suite);
    assert_eq!(sent.len(), 2);
    for proposal in sent {
        let MasterRouterExecuteMsg::SendProposal {
            message_type,
            destination,
            payload,
            ..
        } = proposal;
        assert_eq!(message_type, MessageType::ConfigUpdate.as_u8());
        let update = ConfigUpdate::decode_payload(destination.to_vec(), &payload).unwrap();
        assert_eq!(update.src_chain_id, THIS_CHAIN);
        assert_eq!(update.chain_ids, vec![9]);
        assert_eq!(update.configs, new_configs);
    }

    let err = suite
        .app
        .execute_contract(
            suite.connector.clone(),
            suite.router.clone(),
            &ExecuteMsg::RequestToUpdateConfig {
                dst_chain_ids: vec![UNCONFIGURED_CHAIN],
                chain_ids: vec![9],
                configs: new_configs,
            },
            &funds,
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::ChainNotConfigured {
            chain_id: UNCONFIGURED_CHAIN
        })
    );
}

// ============================================================================
// Inbound
// ============================================================================

fn sample_transfer(suite: &Suite) -> ValueTransfer {
    ValueTransfer {
        destination: canonical(suite, &suite.connector).to_vec(),
        recipient: vec![0x22; 20],
        amount: Uint256::from(7u64),
        src_chain_id: REMOTE_CHAIN,
        src_peer: remote_peer().to_vec(),
        src_decimals: 18,
        gas_limit: 150_000,
        custom_payload: vec![],
    }
}

fn handle(suite: &mut Suite, message_type: u8, destination: Vec<u8>, payload: Vec<u8>) -> AppResponse {
    suite
        .app
        .execute_contract(
            suite.master.clone(),
            suite.router.clone(),
            &ExecuteMsg::HandleMessage {
                message_type,
                destination: Binary::from(destination),
                payload: Binary::from(payload),
            },
            &[],
        )
        .unwrap()
}

#[test]
fn test_handle_message_forwards_destination_status() {
    let mut suite = setup_with(Some(Status::RecordedForRetry.code()));
    let transfer = sample_transfer(&suite);

    let res = handle(
        &mut suite,
        1,
        transfer.destination.clone(),
        transfer.encode_payload(),
    );
    assert_eq!(status_of(&res), Some(Status::RecordedForRetry));

    let last: Option<ConnectorExecuteMsg> = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.connector, &MockQueryMsg::LastCall {})
        .unwrap();
    assert_eq!(
        last,
        Some(ConnectorExecuteMsg::Redeem {
            recipient: Binary::from(vec![0x22; 20]),
            amount: Uint256::from(7u64),
            custom_payload: Binary::default(),
            origin: transfer.origin(),
            gas_limit: 150_000,
        })
    );
}

#[test]
fn test_handle_message_destination_threw() {
    let mut suite = setup_with(None);
    let transfer = sample_transfer(&suite);

    let res = handle(
        &mut suite,
        1,
        transfer.destination.clone(),
        transfer.encode_payload(),
    );
    assert_eq!(status_of(&res), Some(Status::DestinationThrew));

    // a well-formed address with no contract behind it
    let nobody = canonical(&suite, &Addr::unchecked("nobody")).to_vec();
    let res = handle(&mut suite, 1, nobody, transfer.encode_payload());
    assert_eq!(status_of(&res), Some(Status::DestinationThrew));
}

#[test]
fn test_handle_message_undeliverable_statuses() {
    let mut suite = setup();
    let transfer = sample_transfer(&suite);
    let destination = transfer.destination.clone();

    let res = handle(&mut suite, 9, destination.clone(), transfer.encode_payload());
    assert_eq!(status_of(&res), Some(Status::UnsupportedMessageType));

    let res = handle(&mut suite, 1, destination.clone(), vec![1, 2, 3]);
    assert_eq!(status_of(&res), Some(Status::DecodeFailed));

    let deploy = DeployRequest {
        destination: destination.clone(),
        is_connector: true,
        payer: vec![1; 20],
        deploy_params: vec![],
    };
    let res = handle(&mut suite, 3, destination, deploy.encode_payload());
    assert_eq!(status_of(&res), Some(Status::UnsupportedMessageType));

    let res = handle(&mut suite, 1, vec![0x33; 20], transfer.encode_payload());
    assert_eq!(status_of(&res), Some(Status::MalformedAddress));

    let stats: StatsResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.router, &QueryMsg::Stats {})
        .unwrap();
    let total: u64 = stats.inbound.iter().map(|c| c.count).sum();
    assert_eq!(total, 4);
}

#[test]
fn test_config_update_delivery() {
    let mut suite = setup();
    let update = ConfigUpdate {
        destination: canonical(&suite, &suite.connector).to_vec(),
        src_chain_id: REMOTE_CHAIN,
        src_peer: remote_peer().to_vec(),
        chain_ids: vec![REMOTE_CHAIN],
        configs: vec![ChainConfig::default()],
    };

    let res = handle(
        &mut suite,
        2,
        update.destination.clone(),
        update.encode_payload(),
    );
    assert_eq!(status_of(&res), Some(Status::Success));
}

#[test]
fn test_handle_message_requires_master_router() {
    let mut suite = setup();
    let transfer = sample_transfer(&suite);

    let err = suite
        .app
        .execute_contract(
            Addr::unchecked("stranger"),
            suite.router.clone(),
            &ExecuteMsg::HandleMessage {
                message_type: 1,
                destination: Binary::from(transfer.destination.clone()),
                payload: Binary::from(transfer.encode_payload()),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::UnauthorizedMasterRouter)
    );
}

// ============================================================================
// Fee retention
// ============================================================================

#[test]
fn test_rejected_fee_transfer_is_retained() {
    let mut deps = mock_dependencies();
    router::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        InstantiateMsg {
            admin: "admin".to_string(),
            master_router: "master".to_string(),
            price_feed: "feed".to_string(),
            fee_collector: "collector".to_string(),
            fee_denom: DENOM.to_string(),
            this_chain_id: THIS_CHAIN,
            update_gas_limit: 300_000,
        },
    )
    .unwrap();

    let config = CONFIG.load(deps.as_ref().storage).unwrap();
    let info = mock_info("connector", &coins(500, DENOM));
    let (msg, paid) = router::fee_manager::collect_fee(
        deps.as_mut().storage,
        &config,
        &info,
        Uint256::from(400u64),
    )
    .unwrap();
    assert!(msg.is_some());
    assert_eq!(paid, Uint128::new(500));

    let res = router::contract::reply(
        deps.as_mut(),
        mock_env(),
        Reply {
            id: REPLY_FEE_TRANSFER,
            result: SubMsgResult::Err("collector rejected".to_string()),
        },
    )
    .unwrap();
    assert!(res
        .attributes
        .iter()
        .any(|a| a.key == "retained" && a.value == "500"));

    let stats: StatsResponse = from_json(
        router::contract::query(deps.as_ref(), mock_env(), QueryMsg::Stats {}).unwrap(),
    )
    .unwrap();
    assert_eq!(stats.total_fees_collected, Uint128::new(500));
    assert_eq!(stats.total_fees_retained, Uint128::new(500));
}

#[test]
fn test_sweep_sends_retained_fees_to_collector() {
    let mut deps = mock_dependencies_with_balance(&coins(500, DENOM));
    router::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        mock_info("admin", &[]),
        InstantiateMsg {
            admin: "admin".to_string(),
            master_router: "master".to_string(),
            price_feed: "feed".to_string(),
            fee_collector: "collector".to_string(),
            fee_denom: DENOM.to_string(),
            this_chain_id: THIS_CHAIN,
            update_gas_limit: 300_000,
        },
    )
    .unwrap();

    // anyone may sweep
    let res = router::contract::execute(
        deps.as_mut(),
        mock_env(),
        mock_info("anyone", &[]),
        ExecuteMsg::Sweep {},
    )
    .unwrap();
    assert_eq!(res.messages.len(), 1);
    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: "collector".to_string(),
            amount: coins(500, DENOM),
        })
    );

    let stats: StatsResponse = from_json(
        router::contract::query(deps.as_ref(), mock_env(), QueryMsg::Stats {}).unwrap(),
    )
    .unwrap();
    assert_eq!(stats.total_fees_swept, Uint128::new(500));

    // the bank send has not settled in the mock querier, so empty it by hand
    deps.querier.update_balance(mock_env().contract.address, vec![]);
    let err = router::contract::execute(
        deps.as_mut(),
        mock_env(),
        mock_info("anyone", &[]),
        ExecuteMsg::Sweep {},
    )
    .unwrap_err();
    assert_eq!(err, ContractError::NothingToSweep);
}
