//! Integration tests for the cross-domain messenger using cw-multi-test.
//!
//! Two domains share one app: L1 sends through `transport_l1`, L2 receives
//! through `transport_l2`. A small receiver contract on L2 records what the
//! relayed calls observe.

use cosmwasm_std::{coins, to_json_binary, Addr, Binary, Empty, Uint128, Uint256};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use common::messenger::DEFAULT_XDOMAIN_SENDER;
use messenger::msg::{
    ConfigResponse, ExecuteMsg, HashMessageResponse, InstantiateMsg, LegacyRelayedResponse,
    MessageNonceResponse, MessageStatusResponse, MigrateMsg, QueryMsg,
};
use messenger::replay::RelayStatus;
use messenger::state::GasPolicy;
use messenger::{encode_versioned_nonce, CrossDomainMessage};
use testing::{forward, last_delivery, mock_transport_contract, relay_last_delivery};

const DENOM: &str = "uluna";
const MIN_GAS: u64 = 100_000;

// ============================================================================
// Receiver Contract
// ============================================================================

mod receiver {
    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{
        to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
        StdResult, SubMsg, SubMsgResult, Uint128, WasmMsg,
    };
    use cw_storage_plus::Item;

    use common::messenger::{MessengerQueryMsg, XDomainMessageSenderResponse};
    use messenger::msg::{MessageStatusResponse, QueryMsg as MessengerQuery};

    #[cw_serde]
    pub struct InstantiateMsg {}

    #[cw_serde]
    pub enum ExecuteMsg {
        /// Record the remote sender and the value received
        Ping {},
        SetFailing { failing: bool },
        /// Store a relay payload (and its hash) for `Reenter` to replay
        Arm { relay: Binary, hash: Binary },
        /// Relay the armed payload again from inside the running relay
        Reenter {},
    }

    #[cw_serde]
    pub enum QueryMsg {
        State {},
    }

    #[cw_serde]
    #[derive(Default)]
    pub struct State {
        pub pings: u64,
        pub last_sender: Option<String>,
        pub received: Uint128,
        pub observed_lock: bool,
        pub reentry_error: Option<String>,
    }

    const STATE: Item<State> = Item::new("state");
    const FAILING: Item<bool> = Item::new("failing");
    const ARMED: Item<(Binary, Binary)> = Item::new("armed");

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: InstantiateMsg,
    ) -> StdResult<Response> {
        STATE.save(deps.storage, &State::default())?;
        FAILING.save(deps.storage, &false)?;
        Ok(Response::new())
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> StdResult<Response> {
        match msg {
            ExecuteMsg::Ping {} => {
                if FAILING.load(deps.storage)? {
                    return Err(StdError::generic_err("receiver is failing"));
                }
                let sender: XDomainMessageSenderResponse = deps.querier.query_wasm_smart(
                    &info.sender,
                    &MessengerQueryMsg::XDomainMessageSender {},
                )?;
                let mut state = STATE.load(deps.storage)?;
                state.pings += 1;
                state.last_sender = Some(sender.sender);
                state.received += info.funds.iter().map(|c| c.amount).sum::<Uint128>();
                STATE.save(deps.storage, &state)?;
                Ok(Response::new())
            }
            ExecuteMsg::SetFailing { failing } => {
                FAILING.save(deps.storage, &failing)?;
                Ok(Response::new())
            }
            ExecuteMsg::Arm { relay, hash } => {
                ARMED.save(deps.storage, &(relay, hash))?;
                Ok(Response::new())
            }
            ExecuteMsg::Reenter {} => {
                let (relay, hash) = ARMED.load(deps.storage)?;
                let status: MessageStatusResponse = deps
                    .querier
                    .query_wasm_smart(&info.sender, &MessengerQuery::MessageStatus { hash })?;
                let mut state = STATE.load(deps.storage)?;
                state.observed_lock = status.locked;
                STATE.save(deps.storage, &state)?;

                let call = WasmMsg::Execute {
                    contract_addr: info.sender.to_string(),
                    msg: relay,
                    funds: vec![],
                };
                Ok(Response::new().add_submessage(SubMsg::reply_on_error(call, 1)))
            }
        }
    }

    pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> StdResult<Response> {
        if let SubMsgResult::Err(err) = msg.result {
            let mut state = STATE.load(deps.storage)?;
            state.reentry_error = Some(err);
            STATE.save(deps.storage, &state)?;
        }
        Ok(Response::new())
    }

    pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
        match msg {
            QueryMsg::State {} => to_json_binary(&STATE.load(deps.storage)?),
        }
    }
}

// ============================================================================
// Test Setup
// ============================================================================

fn contract_messenger() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        messenger::contract::execute,
        messenger::contract::instantiate,
        messenger::contract::query,
    )
    .with_reply(messenger::contract::reply)
    .with_migrate(messenger::contract::migrate);
    Box::new(contract)
}

fn contract_receiver() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(receiver::execute, receiver::instantiate, receiver::query)
        .with_reply(receiver::reply);
    Box::new(contract)
}

fn gas_policy() -> GasPolicy {
    GasPolicy {
        reserved_gas: 50_000,
        margin_numerator: 64,
        margin_denominator: 63,
        calldata_gas_per_byte: 16,
    }
}

struct Domains {
    app: App,
    admin: Addr,
    user: Addr,
    transport_l1: Addr,
    transport_l2: Addr,
    messenger_l1: Addr,
    messenger_l2: Addr,
    receiver: Addr,
}

fn setup() -> Domains {
    let mut app = App::default();

    let admin = Addr::unchecked("terra1admin");
    let user = Addr::unchecked("terra1user");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &user, coins(10_000_000_000, DENOM))
            .unwrap();
    });

    let transport_code = app.store_code(mock_transport_contract());
    let messenger_code = app.store_code(contract_messenger());
    let receiver_code = app.store_code(contract_receiver());

    let transport = |app: &mut App, label: &str| {
        app.instantiate_contract(
            transport_code,
            admin.clone(),
            &testing::transport::InstantiateMsg {},
            &[],
            label,
            None,
        )
        .unwrap()
    };
    let transport_l1 = transport(&mut app, "transport-l1");
    let transport_l2 = transport(&mut app, "transport-l2");

    let messenger = |app: &mut App, transport: &Addr, other: &str, label: &str| {
        app.instantiate_contract(
            messenger_code,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                transport: transport.to_string(),
                other_messenger: other.to_string(),
                native_denom: DENOM.to_string(),
                gas_policy: gas_policy(),
            },
            &[],
            label,
            Some(admin.to_string()),
        )
        .unwrap()
    };
    let messenger_l1 = messenger(&mut app, &transport_l1, "unwired", "messenger-l1");
    let messenger_l2 = messenger(&mut app, &transport_l2, messenger_l1.as_str(), "messenger-l2");

    app.execute_contract(
        admin.clone(),
        messenger_l1.clone(),
        &ExecuteMsg::UpdateConfig {
            transport: None,
            other_messenger: Some(messenger_l2.to_string()),
        },
        &[],
    )
    .unwrap();

    let receiver = app
        .instantiate_contract(
            receiver_code,
            admin.clone(),
            &receiver::InstantiateMsg {},
            &[],
            "receiver",
            None,
        )
        .unwrap();

    Domains {
        app,
        admin,
        user,
        transport_l1,
        transport_l2,
        messenger_l1,
        messenger_l2,
        receiver,
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn ping() -> Binary {
    to_json_binary(&receiver::ExecuteMsg::Ping {}).unwrap()
}

fn send(d: &mut Domains, target: &Addr, message: Binary, value: u128) -> AppResponse {
    let funds = if value == 0 { vec![] } else { coins(value, DENOM) };
    d.app
        .execute_contract(
            d.user.clone(),
            d.messenger_l1.clone(),
            &ExecuteMsg::SendMessage {
                target: target.to_string(),
                message,
                min_gas_limit: MIN_GAS,
            },
            &funds,
        )
        .unwrap()
}

fn relay_payload(message: &CrossDomainMessage, gas_budget: u64) -> Binary {
    to_json_binary(&ExecuteMsg::RelayMessage {
        nonce: message.nonce,
        sender: message.sender.clone(),
        target: message.target.clone(),
        value: message.value,
        min_gas_limit: message.min_gas_limit,
        message: message.message.clone(),
        gas_budget,
    })
    .unwrap()
}

/// Deliver `message` to L2 as the transport acting for the L1 messenger.
fn forward_from_l1(
    d: &mut Domains,
    message: &CrossDomainMessage,
    gas_budget: u64,
    value: u128,
) -> anyhow::Result<AppResponse> {
    let funds = if value == 0 { vec![] } else { coins(value, DENOM) };
    let remote_sender = d.messenger_l1.to_string();
    forward(
        &mut d.app,
        &d.transport_l2,
        &remote_sender,
        d.messenger_l2.as_str(),
        relay_payload(message, gas_budget),
        &funds,
    )
}

fn crafted(d: &Domains, counter: u64, version: u16, value: u128) -> CrossDomainMessage {
    CrossDomainMessage {
        nonce: encode_versioned_nonce(Uint256::from(counter), version),
        sender: "terra1remoteuser".to_string(),
        target: d.receiver.to_string(),
        value: Uint128::new(value),
        min_gas_limit: MIN_GAS,
        message: ping(),
    }
}

fn ample_gas() -> u64 {
    gas_policy().base_gas(64, MIN_GAS)
}

fn message_status(d: &Domains, hash: [u8; 32]) -> MessageStatusResponse {
    d.app
        .wrap()
        .query_wasm_smart(
            &d.messenger_l2,
            &QueryMsg::MessageStatus {
                hash: Binary::from(hash.to_vec()),
            },
        )
        .unwrap()
}

fn receiver_state(d: &Domains) -> receiver::State {
    d.app
        .wrap()
        .query_wasm_smart(&d.receiver, &receiver::QueryMsg::State {})
        .unwrap()
}

fn nonce(d: &Domains, messenger: &Addr) -> MessageNonceResponse {
    d.app
        .wrap()
        .query_wasm_smart(messenger, &QueryMsg::MessageNonce {})
        .unwrap()
}

fn balance(d: &Domains, addr: &Addr) -> u128 {
    d.app.wrap().query_balance(addr, DENOM).unwrap().amount.u128()
}

fn has_event(res: &AppResponse, ty: &str) -> bool {
    res.events.iter().any(|e| e.ty == format!("wasm-{}", ty))
}

// ============================================================================
// Instantiate & Config
// ============================================================================

#[test]
fn test_instantiate_and_wire_peers() {
    let d = setup();
    let config: ConfigResponse = d
        .app
        .wrap()
        .query_wasm_smart(&d.messenger_l1, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.admin, d.admin);
    assert_eq!(config.transport, d.transport_l1);
    assert_eq!(config.other_messenger, d.messenger_l2.to_string());
    assert_eq!(config.gas_policy, gas_policy());
    assert!(!config.paused);

    let start = nonce(&d, &d.messenger_l1);
    assert_eq!(start.version, 1);
    assert_eq!(start.nonce, encode_versioned_nonce(Uint256::zero(), 1));
}

#[test]
fn test_update_config_requires_admin() {
    let mut d = setup();
    let res = d.app.execute_contract(
        d.user.clone(),
        d.messenger_l1.clone(),
        &ExecuteMsg::UpdateConfig {
            transport: None,
            other_messenger: Some("terra1evil".to_string()),
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Unauthorized"));
}

#[test]
fn test_update_gas_policy_is_validated() {
    let mut d = setup();
    let res = d.app.execute_contract(
        d.admin.clone(),
        d.messenger_l2.clone(),
        &ExecuteMsg::UpdateGasPolicy {
            gas_policy: GasPolicy {
                margin_denominator: 0,
                ..gas_policy()
            },
        },
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Invalid gas policy"));
}

// ============================================================================
// Send
// ============================================================================

#[test]
fn test_send_message_hands_relay_to_transport() {
    let mut d = setup();
    let receiver = d.receiver.clone();
    let res = send(&mut d, &receiver, ping(), 500);
    assert!(has_event(&res, "sent_message"));
    assert!(has_event(&res, "sent_message_extension1"));

    let delivery = last_delivery(&d.app, &d.transport_l1);
    assert_eq!(delivery.sender, d.messenger_l1);
    assert_eq!(delivery.target, d.messenger_l2.to_string());
    assert_eq!(delivery.value, coins(500, DENOM));
    assert_eq!(delivery.gas_limit, gas_policy().base_gas(ping().len(), MIN_GAS));

    let relay: ExecuteMsg = cosmwasm_std::from_json(&delivery.payload).unwrap();
    match relay {
        ExecuteMsg::RelayMessage {
            nonce,
            sender,
            target,
            value,
            min_gas_limit,
            message,
            gas_budget,
        } => {
            assert_eq!(nonce, encode_versioned_nonce(Uint256::zero(), 1));
            assert_eq!(sender, d.user.to_string());
            assert_eq!(target, d.receiver.to_string());
            assert_eq!(value, Uint128::new(500));
            assert_eq!(min_gas_limit, MIN_GAS);
            assert_eq!(message, ping());
            assert_eq!(gas_budget, delivery.gas_limit);
        }
        other => panic!("unexpected payload: {:?}", other),
    }

    assert_eq!(balance(&d, &d.transport_l1), 500);
}

#[test]
fn test_send_nonces_are_strictly_increasing() {
    let mut d = setup();
    let receiver = d.receiver.clone();
    let mut seen = vec![];
    for _ in 0..3 {
        send(&mut d, &receiver, ping(), 0);
        let delivery = last_delivery(&d.app, &d.transport_l1);
        let relay: ExecuteMsg = cosmwasm_std::from_json(&delivery.payload).unwrap();
        if let ExecuteMsg::RelayMessage { nonce, .. } = relay {
            seen.push(nonce);
        }
    }
    assert_eq!(seen.len(), 3);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(
        nonce(&d, &d.messenger_l1).nonce,
        encode_versioned_nonce(Uint256::from(3u64), 1)
    );
}

#[test]
fn test_send_rejects_foreign_denom() {
    let mut d = setup();
    d.app
        .sudo(cw_multi_test::SudoMsg::Bank(cw_multi_test::BankSudo::Mint {
            to_address: d.user.to_string(),
            amount: coins(100, "uusd"),
        }))
        .unwrap();
    let res = d.app.execute_contract(
        d.user.clone(),
        d.messenger_l1.clone(),
        &ExecuteMsg::SendMessage {
            target: d.receiver.to_string(),
            message: ping(),
            min_gas_limit: MIN_GAS,
        },
        &coins(100, "uusd"),
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Invalid funds"));
}

// ============================================================================
// Relay: Success & Replay
// ============================================================================

#[test]
fn test_relay_succeeds_once() {
    let mut d = setup();
    let receiver = d.receiver.clone();
    send(&mut d, &receiver, ping(), 1_000);

    let (from, to) = (d.transport_l1.clone(), d.transport_l2.clone());
    let res = relay_last_delivery(&mut d.app, &from, &to).unwrap();
    assert!(has_event(&res, "relayed_message"));

    let state = receiver_state(&d);
    assert_eq!(state.pings, 1);
    assert_eq!(state.last_sender, Some(d.user.to_string()));
    assert_eq!(state.received, Uint128::new(1_000));
    assert_eq!(balance(&d, &d.receiver), 1_000);

    let message = CrossDomainMessage {
        nonce: encode_versioned_nonce(Uint256::zero(), 1),
        sender: d.user.to_string(),
        target: d.receiver.to_string(),
        value: Uint128::new(1_000),
        min_gas_limit: MIN_GAS,
        message: ping(),
    };
    let status = message_status(&d, message.relay_hash().unwrap());
    assert_eq!(status.status, RelayStatus::Succeeded);
    assert!(!status.locked);

    // the same delivery again is refused and changes nothing
    let res = relay_last_delivery(&mut d.app, &from, &to);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("has already been relayed"));
    assert_eq!(receiver_state(&d).pings, 1);

    // so is a retry by anyone else
    let res = d.app.execute_contract(
        d.user.clone(),
        d.messenger_l2.clone(),
        &cosmwasm_std::from_json::<ExecuteMsg>(&relay_payload(&message, ample_gas())).unwrap(),
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("has already been relayed"));
}

#[test]
fn test_remote_sender_is_cleared_after_relay() {
    let mut d = setup();
    let receiver = d.receiver.clone();
    send(&mut d, &receiver, ping(), 0);
    let (from, to) = (d.transport_l1.clone(), d.transport_l2.clone());
    relay_last_delivery(&mut d.app, &from, &to).unwrap();

    let res: Result<common::messenger::XDomainMessageSenderResponse, _> = d
        .app
        .wrap()
        .query_wasm_smart(&d.messenger_l2, &QueryMsg::XDomainMessageSender {});
    assert!(res.unwrap_err().to_string().contains("not set"));
    assert_ne!(receiver_state(&d).last_sender.as_deref(), Some(DEFAULT_XDOMAIN_SENDER));
}

#[test]
fn test_relay_advances_receiving_counter() {
    let mut d = setup();
    let receiver = d.receiver.clone();
    let before = nonce(&d, &d.messenger_l2).nonce;
    send(&mut d, &receiver, ping(), 0);
    let (from, to) = (d.transport_l1.clone(), d.transport_l2.clone());
    relay_last_delivery(&mut d.app, &from, &to).unwrap();
    assert!(nonce(&d, &d.messenger_l2).nonce > before);
}

#[test]
fn test_value_only_message_transfers_to_target() {
    let mut d = setup();
    let wallet = Addr::unchecked("terra1wallet");
    send(&mut d, &wallet, Binary::default(), 750);
    let (from, to) = (d.transport_l1.clone(), d.transport_l2.clone());
    let res = relay_last_delivery(&mut d.app, &from, &to).unwrap();
    assert!(has_event(&res, "relayed_message"));
    assert_eq!(balance(&d, &wallet), 750);
    assert_eq!(balance(&d, &d.messenger_l2), 0);
}

// ============================================================================
// Relay: Failure & Retry
// ============================================================================

#[test]
fn test_failed_relay_keeps_value_and_can_be_retried() {
    let mut d = setup();
    let receiver = d.receiver.clone();
    d.app
        .execute_contract(
            d.admin.clone(),
            receiver.clone(),
            &receiver::ExecuteMsg::SetFailing { failing: true },
            &[],
        )
        .unwrap();

    send(&mut d, &receiver, ping(), 2_000);
    let (from, to) = (d.transport_l1.clone(), d.transport_l2.clone());
    let res = relay_last_delivery(&mut d.app, &from, &to).unwrap();
    assert!(has_event(&res, "failed_relayed_message"));

    let message = CrossDomainMessage {
        nonce: encode_versioned_nonce(Uint256::zero(), 1),
        sender: d.user.to_string(),
        target: receiver.to_string(),
        value: Uint128::new(2_000),
        min_gas_limit: MIN_GAS,
        message: ping(),
    };
    let hash = message.relay_hash().unwrap();
    let status = message_status(&d, hash);
    assert_eq!(status.status, RelayStatus::Failed);
    assert!(!status.locked);
    assert_eq!(receiver_state(&d).pings, 0);
    assert_eq!(balance(&d, &d.messenger_l2), 2_000);

    // a retry that fails again stays Failed
    let retry = cosmwasm_std::from_json::<ExecuteMsg>(&relay_payload(&message, ample_gas())).unwrap();
    let res = d
        .app
        .execute_contract(d.user.clone(), d.messenger_l2.clone(), &retry, &[])
        .unwrap();
    assert!(has_event(&res, "failed_relayed_message"));
    assert_eq!(message_status(&d, hash).status, RelayStatus::Failed);

    // a retry carrying value is refused
    let res = d.app.execute_contract(
        d.user.clone(),
        d.messenger_l2.clone(),
        &retry,
        &coins(1, DENOM),
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Value mismatch"));

    d.app
        .execute_contract(
            d.admin.clone(),
            receiver.clone(),
            &receiver::ExecuteMsg::SetFailing { failing: false },
            &[],
        )
        .unwrap();
    let res = d
        .app
        .execute_contract(d.user.clone(), d.messenger_l2.clone(), &retry, &[])
        .unwrap();
    assert!(has_event(&res, "relayed_message"));
    assert_eq!(message_status(&d, hash).status, RelayStatus::Succeeded);

    let state = receiver_state(&d);
    assert_eq!(state.pings, 1);
    assert_eq!(state.last_sender, Some(d.user.to_string()));
    assert_eq!(balance(&d, &receiver), 2_000);
    assert_eq!(balance(&d, &d.messenger_l2), 0);

    let res = d
        .app
        .execute_contract(d.user.clone(), d.messenger_l2.clone(), &retry, &[]);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("has already been relayed"));
}

#[test]
fn test_first_relay_by_outsider_is_refused() {
    let mut d = setup();
    let message = crafted(&d, 0, 1, 0);
    let relay = cosmwasm_std::from_json::<ExecuteMsg>(&relay_payload(&message, ample_gas())).unwrap();
    let res = d
        .app
        .execute_contract(d.user.clone(), d.messenger_l2.clone(), &relay, &[]);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Value mismatch"));
    assert_eq!(
        message_status(&d, message.relay_hash().unwrap()).status,
        RelayStatus::Unset
    );
}

#[test]
fn test_transport_acting_for_unknown_sender_is_not_privileged() {
    let mut d = setup();
    let message = crafted(&d, 0, 1, 0);
    let (transport, messenger) = (d.transport_l2.clone(), d.messenger_l2.clone());
    let res = forward(
        &mut d.app,
        &transport,
        "terra1impostor",
        messenger.as_str(),
        relay_payload(&message, ample_gas()),
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Value mismatch"));
}

// ============================================================================
// Relay: Preconditions
// ============================================================================

#[test]
fn test_privileged_value_must_match() {
    let mut d = setup();
    let message = crafted(&d, 0, 1, 300);
    let res = forward_from_l1(&mut d, &message, ample_gas(), 299);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Value mismatch: expected 300, got 299"));

    forward_from_l1(&mut d, &message, ample_gas(), 300).unwrap();
    assert_eq!(receiver_state(&d).received, Uint128::new(300));
}

#[test]
fn test_unsafe_targets_are_refused() {
    let mut d = setup();
    for target in [d.messenger_l2.clone(), d.transport_l2.clone()] {
        let message = CrossDomainMessage {
            target: target.to_string(),
            ..crafted(&d, 0, 1, 0)
        };
        let res = forward_from_l1(&mut d, &message, ample_gas(), 0);
        assert!(res
            .unwrap_err()
            .root_cause()
            .to_string()
            .contains("Unsafe target"));
        assert_eq!(
            message_status(&d, message.relay_hash().unwrap()).status,
            RelayStatus::Unset
        );
    }
}

#[test]
fn test_insufficient_gas_aborts_without_record() {
    let mut d = setup();
    let message = crafted(&d, 0, 1, 0);
    let floor = gas_policy().reserved_gas + gas_policy().min_forward_gas(MIN_GAS);

    // the forwarded budget must exceed the scaled limit, equality is not enough
    for budget in [floor - 1, floor] {
        let res = forward_from_l1(&mut d, &message, budget, 0);
        assert!(res
            .unwrap_err()
            .root_cause()
            .to_string()
            .contains("Insufficient relay gas"));
    }
    let status = message_status(&d, message.relay_hash().unwrap());
    assert_eq!(status.status, RelayStatus::Unset);
    assert!(!status.locked);

    forward_from_l1(&mut d, &message, floor + 1, 0).unwrap();
    assert_eq!(receiver_state(&d).pings, 1);
}

#[test]
fn test_unaddressable_target_is_recorded_as_failed() {
    let mut d = setup();
    let message = CrossDomainMessage {
        target: "Terra1NotNormalized".to_string(),
        ..crafted(&d, 0, 1, 500)
    };
    let res = forward_from_l1(&mut d, &message, ample_gas(), 500).unwrap();
    assert!(has_event(&res, "failed_relayed_message"));

    let status = message_status(&d, message.relay_hash().unwrap());
    assert_eq!(status.status, RelayStatus::Failed);
    assert!(!status.locked);
    assert_eq!(balance(&d, &d.messenger_l2), 500);
    assert_eq!(nonce(&d, &d.messenger_l2).nonce, encode_versioned_nonce(Uint256::one(), 1));
}

#[test]
fn test_unsupported_version_is_refused() {
    let mut d = setup();
    let message = crafted(&d, 0, 2, 0);
    let res = forward_from_l1(&mut d, &message, ample_gas(), 0);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Unsupported message version: 2"));
}

// ============================================================================
// Relay: Reentrancy
// ============================================================================

#[test]
fn test_reentrant_relay_of_same_message_is_refused() {
    let mut d = setup();
    let message = CrossDomainMessage {
        message: to_json_binary(&receiver::ExecuteMsg::Reenter {}).unwrap(),
        ..crafted(&d, 0, 1, 0)
    };
    let hash = message.relay_hash().unwrap();
    d.app
        .execute_contract(
            d.admin.clone(),
            d.receiver.clone(),
            &receiver::ExecuteMsg::Arm {
                relay: relay_payload(&message, ample_gas()),
                hash: Binary::from(hash.to_vec()),
            },
            &[],
        )
        .unwrap();

    let res = forward_from_l1(&mut d, &message, ample_gas(), 0).unwrap();
    assert!(has_event(&res, "relayed_message"));

    let state = receiver_state(&d);
    assert!(state.observed_lock);
    assert!(state
        .reentry_error
        .unwrap()
        .contains("Reentrant call"));

    let status = message_status(&d, hash);
    assert_eq!(status.status, RelayStatus::Succeeded);
    assert!(!status.locked);
}

// ============================================================================
// Pause
// ============================================================================

#[test]
fn test_pause_blocks_send_and_relay() {
    let mut d = setup();
    for messenger in [d.messenger_l1.clone(), d.messenger_l2.clone()] {
        d.app
            .execute_contract(d.admin.clone(), messenger, &ExecuteMsg::Pause {}, &[])
            .unwrap();
    }

    let res = d.app.execute_contract(
        d.user.clone(),
        d.messenger_l1.clone(),
        &ExecuteMsg::SendMessage {
            target: d.receiver.to_string(),
            message: ping(),
            min_gas_limit: MIN_GAS,
        },
        &[],
    );
    assert!(res.unwrap_err().root_cause().to_string().contains("paused"));

    let message = crafted(&d, 0, 1, 0);
    let res = forward_from_l1(&mut d, &message, ample_gas(), 0);
    assert!(res.unwrap_err().root_cause().to_string().contains("paused"));

    let res = d.app.execute_contract(
        d.user.clone(),
        d.messenger_l2.clone(),
        &ExecuteMsg::Unpause {},
        &[],
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Unauthorized"));

    d.app
        .execute_contract(
            d.admin.clone(),
            d.messenger_l2.clone(),
            &ExecuteMsg::Unpause {},
            &[],
        )
        .unwrap();
    forward_from_l1(&mut d, &message, ample_gas(), 0).unwrap();
    assert_eq!(receiver_state(&d).pings, 1);
}

// ============================================================================
// Legacy Messages & Migration
// ============================================================================

#[test]
fn test_version_zero_message_relays() {
    let mut d = setup();
    let message = crafted(&d, 9, 0, 0);
    forward_from_l1(&mut d, &message, ample_gas(), 0).unwrap();
    assert_eq!(receiver_state(&d).pings, 1);
    assert_eq!(
        message_status(&d, message.relay_hash().unwrap()).status,
        RelayStatus::Succeeded
    );

    let hashes: HashMessageResponse = d
        .app
        .wrap()
        .query_wasm_smart(
            &d.messenger_l2,
            &QueryMsg::HashMessage {
                nonce: message.nonce,
                sender: message.sender.clone(),
                target: message.target.clone(),
                value: message.value,
                min_gas_limit: message.min_gas_limit,
                message: message.message.clone(),
            },
        )
        .unwrap();
    assert_eq!(hashes.version, 0);
    assert_eq!(hashes.hash.to_vec(), message.hash().unwrap().to_vec());
    assert_eq!(hashes.relay_hash.to_vec(), message.relay_hash().unwrap().to_vec());
}

#[test]
fn test_version_zero_retry_cannot_change_value() {
    let mut d = setup();
    let receiver = d.receiver.clone();
    d.app
        .execute_contract(
            d.admin.clone(),
            receiver.clone(),
            &receiver::ExecuteMsg::SetFailing { failing: true },
            &[],
        )
        .unwrap();

    // two failed messages leave their value with the messenger
    send(&mut d, &receiver, ping(), 2_000);
    let (from, to) = (d.transport_l1.clone(), d.transport_l2.clone());
    relay_last_delivery(&mut d.app, &from, &to).unwrap();
    let legacy = crafted(&d, 7, 0, 300);
    let res = forward_from_l1(&mut d, &legacy, ample_gas(), 300).unwrap();
    assert!(has_event(&res, "failed_relayed_message"));
    assert_eq!(balance(&d, &d.messenger_l2), 2_300);

    d.app
        .execute_contract(
            d.admin.clone(),
            receiver.clone(),
            &receiver::ExecuteMsg::SetFailing { failing: false },
            &[],
        )
        .unwrap();

    // same legacy id, larger value: a different message that was never attempted
    let inflated = CrossDomainMessage {
        value: Uint128::new(2_300),
        ..legacy.clone()
    };
    assert_eq!(inflated.hash().unwrap(), legacy.hash().unwrap());
    let retry = cosmwasm_std::from_json::<ExecuteMsg>(&relay_payload(&inflated, ample_gas())).unwrap();
    let res = d
        .app
        .execute_contract(d.user.clone(), d.messenger_l2.clone(), &retry, &[]);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Value mismatch"));
    assert_eq!(balance(&d, &d.messenger_l2), 2_300);
    assert_eq!(
        message_status(&d, inflated.relay_hash().unwrap()).status,
        RelayStatus::Unset
    );

    // the original retry pays exactly its own value
    let retry = cosmwasm_std::from_json::<ExecuteMsg>(&relay_payload(&legacy, ample_gas())).unwrap();
    let res = d
        .app
        .execute_contract(d.user.clone(), d.messenger_l2.clone(), &retry, &[])
        .unwrap();
    assert!(has_event(&res, "relayed_message"));
    assert_eq!(receiver_state(&d).received, Uint128::new(300));
    assert_eq!(balance(&d, &d.messenger_l2), 2_000);
}

#[test]
fn test_migrated_legacy_ids_block_version_zero_relay() {
    let mut d = setup();
    let legacy = crafted(&d, 4, 0, 0);
    let hash = Binary::from(legacy.hash().unwrap().to_vec());
    let code_id = d.app.contract_data(&d.messenger_l2).unwrap().code_id;

    d.app
        .migrate_contract(
            d.admin.clone(),
            d.messenger_l2.clone(),
            &MigrateMsg {
                legacy_relayed: vec![hash.clone()],
            },
            code_id,
        )
        .unwrap();

    let imported: LegacyRelayedResponse = d
        .app
        .wrap()
        .query_wasm_smart(&d.messenger_l2, &QueryMsg::LegacyRelayed { hash })
        .unwrap();
    assert!(imported.relayed);

    let res = forward_from_l1(&mut d, &legacy, ample_gas(), 0);
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("has already been relayed"));
    assert_eq!(receiver_state(&d).pings, 0);

    // the legacy table only covers version 0
    let current = crafted(&d, 4, 1, 0);
    forward_from_l1(&mut d, &current, ample_gas(), 0).unwrap();
    assert_eq!(receiver_state(&d).pings, 1);
}

#[test]
fn test_migrate_rejects_malformed_hash() {
    let mut d = setup();
    let code_id = d.app.contract_data(&d.messenger_l2).unwrap().code_id;
    let res = d.app.migrate_contract(
        d.admin.clone(),
        d.messenger_l2.clone(),
        &MigrateMsg {
            legacy_relayed: vec![Binary::from(vec![1u8; 31])],
        },
        code_id,
    );
    assert!(res
        .unwrap_err()
        .root_cause()
        .to_string()
        .contains("Invalid hash length"));
}
