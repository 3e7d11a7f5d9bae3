//! Helpers for moving deliveries between the two domains of a test app.
//!
//! Both domains live in the same `App`. Each domain has its own transport
//! instance; a message sent on one side sits in that transport's outbox until
//! a test forwards it through the transport of the other side.

use anyhow::Result as AnyResult;
use cosmwasm_std::{Addr, Binary, Coin};
use cw_multi_test::{App, AppResponse, BankSudo, Executor, SudoMsg};

use crate::transport::{Delivery, DeliveryCountResponse, ExecuteMsg, QueryMsg};

/// Account that submits forwarded deliveries.
pub const RELAYER: &str = "terra1relayer";

pub fn delivery_count(app: &App, transport: &Addr) -> u64 {
    let response: DeliveryCountResponse = app
        .wrap()
        .query_wasm_smart(transport, &QueryMsg::DeliveryCount {})
        .unwrap();
    response.count
}

pub fn delivery(app: &App, transport: &Addr, index: u64) -> Delivery {
    app.wrap()
        .query_wasm_smart(transport, &QueryMsg::Delivery { index })
        .unwrap()
}

pub fn last_delivery(app: &App, transport: &Addr) -> Delivery {
    let count = delivery_count(app, transport);
    assert!(count > 0, "transport {} has no deliveries", transport);
    delivery(app, transport, count - 1)
}

/// Forward `payload` to `target` through `transport`, reporting
/// `remote_sender` as its origin. `funds` are minted to the relayer first,
/// standing in for value released by the transport on arrival.
pub fn forward(
    app: &mut App,
    transport: &Addr,
    remote_sender: &str,
    target: &str,
    payload: Binary,
    funds: &[Coin],
) -> AnyResult<AppResponse> {
    if !funds.is_empty() {
        app.sudo(SudoMsg::Bank(BankSudo::Mint {
            to_address: RELAYER.to_string(),
            amount: funds.to_vec(),
        }))?;
    }
    app.execute_contract(
        Addr::unchecked(RELAYER),
        transport.clone(),
        &ExecuteMsg::Forward {
            remote_sender: remote_sender.to_string(),
            target: target.to_string(),
            payload,
        },
        funds,
    )
}

/// Carry outbox entry `index` of `from_transport` to the other domain
/// through `to_transport`, with the value it was sent with.
pub fn relay_delivery(
    app: &mut App,
    from_transport: &Addr,
    to_transport: &Addr,
    index: u64,
) -> AnyResult<AppResponse> {
    let delivery = delivery(app, from_transport, index);
    forward(
        app,
        to_transport,
        delivery.sender.as_str(),
        &delivery.target,
        delivery.payload,
        &delivery.value,
    )
}

/// Carry the newest outbox entry of `from_transport` to the other domain.
pub fn relay_last_delivery(
    app: &mut App,
    from_transport: &Addr,
    to_transport: &Addr,
) -> AnyResult<AppResponse> {
    let index = delivery_count(app, from_transport)
        .checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("transport {} has no deliveries", from_transport))?;
    relay_delivery(app, from_transport, to_transport, index)
}
