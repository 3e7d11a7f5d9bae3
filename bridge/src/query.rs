//! Query handlers for the bridge ledger.

use cosmwasm_std::{Deps, StdResult};

use common::AssetInfo;

use crate::ledger;
use crate::msg::{ConfigResponse, DepositsResponse};
use crate::probe::TokenRoute;
use crate::state::CONFIG;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        messenger: config.messenger,
        other_bridge: config.other_bridge,
        native_denom: config.native_denom,
        native_asset: config.native_asset,
        legacy_events: config.legacy_events,
        paused: config.paused,
    })
}

pub fn query_deposits(
    deps: Deps,
    local_token: String,
    remote_token: String,
) -> StdResult<DepositsResponse> {
    let amount = ledger::escrowed(deps.storage, &local_token, &remote_token)?;
    Ok(DepositsResponse {
        local_token,
        remote_token,
        amount,
    })
}

pub fn query_token_route(deps: Deps, token: AssetInfo, remote_token: String) -> TokenRoute {
    TokenRoute::probe(&deps.querier, &token, &remote_token)
}
