use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};
use cw20::{Cw20Coin, Expiration};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Bridge contract; becomes the sole minter
    pub bridge: String,
    /// Token on the other domain this token represents
    pub remote_token: String,
    #[serde(default)]
    pub initial_balances: Vec<Cw20Coin>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Bridge only: mint `amount` to `recipient`
    BridgeMint { recipient: String, amount: Uint128 },
    /// Bridge only: burn `amount` from `owner` without an allowance
    BridgeBurn { owner: String, amount: Uint128 },

    // Standard CW20 operations
    Transfer {
        recipient: String,
        amount: Uint128,
    },
    Burn {
        amount: Uint128,
    },
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    DecreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    SendFrom {
        owner: String,
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    BurnFrom {
        owner: String,
        amount: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Marks the token as bridge-controlled
    #[returns(common::wrapped_token::BridgeInfoResponse)]
    BridgeInfo {},

    #[returns(cw20::BalanceResponse)]
    Balance { address: String },

    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},

    #[returns(cw20::MinterResponse)]
    Minter {},

    #[returns(cw20::AllowanceResponse)]
    Allowance { owner: String, spender: String },

    #[returns(cw20::AllAccountsResponse)]
    AllAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}
