//! Bridge events.
//!
//! Every transfer emits `<class>_bridge_initiated` on the sending side and
//! `<class>_bridge_finalized` on the receiving side. Deployments that must
//! keep older indexers working also emit the legacy deposit/withdrawal pair
//! selected by [`LegacyEventStyle`].

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Event, Uint128};

/// Which legacy events a deployment emits.
#[cw_serde]
#[derive(Copy)]
pub enum LegacyEventStyle {
    /// Outbound transfers are deposits: `*_deposit_initiated` /
    /// `*_withdrawal_finalized`
    Deposit,
    /// Outbound transfers are withdrawals: `*_withdrawal_initiated` /
    /// `*_deposit_finalized`
    Withdrawal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetClass {
    Native,
    Token,
    NativeAsset,
}

impl AssetClass {
    fn prefix(self) -> &'static str {
        match self {
            AssetClass::Native => "native",
            AssetClass::Token => "token",
            AssetClass::NativeAsset => "native_asset",
        }
    }
}

/// One transfer as reported in events.
pub struct BridgeTransfer<'a> {
    /// Token on the emitting side (absent for native coin)
    pub local_token: Option<&'a str>,
    pub remote_token: Option<&'a str>,
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Uint128,
    pub extra_data: &'a Binary,
}

impl BridgeTransfer<'_> {
    fn event(&self, name: String) -> Event {
        let mut event = Event::new(name);
        if let Some(local_token) = self.local_token {
            event = event.add_attribute("local_token", local_token);
        }
        if let Some(remote_token) = self.remote_token {
            event = event.add_attribute("remote_token", remote_token);
        }
        event
            .add_attribute("from", self.from)
            .add_attribute("to", self.to)
            .add_attribute("amount", self.amount)
            .add_attribute("extra_data", self.extra_data.to_base64())
    }
}

pub fn initiated(
    class: AssetClass,
    style: Option<LegacyEventStyle>,
    transfer: &BridgeTransfer,
) -> Vec<Event> {
    let prefix = class.prefix();
    let mut events = vec![transfer.event(format!("{}_bridge_initiated", prefix))];
    match style {
        Some(LegacyEventStyle::Deposit) => {
            events.push(transfer.event(format!("{}_deposit_initiated", prefix)))
        }
        Some(LegacyEventStyle::Withdrawal) => {
            events.push(transfer.event(format!("{}_withdrawal_initiated", prefix)))
        }
        None => {}
    }
    events
}

pub fn finalized(
    class: AssetClass,
    style: Option<LegacyEventStyle>,
    transfer: &BridgeTransfer,
) -> Vec<Event> {
    let prefix = class.prefix();
    let mut events = vec![transfer.event(format!("{}_bridge_finalized", prefix))];
    match style {
        Some(LegacyEventStyle::Deposit) => {
            events.push(transfer.event(format!("{}_withdrawal_finalized", prefix)))
        }
        Some(LegacyEventStyle::Withdrawal) => {
            events.push(transfer.event(format!("{}_deposit_finalized", prefix)))
        }
        None => {}
    }
    events
}
