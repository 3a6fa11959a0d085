//! # Typed Calls & Transaction Batches
//!
//! A closed, enumerated set of protocol write entrypoints and the ordered
//! call batches the client submits as single atomic multicalls.
//!
//! Dispatch by entrypoint name is deliberately absent: each entrypoint is a
//! [`ContractCall`] variant carrying its own typed argument tuple, so an
//! encoding mistake is a compile error instead of a reverted transaction.
//!
//! ## Ordering Invariants
//!
//! Call order inside a batch encodes required execution order:
//! - an `approve` must precede the call that spends the allowance;
//! - an oracle `set_rate`, when included, must precede the call that reads
//!   the rate.
//!
//! The batch constructors below are the only way this crate produces
//! multi-call batches, so the invariants hold by construction. Atomicity
//! (all-or-nothing application) is delegated to the chain's multicall
//! semantics; this layer is responsible for ordering and encoding only.

use primitive_types::U256;
use serde::Serialize;
use tracing::debug;

use crate::address::Address;
use crate::u256::WireU256;

/// Which leg of the rate swap the taker holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwapSide {
    Fixed,
    Floating,
}

impl SwapSide {
    /// Contract-level enum discriminant: `Fixed => "0"`, `Floating => "1"`.
    ///
    /// Fixed by the protocol ABI. Never inferred dynamically.
    pub fn discriminant(&self) -> &'static str {
        match self {
            SwapSide::Fixed => "0",
            SwapSide::Floating => "1",
        }
    }
}

/// A timestamp read from the chain's own clock (latest observed block).
///
/// Calldata timestamps must come from here, never from the caller's wall
/// clock, so they stay consistent with the contract's time representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTimestamp(u64);

impl BlockTimestamp {
    /// Wrap a block timestamp, in seconds, as read from the chain.
    pub fn from_block(seconds: u64) -> Self {
        Self(seconds)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

/// A user's configured swap, consumed by [`TransactionBatch::open_swap`].
///
/// Amounts are integer base units; the decimal scaling happened at the
/// input boundary.
#[derive(Debug, Clone)]
pub struct SwapIntent {
    pub pair_id: String,
    pub side: SwapSide,
    /// Notional exposure in base units.
    pub notional: U256,
    /// Collateral backing the position, in base units.
    pub collateral: U256,
    /// Maximum acceptable rate in basis points (slippage bound).
    pub max_rate_bps: u64,
}

/// An oracle tick to prepend when the on-chain rate is stale.
#[derive(Debug, Clone, Copy)]
pub struct OracleRefresh {
    pub oracle: Address,
    /// Rate to publish, in basis points.
    pub rate_bps: u64,
    /// Chain timestamp of the tick.
    pub at: BlockTimestamp,
}

/// One element of a multicall: target contract, entrypoint, raw calldata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub to: Address,
    pub entrypoint: &'static str,
    pub calldata: Vec<String>,
}

/// The closed set of write entrypoints the client can invoke.
#[derive(Debug, Clone)]
pub enum ContractCall {
    /// ERC-20 `approve(spender, amount)`.
    Approve {
        token: Address,
        spender: Address,
        amount: WireU256,
    },
    /// ERC-20 `mint(recipient, amount)` — test/faucet token only.
    Mint {
        token: Address,
        recipient: Address,
        amount: WireU256,
    },
    /// Protocol `supply_lp_collateral(pair, amount)`.
    SupplyLpCollateral {
        protocol: Address,
        pair_id: String,
        amount: WireU256,
    },
    /// Protocol `buy_swap(pair, side, notional, collateral, max_rate)`.
    BuySwap {
        protocol: Address,
        pair_id: String,
        side: SwapSide,
        notional: WireU256,
        collateral: WireU256,
        max_rate: WireU256,
    },
    /// Oracle `set_rate(rate, timestamp)`.
    SetRate {
        oracle: Address,
        rate: WireU256,
        at: BlockTimestamp,
    },
}

impl ContractCall {
    pub fn entrypoint(&self) -> &'static str {
        match self {
            ContractCall::Approve { .. } => "approve",
            ContractCall::Mint { .. } => "mint",
            ContractCall::SupplyLpCollateral { .. } => "supply_lp_collateral",
            ContractCall::BuySwap { .. } => "buy_swap",
            ContractCall::SetRate { .. } => "set_rate",
        }
    }

    /// Encode into a wire [`Call`]. Every `u256` argument contributes its
    /// two limbs low-then-high; addresses are hex fields.
    pub fn encode(&self) -> Call {
        match self {
            ContractCall::Approve { token, spender, amount } => Call {
                to: *token,
                entrypoint: self.entrypoint(),
                calldata: with_amounts(vec![spender.to_hex()], &[*amount]),
            },
            ContractCall::Mint { token, recipient, amount } => Call {
                to: *token,
                entrypoint: self.entrypoint(),
                calldata: with_amounts(vec![recipient.to_hex()], &[*amount]),
            },
            ContractCall::SupplyLpCollateral { protocol, pair_id, amount } => Call {
                to: *protocol,
                entrypoint: self.entrypoint(),
                calldata: with_amounts(vec![pair_id.clone()], &[*amount]),
            },
            ContractCall::BuySwap {
                protocol,
                pair_id,
                side,
                notional,
                collateral,
                max_rate,
            } => Call {
                to: *protocol,
                entrypoint: self.entrypoint(),
                calldata: with_amounts(
                    vec![pair_id.clone(), side.discriminant().to_string()],
                    &[*notional, *collateral, *max_rate],
                ),
            },
            ContractCall::SetRate { oracle, rate, at } => {
                let mut calldata = with_amounts(Vec::new(), &[*rate]);
                calldata.push(at.as_secs().to_string());
                Call {
                    to: *oracle,
                    entrypoint: self.entrypoint(),
                    calldata,
                }
            }
        }
    }
}

fn with_amounts(mut calldata: Vec<String>, amounts: &[WireU256]) -> Vec<String> {
    for amount in amounts {
        let [low, high] = amount.to_calldata();
        calldata.push(low);
        calldata.push(high);
    }
    calldata
}

/// An ordered call sequence submitted as one indivisible multicall.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionBatch {
    calls: Vec<Call>,
}

impl TransactionBatch {
    /// Supply LP collateral: `[approve, supply_lp_collateral]`.
    pub fn supply_liquidity(
        token: Address,
        protocol: Address,
        pair_id: &str,
        amount: U256,
    ) -> Self {
        let amount = WireU256::from_u256(amount);
        Self::from_calls(&[
            ContractCall::Approve { token, spender: protocol, amount },
            ContractCall::SupplyLpCollateral {
                protocol,
                pair_id: pair_id.to_string(),
                amount,
            },
        ])
    }

    /// Open a swap position: optional `set_rate`, then `approve`, then
    /// `buy_swap`. The refresh is included only when the caller observed a
    /// stale oracle.
    pub fn open_swap(
        token: Address,
        protocol: Address,
        intent: &SwapIntent,
        refresh: Option<OracleRefresh>,
    ) -> Self {
        let collateral = WireU256::from_u256(intent.collateral);
        let mut calls = Vec::with_capacity(3);

        if let Some(refresh) = refresh {
            calls.push(ContractCall::SetRate {
                oracle: refresh.oracle,
                rate: WireU256::from_u256(U256::from(refresh.rate_bps)),
                at: refresh.at,
            });
        }
        calls.push(ContractCall::Approve {
            token,
            spender: protocol,
            amount: collateral,
        });
        calls.push(ContractCall::BuySwap {
            protocol,
            pair_id: intent.pair_id.clone(),
            side: intent.side,
            notional: WireU256::from_u256(intent.notional),
            collateral,
            max_rate: WireU256::from_u256(U256::from(intent.max_rate_bps)),
        });

        Self::from_calls(&calls)
    }

    /// Faucet mint on the mock collateral token. Single call.
    pub fn mint_mock_token(token: Address, recipient: Address, amount: U256) -> Self {
        Self::from_calls(&[ContractCall::Mint {
            token,
            recipient,
            amount: WireU256::from_u256(amount),
        }])
    }

    fn from_calls(calls: &[ContractCall]) -> Self {
        let encoded: Vec<Call> = calls.iter().map(ContractCall::encode).collect();
        debug!(
            call_count = encoded.len(),
            entrypoints = ?encoded.iter().map(|c| c.entrypoint).collect::<Vec<_>>(),
            "Encoded transaction batch"
        );
        Self { calls: encoded }
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::parse(s).unwrap()
    }

    #[test]
    fn test_side_discriminants_are_fixed() {
        assert_eq!(SwapSide::Fixed.discriminant(), "0");
        assert_eq!(SwapSide::Floating.discriminant(), "1");
    }

    #[test]
    fn test_supply_liquidity_batch_shape() {
        let token = addr("0x7");
        let protocol = addr("0x9");
        let batch =
            TransactionBatch::supply_liquidity(token, protocol, "1", U256::from(50_000_000u64));

        let calls = batch.calls();
        assert_eq!(calls.len(), 2);

        assert_eq!(calls[0].to, token);
        assert_eq!(calls[0].entrypoint, "approve");
        assert_eq!(calls[0].calldata, vec!["0x9", "50000000", "0"]);

        assert_eq!(calls[1].to, protocol);
        assert_eq!(calls[1].entrypoint, "supply_lp_collateral");
        assert_eq!(calls[1].calldata, vec!["1", "50000000", "0"]);
    }

    fn intent() -> SwapIntent {
        SwapIntent {
            pair_id: "1".to_string(),
            side: SwapSide::Floating,
            notional: U256::from(4_000_000_000u64),
            collateral: U256::from(1_000_000_000u64),
            max_rate_bps: 900,
        }
    }

    #[test]
    fn test_open_swap_without_refresh() {
        let batch = TransactionBatch::open_swap(addr("0x7"), addr("0x9"), &intent(), None);
        let entrypoints: Vec<_> = batch.calls().iter().map(|c| c.entrypoint).collect();
        assert_eq!(entrypoints, ["approve", "buy_swap"]);
    }

    #[test]
    fn test_open_swap_ordering_with_refresh() {
        let refresh = OracleRefresh {
            oracle: addr("0x5"),
            rate_bps: 500,
            at: BlockTimestamp::from_block(1_700_000_000),
        };
        let batch = TransactionBatch::open_swap(addr("0x7"), addr("0x9"), &intent(), Some(refresh));

        let entrypoints: Vec<_> = batch.calls().iter().map(|c| c.entrypoint).collect();
        assert_eq!(entrypoints, ["set_rate", "approve", "buy_swap"]);

        // set_rate carries the u256 rate limbs then the chain timestamp
        assert_eq!(batch.calls()[0].calldata, vec!["500", "0", "1700000000"]);
    }

    #[test]
    fn test_buy_swap_calldata_layout() {
        let batch = TransactionBatch::open_swap(addr("0x7"), addr("0x9"), &intent(), None);
        let buy = &batch.calls()[1];
        assert_eq!(
            buy.calldata,
            vec!["1", "1", "4000000000", "0", "1000000000", "0", "900", "0"]
        );
    }

    #[test]
    fn test_approve_always_precedes_spender_call() {
        for refresh in [
            None,
            Some(OracleRefresh {
                oracle: addr("0x5"),
                rate_bps: 500,
                at: BlockTimestamp::from_block(1),
            }),
        ] {
            let batch = TransactionBatch::open_swap(addr("0x7"), addr("0x9"), &intent(), refresh);
            let pos = |name| {
                batch
                    .calls()
                    .iter()
                    .position(|c| c.entrypoint == name)
                    .unwrap()
            };
            assert!(pos("approve") < pos("buy_swap"));
        }
    }

    #[test]
    fn test_mint_batch_is_single_call() {
        let batch =
            TransactionBatch::mint_mock_token(addr("0x7"), addr("0x3"), U256::from(10_000u64));
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.calls()[0].entrypoint, "mint");
        assert_eq!(batch.calls()[0].calldata, vec!["0x3", "10000", "0"]);
    }
}
