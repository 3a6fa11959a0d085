//! # Token Endpoints
//!
//! ERC-20 balance and decimals queries against the market's collateral
//! token.

use lib_chain::{Address, WireU256};
use shared::dto::trade::TokenBalance;

use crate::core::error::Result;
use crate::services::api::token_amount;
use crate::services::rpc::RpcClient;

/// Fetch an account's balance and the token's decimals, concurrently.
///
/// The raw balance stays exact in the result; the formatted value is for
/// display only.
#[tracing::instrument(skip(client), fields(token = %token, account = %account))]
pub async fn get_token_balance(
    client: &RpcClient,
    token: Address,
    account: Address,
) -> Result<TokenBalance> {
    let (balance, decimals) = tokio::try_join!(
        client.call_as::<WireU256>(token, "balance_of", vec![account.to_hex()]),
        client.call_as::<u8>(token, "decimals", vec![]),
    )?;

    Ok(TokenBalance {
        balance: token_amount(&balance, decimals),
        decimals,
    })
}
