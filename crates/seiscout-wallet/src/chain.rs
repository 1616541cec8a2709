//! Target chain description.
//!
//! Options come from the environment. All are optional; when any of the
//! string options is missing, chain registration is skipped.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chain id used when none is configured.
pub const DEFAULT_CHAIN_ID: &str = "pacific-1";

/// BIP-44 coin type of Cosmos SDK chains.
pub const COIN_TYPE: u32 = 118;

const DEFAULT_COIN_DECIMALS: u8 = 6;

/// Environment variable names.
pub mod env {
    pub const CHAIN_ID: &str = "SEISCOUT_CHAIN_ID";
    pub const CHAIN_NAME: &str = "SEISCOUT_CHAIN_NAME";
    pub const RPC_ENDPOINT: &str = "SEISCOUT_RPC_ENDPOINT";
    pub const REST_ENDPOINT: &str = "SEISCOUT_REST_ENDPOINT";
    pub const STAKE_CURRENCY: &str = "SEISCOUT_STAKE_CURRENCY";
    pub const STAKE_SYMBOL: &str = "SEISCOUT_STAKE_SYMBOL";
    pub const COIN_DECIMALS: &str = "SEISCOUT_COIN_DECIMALS";
}

/// Raw chain options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: Option<String>,
    pub chain_name: Option<String>,
    pub rpc_endpoint: Option<String>,
    pub rest_endpoint: Option<String>,
    /// Minimal denom, e.g. `usei`.
    pub stake_currency: Option<String>,
    /// Display denom, e.g. `SEI`.
    pub stake_symbol: Option<String>,
    pub coin_decimals: u8,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: None,
            chain_name: None,
            rpc_endpoint: None,
            rest_endpoint: None,
            stake_currency: None,
            stake_symbol: None,
            coin_decimals: DEFAULT_COIN_DECIMALS,
        }
    }
}

impl ChainConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// Empty values count as missing. Unparsable or zero decimals fall back
    /// to 6.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let coin_decimals = get(env::COIN_DECIMALS)
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_COIN_DECIMALS);

        Self {
            chain_id: get(env::CHAIN_ID),
            chain_name: get(env::CHAIN_NAME),
            rpc_endpoint: get(env::RPC_ENDPOINT),
            rest_endpoint: get(env::REST_ENDPOINT),
            stake_currency: get(env::STAKE_CURRENCY),
            stake_symbol: get(env::STAKE_SYMBOL),
            coin_decimals,
        }
    }

    /// Chain id to enable, configured or default.
    pub fn effective_chain_id(&self) -> &str {
        self.chain_id.as_deref().unwrap_or(DEFAULT_CHAIN_ID)
    }

    /// Minimal fee denom, configured or `usei`.
    pub fn fee_denom(&self) -> &str {
        self.stake_currency.as_deref().unwrap_or("usei")
    }

    /// Full chain description, if every option is present.
    pub fn chain_info(&self) -> Option<ChainInfo> {
        let (
            Some(chain_id),
            Some(chain_name),
            Some(rpc),
            Some(rest),
            Some(minimal_denom),
            Some(symbol),
        ) = (
            &self.chain_id,
            &self.chain_name,
            &self.rpc_endpoint,
            &self.rest_endpoint,
            &self.stake_currency,
            &self.stake_symbol,
        )
        else {
            debug!("Chain options incomplete, skipping chain registration");
            return None;
        };
        if self.coin_decimals == 0 {
            return None;
        }

        let currency = Currency {
            coin_denom: symbol.clone(),
            coin_minimal_denom: minimal_denom.clone(),
            coin_decimals: self.coin_decimals,
        };
        Some(ChainInfo {
            chain_id: chain_id.clone(),
            chain_name: chain_name.clone(),
            rpc: rpc.clone(),
            rest: rest.clone(),
            stake_currency: currency.clone(),
            bip44: Bip44 {
                coin_type: COIN_TYPE,
            },
            bech32_config: Bech32Config::sei(),
            currencies: vec![currency.clone()],
            fee_currencies: vec![currency],
            coin_type: COIN_TYPE,
            gas_price_step: GasPriceStep::flat(0.1),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    pub fn sei() -> Self {
        Self {
            bech32_prefix_acc_addr: "sei".to_string(),
            bech32_prefix_acc_pub: "seipub".to_string(),
            bech32_prefix_val_addr: "seivaloper".to_string(),
            bech32_prefix_val_pub: "seivaloperpub".to_string(),
            bech32_prefix_cons_addr: "seivalcons".to_string(),
            bech32_prefix_cons_pub: "seivalconspub".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

impl GasPriceStep {
    pub fn flat(price: f64) -> Self {
        Self {
            low: price,
            average: price,
            high: price,
        }
    }
}

/// Chain registration payload for the wallet extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc: String,
    pub rest: String,
    pub stake_currency: Currency,
    pub bip44: Bip44,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub fee_currencies: Vec<Currency>,
    pub coin_type: u32,
    pub gas_price_step: GasPriceStep,
}
