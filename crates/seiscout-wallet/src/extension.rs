//! Wallet extension abstraction.
//!
//! Mirrors the subset of the browser wallet API the dashboard needs: chain
//! suggestion, enabling, account listing and amino signing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chain::ChainInfo;
use crate::coin::Coin;
use crate::error::WalletResult;

/// An account exposed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub address: String,
    pub algo: String,
    /// Base64 public key.
    pub pubkey: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

/// Amino-encoded message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoMsg {
    #[serde(rename = "type")]
    pub type_url: String,
    pub value: serde_json::Value,
}

/// Document presented to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub chain_id: String,
    pub account_number: String,
    pub sequence: String,
    pub fee: StdFee,
    pub msgs: Vec<AminoMsg>,
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoSignResponse {
    /// The document as signed, possibly adjusted by the wallet.
    pub signed: StdSignDoc,
    pub signature: StdSignature,
}

/// A browser wallet extension.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// Register a chain the wallet may not know yet.
    async fn suggest_chain(&self, info: ChainInfo) -> WalletResult<()>;

    /// Ask the user to grant access to `chain_id`.
    async fn enable(&self, chain_id: &str) -> WalletResult<()>;

    async fn accounts(&self, chain_id: &str) -> WalletResult<Vec<AccountData>>;

    async fn sign_amino(
        &self,
        chain_id: &str,
        signer: &str,
        doc: StdSignDoc,
    ) -> WalletResult<AminoSignResponse>;

    /// Name shown in logs.
    fn name(&self) -> &'static str;
}
