//! Demo wallet.
//!
//! Stands in for a browser extension when the dashboard runs in explicit
//! demo mode. Sessions it produces are always flagged as demo sessions.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::chain::ChainInfo;
use crate::error::WalletResult;
use crate::extension::{AccountData, AminoSignResponse, StdSignDoc, StdSignature, WalletExtension};

/// Account exposed by the demo wallet.
pub const DEMO_ADDRESS: &str = "sei1abc123def456ghi789jkl012mno345pqr678stu901";

#[derive(Debug, Clone, Default)]
pub struct DemoWallet;

impl DemoWallet {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WalletExtension for DemoWallet {
    async fn suggest_chain(&self, _info: ChainInfo) -> WalletResult<()> {
        Ok(())
    }

    async fn enable(&self, _chain_id: &str) -> WalletResult<()> {
        Ok(())
    }

    async fn accounts(&self, _chain_id: &str) -> WalletResult<Vec<AccountData>> {
        Ok(vec![AccountData {
            address: DEMO_ADDRESS.to_string(),
            algo: "secp256k1".to_string(),
            pubkey: String::new(),
        }])
    }

    async fn sign_amino(
        &self,
        _chain_id: &str,
        signer: &str,
        doc: StdSignDoc,
    ) -> WalletResult<AminoSignResponse> {
        // Deterministic placeholder; not a real signature.
        let mut hasher = DefaultHasher::new();
        signer.hash(&mut hasher);
        serde_json::to_string(&doc)
            .unwrap_or_default()
            .hash(&mut hasher);

        Ok(AminoSignResponse {
            signature: StdSignature {
                pub_key: String::new(),
                signature: format!("demo-{:016x}", hasher.finish()),
            },
            signed: doc,
        })
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}
