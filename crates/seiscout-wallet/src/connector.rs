//! Wallet connection and copy-trade signing.

use std::sync::Arc;

use rust_decimal::Decimal;
use seiscout_core::Address;
use seiscout_telemetry::Metrics;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::chain::ChainConfig;
use crate::coin::Coin;
use crate::demo::DemoWallet;
use crate::error::{WalletError, WalletResult};
use crate::extension::{AminoMsg, StdFee, StdSignDoc, StdSignature, WalletExtension};

/// Fee attached to copy trades, in the fee denom's minimal unit.
pub const COPY_TRADE_FEE: u128 = 5_000;
pub const COPY_TRADE_GAS: u64 = 200_000;

const MSG_SEND: &str = "cosmos-sdk/MsgSend";

/// A connected wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: String,
    pub chain_id: String,
    pub wallet: String,
    /// Produced by the demo wallet, not a real extension.
    pub demo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyTradeRequest {
    /// Human-readable action, e.g. "Stake 5000 SEI".
    pub action: String,
    /// Recipient of the transfer.
    pub to_address: String,
    /// Amount in display units of the stake currency.
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedCopyTrade {
    pub action: String,
    pub signer: String,
    pub sign_doc: StdSignDoc,
    pub signature: StdSignature,
    pub demo: bool,
}

/// Connects to the wallet extension and signs copy trades.
pub struct WalletConnector {
    extension: Option<Arc<dyn WalletExtension>>,
    chain: ChainConfig,
    demo_mode: bool,
}

impl WalletConnector {
    /// Connector for a real extension, or none if the extension is absent.
    pub fn new(extension: Option<Arc<dyn WalletExtension>>, chain: ChainConfig) -> Self {
        Self {
            extension,
            chain,
            demo_mode: false,
        }
    }

    /// Connector backed by `DemoWallet`.
    pub fn demo(chain: ChainConfig) -> Self {
        Self {
            extension: Some(Arc::new(DemoWallet::new())),
            chain,
            demo_mode: true,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.demo_mode
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    fn extension(&self) -> WalletResult<&Arc<dyn WalletExtension>> {
        self.extension.as_ref().ok_or(WalletError::ExtensionNotFound)
    }

    /// Connect and return the first account.
    pub async fn connect(&self) -> WalletResult<WalletSession> {
        let result = self.try_connect().await;
        match &result {
            Ok(session) => {
                Metrics::wallet_connect(if session.demo { "demo" } else { "connected" });
                info!(
                    address = %session.address,
                    chain_id = %session.chain_id,
                    wallet = %session.wallet,
                    demo = session.demo,
                    "Wallet connected"
                );
            }
            Err(e) => {
                Metrics::wallet_connect(e.outcome());
                warn!(error = %e, "Wallet connection failed");
            }
        }
        result
    }

    async fn try_connect(&self) -> WalletResult<WalletSession> {
        let extension = self.extension()?;
        let chain_id = self.chain.effective_chain_id();

        if let Some(info) = self.chain.chain_info() {
            extension.suggest_chain(info).await?;
        }
        extension.enable(chain_id).await?;

        let account = extension
            .accounts(chain_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::NoAccounts(chain_id.to_string()))?;

        Ok(WalletSession {
            address: account.address,
            chain_id: chain_id.to_string(),
            wallet: extension.name().to_string(),
            demo: self.demo_mode,
        })
    }

    /// Build the sign doc for a copy trade.
    pub fn copy_trade_doc(
        &self,
        session: &WalletSession,
        request: &CopyTradeRequest,
    ) -> WalletResult<StdSignDoc> {
        let to = Address::parse(&request.to_address)
            .map_err(|e| WalletError::InvalidAddress(e.to_string()))?;
        let denom = self.chain.fee_denom();
        let amount = Coin::from_display(request.amount, denom, self.chain.coin_decimals)?;

        Ok(StdSignDoc {
            chain_id: session.chain_id.clone(),
            account_number: "0".to_string(),
            sequence: "0".to_string(),
            fee: StdFee {
                amount: vec![Coin::new(denom, COPY_TRADE_FEE)],
                gas: COPY_TRADE_GAS.to_string(),
            },
            msgs: vec![AminoMsg {
                type_url: MSG_SEND.to_string(),
                value: json!({
                    "from_address": session.address,
                    "to_address": to.as_str(),
                    "amount": [amount],
                }),
            }],
            memo: format!("Copy trade: {}", request.action),
        })
    }

    /// Sign a copy trade for `session`. Errors from the extension surface
    /// unchanged.
    pub async fn copy_trade(
        &self,
        session: &WalletSession,
        request: CopyTradeRequest,
    ) -> WalletResult<SignedCopyTrade> {
        let extension = self.extension()?;
        let doc = self.copy_trade_doc(session, &request)?;

        let response = extension
            .sign_amino(&session.chain_id, &session.address, doc)
            .await
            .map_err(|e| {
                warn!(error = %e, action = %request.action, "Copy trade signing failed");
                e
            })?;

        info!(
            action = %request.action,
            signer = %session.address,
            demo = session.demo,
            "Copy trade signed"
        );
        Ok(SignedCopyTrade {
            action: request.action,
            signer: session.address.clone(),
            sign_doc: response.signed,
            signature: response.signature,
            demo: session.demo,
        })
    }

    pub fn disconnect(&self, session: WalletSession) {
        info!(address = %session.address, "Wallet disconnected");
    }
}

impl std::fmt::Debug for WalletConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConnector")
            .field("extension", &self.extension.as_ref().map(|e| e.name()))
            .field("demo_mode", &self.demo_mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::env;
    use crate::demo::DEMO_ADDRESS;
    use crate::extension::{AccountData, AminoSignResponse, MockWalletExtension};
    use rust_decimal_macros::dec;
    use tokio_test::assert_ok;

    fn account(address: &str) -> AccountData {
        AccountData {
            address: address.to_string(),
            algo: "secp256k1".to_string(),
            pubkey: "A1B2".to_string(),
        }
    }

    fn request() -> CopyTradeRequest {
        CopyTradeRequest {
            action: "Stake 5000 SEI".to_string(),
            to_address: "sei1destinationaddress".to_string(),
            amount: dec!(1),
        }
    }

    fn connector(mock: MockWalletExtension) -> WalletConnector {
        WalletConnector::new(Some(Arc::new(mock)), ChainConfig::default())
    }

    #[tokio::test]
    async fn test_missing_extension_is_an_error() {
        let connector = WalletConnector::new(None, ChainConfig::default());
        assert_eq!(connector.connect().await, Err(WalletError::ExtensionNotFound));
    }

    #[tokio::test]
    async fn test_connect_returns_first_account() {
        let mut mock = MockWalletExtension::new();
        mock.expect_suggest_chain().never();
        mock.expect_enable()
            .withf(|chain_id| chain_id.to_string() == "pacific-1")
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_accounts()
            .returning(|_| Ok(vec![account("sei1first"), account("sei1second")]));
        mock.expect_name().return_const("mock");

        let session = connector(mock).connect().await.unwrap();
        assert_eq!(session.address, "sei1first");
        assert_eq!(session.chain_id, "pacific-1");
        assert!(!session.demo);
    }

    #[tokio::test]
    async fn test_enable_failure_propagates() {
        let mut mock = MockWalletExtension::new();
        mock.expect_enable()
            .returning(|_| Err(WalletError::Rejected("user closed popup".to_string())));
        mock.expect_accounts().never();

        let err = connector(mock).connect().await.unwrap_err();
        assert_eq!(err, WalletError::Rejected("user closed popup".to_string()));
        assert_eq!(
            format!("wallet connection failed: {err}"),
            "wallet connection failed: request rejected by user: user closed popup"
        );
    }

    #[tokio::test]
    async fn test_no_accounts_is_an_error() {
        let mut mock = MockWalletExtension::new();
        mock.expect_enable().returning(|_| Ok(()));
        mock.expect_accounts().returning(|_| Ok(vec![]));

        let err = connector(mock).connect().await.unwrap_err();
        assert_eq!(err, WalletError::NoAccounts("pacific-1".to_string()));
    }

    #[tokio::test]
    async fn test_suggests_chain_when_configured() {
        let chain = ChainConfig::from_lookup(|key| {
            let v = match key {
                env::CHAIN_ID => "atlantic-2",
                env::CHAIN_NAME => "Sei Testnet",
                env::RPC_ENDPOINT => "https://rpc.example",
                env::REST_ENDPOINT => "https://rest.example",
                env::STAKE_CURRENCY => "usei",
                env::STAKE_SYMBOL => "SEI",
                _ => return None,
            };
            Some(v.to_string())
        });

        let mut mock = MockWalletExtension::new();
        mock.expect_suggest_chain()
            .withf(|info| info.chain_id == "atlantic-2")
            .times(1)
            .returning(|_| Ok(()));
        mock.expect_enable()
            .withf(|chain_id| chain_id.to_string() == "atlantic-2")
            .returning(|_| Ok(()));
        mock.expect_accounts()
            .returning(|_| Ok(vec![account("sei1user")]));
        mock.expect_name().return_const("mock");

        let connector = WalletConnector::new(Some(Arc::new(mock)), chain);
        let session = connector.connect().await.unwrap();
        assert_eq!(session.chain_id, "atlantic-2");
    }

    #[tokio::test]
    async fn test_copy_trade_builds_expected_sign_doc() {
        let mut mock = MockWalletExtension::new();
        mock.expect_sign_amino()
            .withf(|chain_id, signer, _| {
                chain_id.to_string() == "pacific-1" && signer.to_string() == "sei1user"
            })
            .times(1)
            .returning(|_, _, doc| {
                Ok(AminoSignResponse {
                    signed: doc,
                    signature: StdSignature {
                        pub_key: "pk".to_string(),
                        signature: "sig".to_string(),
                    },
                })
            });

        let connector = connector(mock);
        let session = WalletSession {
            address: "sei1user".to_string(),
            chain_id: "pacific-1".to_string(),
            wallet: "mock".to_string(),
            demo: false,
        };
        let signed = connector.copy_trade(&session, request()).await.unwrap();

        let doc = &signed.sign_doc;
        assert_eq!(doc.memo, "Copy trade: Stake 5000 SEI");
        assert_eq!(doc.fee.gas, "200000");
        assert_eq!(doc.fee.amount, vec![Coin::new("usei", 5_000)]);
        assert_eq!(doc.msgs[0].type_url, "cosmos-sdk/MsgSend");
        assert_eq!(doc.msgs[0].value["amount"][0]["amount"], "1000000");
        assert_eq!(doc.msgs[0].value["to_address"], "sei1destinationaddress");
        assert_eq!(signed.signature.signature, "sig");
        assert!(!signed.demo);
    }

    #[tokio::test]
    async fn test_signing_error_surfaces() {
        let mut mock = MockWalletExtension::new();
        mock.expect_sign_amino()
            .returning(|_, _, _| Err(WalletError::Extension("ledger locked".to_string())));

        let session = WalletSession {
            address: "sei1user".to_string(),
            chain_id: "pacific-1".to_string(),
            wallet: "mock".to_string(),
            demo: false,
        };
        let err = connector(mock)
            .copy_trade(&session, request())
            .await
            .unwrap_err();
        assert_eq!(err, WalletError::Extension("ledger locked".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_destination_rejected_before_signing() {
        let mut mock = MockWalletExtension::new();
        mock.expect_sign_amino().never();

        let session = WalletSession {
            address: "sei1user".to_string(),
            chain_id: "pacific-1".to_string(),
            wallet: "mock".to_string(),
            demo: false,
        };
        let mut bad = request();
        bad.to_address = "not an address!".to_string();
        let err = connector(mock).copy_trade(&session, bad).await.unwrap_err();
        assert!(matches!(err, WalletError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_demo_mode_is_explicit() {
        let connector = WalletConnector::demo(ChainConfig::default());
        assert!(connector.is_demo());

        let session = assert_ok!(connector.connect().await);
        assert!(session.demo);
        assert_eq!(session.address, DEMO_ADDRESS);

        let signed = assert_ok!(connector.copy_trade(&session, request()).await);
        assert!(signed.demo);
        assert!(signed.signature.signature.starts_with("demo-"));
        connector.disconnect(session);
    }
}
