use {
    alloy::{
        consensus::SignableTransaction,
        network::{EthereumWallet, TxSigner},
        primitives::{Address, B256, Bytes, ChainId, Signature},
        providers::{DynProvider, Provider, ProviderBuilder},
        signers::{
            self, Signer,
            local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
        },
    },
    async_trait::async_trait,
    reqwest::{Certificate, Url, header::AUTHORIZATION},
    serde::{Deserialize, Serialize},
    std::env,
};

/// Environment variable holding the mnemonic of the standard deployer key.
pub const MNEMONIC_ENV: &str = "EVM_MNEMONIC";

/// Which key signs deployment transactions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignerConfig {
    /// A local key derived from the mnemonic in `EVM_MNEMONIC`.
    #[default]
    Standard,
    /// A remote cold-storage signer that holds the key on our behalf.
    ColdStorage(ColdStorageConfig),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColdStorageConfig {
    /// The address whose key the cold storage holds.
    pub address: Address,
    /// Host of the signing service, reached over HTTPS.
    pub domain: String,
    /// Value of the `Authorization` header sent with every request.
    pub authorization: String,
    /// PEM encoded certificate authority of the signing service, if it is not
    /// signed by a public root.
    #[serde(default)]
    pub ca: Option<String>,
}

#[derive(Serialize)]
struct SignRequest {
    address: Address,
    hash: B256,
}

#[derive(Deserialize)]
struct SignResponse {
    signature: Bytes,
}

/// Signs digests by asking the cold-storage service.
///
/// The service is expected to accept `POST https://<domain>/sign` with a JSON
/// body `{ "address", "hash" }` and to answer `{ "signature" }`, a 65 byte
/// `r ‖ s ‖ v` signature over the raw hash.
#[derive(Debug, Clone)]
pub struct ColdStorageSigner {
    address: Address,
    endpoint: Url,
    authorization: String,
    client: reqwest::Client,
    chain_id: Option<ChainId>,
}

impl ColdStorageSigner {
    pub fn new(config: &ColdStorageConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(ca) = &config.ca {
            builder = builder.add_root_certificate(Certificate::from_pem(ca.as_bytes())?);
        }

        Ok(Self {
            address: config.address,
            endpoint: Url::parse(&format!("https://{}/", config.domain))?.join("sign")?,
            authorization: config.authorization.clone(),
            client: builder.build()?,
            chain_id: None,
        })
    }

    async fn request_signature(&self, hash: &B256) -> signers::Result<Signature> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, &self.authorization)
            .json(&SignRequest {
                address: self.address,
                hash: *hash,
            })
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(signers::Error::other)?
            .json::<SignResponse>()
            .await
            .map_err(signers::Error::other)?;

        Signature::try_from(response.signature.as_ref()).map_err(signers::Error::other)
    }
}

#[async_trait]
impl Signer for ColdStorageSigner {
    async fn sign_hash(&self, hash: &B256) -> signers::Result<Signature> {
        self.request_signature(hash).await
    }

    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    fn set_chain_id(&mut self, chain_id: Option<ChainId>) {
        self.chain_id = chain_id;
    }
}

#[async_trait]
impl TxSigner<Signature> for ColdStorageSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_transaction(
        &self,
        tx: &mut dyn SignableTransaction<Signature>,
    ) -> signers::Result<Signature> {
        self.request_signature(&tx.signature_hash()).await
    }
}

#[derive(Debug, Clone)]
pub enum DeployerSigner {
    Local(PrivateKeySigner),
    ColdStorage(ColdStorageSigner),
}

impl DeployerSigner {
    pub fn from_config(config: &SignerConfig) -> anyhow::Result<Self> {
        match config {
            SignerConfig::Standard => {
                let mnemonic = env::var(MNEMONIC_ENV)?;
                let signer = MnemonicBuilder::<English>::default()
                    .phrase(&mnemonic)
                    .build()?;

                Ok(Self::Local(signer))
            },
            SignerConfig::ColdStorage(cold_storage) => {
                Ok(Self::ColdStorage(ColdStorageSigner::new(cold_storage)?))
            },
        }
    }

    pub fn address(&self) -> Address {
        match self {
            Self::Local(signer) => Signer::address(signer),
            Self::ColdStorage(signer) => signer.address,
        }
    }

    /// EIP-191 personal message signature.
    pub async fn sign_message(&self, message: &[u8]) -> signers::Result<Signature> {
        match self {
            Self::Local(signer) => signer.sign_message(message).await,
            Self::ColdStorage(signer) => signer.sign_message(message).await,
        }
    }

    fn into_wallet(self) -> EthereumWallet {
        match self {
            Self::Local(signer) => EthereumWallet::new(signer),
            Self::ColdStorage(signer) => EthereumWallet::new(signer),
        }
    }
}

/// The account deployments are made from, with a provider that signs its
/// transactions.
#[derive(Clone)]
pub struct Deployer {
    provider: DynProvider,
    signer: DeployerSigner,
}

impl Deployer {
    pub fn connect(rpc_url: &str, config: &SignerConfig) -> anyhow::Result<Self> {
        let signer = DeployerSigner::from_config(config)?;

        let provider = ProviderBuilder::new()
            .wallet(signer.clone().into_wallet())
            .connect_http(rpc_url.parse()?)
            .erased();

        Ok(Self { provider, signer })
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &DeployerSigner {
        &self.signer
    }

    #[cfg(test)]
    pub(crate) fn with_provider(provider: DynProvider, signer: DeployerSigner) -> Self {
        Self { provider, signer }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use {
        super::*,
        alloy::{primitives::address, transports::mock::Asserter},
        assertor::*,
    };

    /// Well known development key, index 0 of the "test ... junk" mnemonic.
    pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    pub const DEV_ADDRESS: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    /// A deployer whose RPC requests are answered from `asserter`, in order.
    pub fn mocked_deployer(asserter: &Asserter) -> Deployer {
        let key: PrivateKeySigner = DEV_KEY.parse().unwrap();
        let provider = ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased();

        Deployer::with_provider(provider, DeployerSigner::Local(key))
    }

    #[test]
    fn signer_config_is_tagged() {
        let standard: SignerConfig = serde_json::from_str(r#"{"type":"standard"}"#).unwrap();
        assert_that!(standard).is_equal_to(SignerConfig::Standard);

        let cold: SignerConfig = serde_json::from_str(
            r#"{
                "type": "cold_storage",
                "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "domain": "signer.example.com",
                "authorization": "Bearer secret"
            }"#,
        )
        .unwrap();

        assert_that!(cold).is_equal_to(SignerConfig::ColdStorage(ColdStorageConfig {
            address: address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            domain: "signer.example.com".to_string(),
            authorization: "Bearer secret".to_string(),
            ca: None,
        }));
    }

    #[test]
    fn cold_storage_signs_through_https_endpoint() {
        let signer = ColdStorageSigner::new(&ColdStorageConfig {
            address: Address::ZERO,
            domain: "signer.example.com".to_string(),
            authorization: "Bearer secret".to_string(),
            ca: None,
        })
        .unwrap();

        assert_eq!(signer.endpoint.as_str(), "https://signer.example.com/sign");
    }

    #[tokio::test]
    async fn local_signer_signs_personal_messages() {
        let key: PrivateKeySigner = DEV_KEY.parse().unwrap();
        let signer = DeployerSigner::Local(key);

        let signature = signer.sign_message(&[0xab; 32]).await.unwrap();

        assert_eq!(signer.address(), DEV_ADDRESS);
        assert_eq!(
            signature
                .recover_address_from_msg([0xab; 32])
                .unwrap(),
            signer.address()
        );
    }
}
