use {
    crate::{
        contract_bindings::layer_zero_module::LayerZeroModule,
        network::{HolographChainId, Network, SELF_CHAIN_ID},
    },
    alloy::primitives::U256,
    serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _},
    serde_with::{DeserializeAs, SerializeAs, serde_as},
    std::collections::BTreeMap,
};

pub const MSG_BASE_GAS: u64 = 110_000;
pub const MSG_GAS_PER_BYTE: u64 = 25;
pub const JOB_BASE_GAS: u64 = 160_000;
pub const JOB_GAS_PER_BYTE: u64 = 35;
/// 1 wei.
pub const MIN_GAS_PRICE: u64 = 1;
pub const GAS_LIMIT: u64 = 10_000_001;

const WEI_PER_GWEI: u64 = 1_000_000_000;

/// Converts gwei to wei.
pub const fn gwei(amount: u64) -> u64 {
    amount * WEI_PER_GWEI
}

/// A uint256 gas amount, read from an integer or from a decimal or `0x` hex
/// string when it does not fit in 64 bits. Written back as an integer when it
/// fits, as a decimal string otherwise.
pub struct GasAmount;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGasAmount {
    Number(u64),
    Text(String),
}

impl SerializeAs<U256> for GasAmount {
    fn serialize_as<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match u64::try_from(*value) {
            Ok(value) => serializer.serialize_u64(value),
            Err(_) => serializer.serialize_str(&value.to_string()),
        }
    }
}

impl<'de> DeserializeAs<'de, U256> for GasAmount {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawGasAmount::deserialize(deserializer)? {
            RawGasAmount::Number(value) => Ok(U256::from(value)),
            RawGasAmount::Text(text) => text.parse::<U256>().map_err(D::Error::custom),
        }
    }
}

/// The cost model the messaging module applies when relaying a message or job
/// to one destination chain.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasParameters {
    #[serde_as(as = "GasAmount")]
    pub message_base_gas: U256,
    #[serde_as(as = "GasAmount")]
    pub message_gas_per_byte: U256,
    #[serde_as(as = "GasAmount")]
    pub job_base_gas: U256,
    #[serde_as(as = "GasAmount")]
    pub job_gas_per_byte: U256,
    #[serde_as(as = "GasAmount")]
    pub min_gas_price: U256,
    #[serde_as(as = "GasAmount")]
    pub gas_limit: U256,
}

impl GasParameters {
    pub const FIELDS: [&'static str; 6] = [
        "message_base_gas",
        "message_gas_per_byte",
        "job_base_gas",
        "job_gas_per_byte",
        "min_gas_price",
        "gas_limit",
    ];

    pub fn new(
        message_base_gas: u64,
        message_gas_per_byte: u64,
        job_base_gas: u64,
        job_gas_per_byte: u64,
        min_gas_price: u64,
        gas_limit: u64,
    ) -> Self {
        Self::from_array([
            U256::from(message_base_gas),
            U256::from(message_gas_per_byte),
            U256::from(job_base_gas),
            U256::from(job_gas_per_byte),
            U256::from(min_gas_price),
            U256::from(gas_limit),
        ])
    }

    pub fn from_array(values: [U256; 6]) -> Self {
        let [
            message_base_gas,
            message_gas_per_byte,
            job_base_gas,
            job_gas_per_byte,
            min_gas_price,
            gas_limit,
        ] = values;

        Self {
            message_base_gas,
            message_gas_per_byte,
            job_base_gas,
            job_gas_per_byte,
            min_gas_price,
            gas_limit,
        }
    }

    pub fn to_array(&self) -> [U256; 6] {
        [
            self.message_base_gas,
            self.message_gas_per_byte,
            self.job_base_gas,
            self.job_gas_per_byte,
            self.min_gas_price,
            self.gas_limit,
        ]
    }

    /// Position of the first coordinate at which `self` and `other` differ.
    pub fn first_mismatch(&self, other: &Self) -> Option<usize> {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .position(|(a, b)| a != b)
    }

    /// Same vector with the minimum gas price set to `wei - 1`.
    fn with_min_gas_price_below(mut self, wei: u64) -> Self {
        self.min_gas_price = U256::from(wei - 1);
        self
    }

    fn with_job_gas(mut self, base: u64, per_byte: u64) -> Self {
        self.job_base_gas = U256::from(base);
        self.job_gas_per_byte = U256::from(per_byte);
        self
    }
}

impl Default for GasParameters {
    fn default() -> Self {
        Self::new(
            MSG_BASE_GAS,
            MSG_GAS_PER_BYTE,
            JOB_BASE_GAS,
            JOB_GAS_PER_BYTE,
            MIN_GAS_PRICE,
            GAS_LIMIT,
        )
    }
}

impl From<GasParameters> for LayerZeroModule::GasParameters {
    fn from(params: GasParameters) -> Self {
        Self {
            msgBaseGas: params.message_base_gas,
            msgGasPerByte: params.message_gas_per_byte,
            jobBaseGas: params.job_base_gas,
            jobGasPerByte: params.job_gas_per_byte,
            minGasPrice: params.min_gas_price,
            maxGasLimit: params.gas_limit,
        }
    }
}

impl From<LayerZeroModule::GasParameters> for GasParameters {
    fn from(params: LayerZeroModule::GasParameters) -> Self {
        Self {
            message_base_gas: params.msgBaseGas,
            message_gas_per_byte: params.msgGasPerByte,
            job_base_gas: params.jobBaseGas,
            job_gas_per_byte: params.jobGasPerByte,
            min_gas_price: params.minGasPrice,
            gas_limit: params.maxGasLimit,
        }
    }
}

/// Default gas parameters plus per-network overrides, keyed by network key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GasConfig {
    pub default: GasParameters,
    #[serde(default)]
    pub overrides: BTreeMap<String, GasParameters>,
}

impl GasConfig {
    pub fn for_network(&self, network: &Network) -> GasParameters {
        self.overrides
            .get(&network.key)
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for GasConfig {
    fn default() -> Self {
        let default = GasParameters::default();
        let bsc = default.with_job_gas(180_000, 40);

        let overrides = [
            ("ethereum", default.with_min_gas_price_below(gwei(40))),
            ("ethereumTestnetGoerli", default.with_min_gas_price_below(gwei(5))),
            ("binanceSmartChain", bsc.with_min_gas_price_below(gwei(3))),
            ("binanceSmartChainTestnet", bsc.with_min_gas_price_below(gwei(1))),
            ("avalanche", default.with_min_gas_price_below(gwei(30))),
            ("avalancheTestnet", default.with_min_gas_price_below(gwei(30))),
            ("polygon", default.with_min_gas_price_below(gwei(200))),
            ("polygonTestnet", default.with_min_gas_price_below(gwei(5))),
            // 0.01 gwei
            ("optimism", default.with_min_gas_price_below(10_000_000)),
            ("optimismTestnetGoerli", default.with_min_gas_price_below(gwei(5))),
            // 0.1 gwei
            ("arbitrumOne", default.with_min_gas_price_below(100_000_000)),
            ("arbitrumTestnetGoerli", default.with_min_gas_price_below(gwei(5))),
        ]
        .into_iter()
        .map(|(key, params)| (key.to_string(), params))
        .collect();

        Self { default, overrides }
    }
}

/// Gas parameters keyed by Holograph chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterTable(BTreeMap<HolographChainId, GasParameters>);

impl ParameterTable {
    /// The target table: one entry per network, override else default.
    pub fn desired<'a, I>(networks: I, gas: &GasConfig) -> Self
    where
        I: IntoIterator<Item = &'a Network>,
    {
        networks
            .into_iter()
            .map(|network| (network.holograph_id, gas.for_network(network)))
            .collect()
    }

    pub fn get(&self, chain_id: HolographChainId) -> Option<&GasParameters> {
        self.0.get(&chain_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(HolographChainId, GasParameters)> for ParameterTable {
    fn from_iter<T: IntoIterator<Item = (HolographChainId, GasParameters)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parallel chain id and gas parameter arrays, as taken by the module's
/// constructor and by `setGasParameters(uint32[],GasParameters[])`.
///
/// Both arrays always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GasParameterBatch {
    chain_ids: Vec<HolographChainId>,
    parameters: Vec<GasParameters>,
}

impl GasParameterBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the batch the module is constructed with: every network with a
    /// non-zero Holograph id, where the local chain's entry is preceded by its
    /// self-chain alias.
    pub fn initial<'a, I>(networks: I, local_chain_id: HolographChainId, gas: &GasConfig) -> Self
    where
        I: IntoIterator<Item = &'a Network>,
    {
        let mut batch = Self::new();

        for network in networks {
            if network.holograph_id == SELF_CHAIN_ID {
                continue;
            }

            let params = gas.for_network(network);

            if network.holograph_id == local_chain_id {
                batch.push(SELF_CHAIN_ID, params);
            }

            batch.push(network.holograph_id, params);
        }

        batch
    }

    pub fn push(&mut self, chain_id: HolographChainId, params: GasParameters) {
        self.chain_ids.push(chain_id);
        self.parameters.push(params);
    }

    pub fn len(&self) -> usize {
        self.chain_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain_ids.is_empty()
    }

    pub fn chain_ids(&self) -> &[HolographChainId] {
        &self.chain_ids
    }

    pub fn parameters(&self) -> &[GasParameters] {
        &self.parameters
    }

    pub fn iter(&self) -> impl Iterator<Item = (HolographChainId, &GasParameters)> {
        self.chain_ids.iter().copied().zip(self.parameters.iter())
    }

    /// The two arrays in the shape the contract bindings expect.
    pub fn into_call_args(self) -> (Vec<u32>, Vec<LayerZeroModule::GasParameters>) {
        (
            self.chain_ids,
            self.parameters.into_iter().map(Into::into).collect(),
        )
    }
}

// ----------------------------------- tests -----------------------------------
