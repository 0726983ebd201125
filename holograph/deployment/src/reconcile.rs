//! Convergence of the messaging module's per-chain gas parameters towards a
//! desired table.
//!
//! The comparison is deliberately coarse: a vector that differs in any one
//! coordinate is rewritten in full, and the module's self-chain alias (chain
//! id `0`) is rewritten together with the local chain's own entry.

use {
    crate::{
        contract_bindings::layer_zero_module::LayerZeroModule,
        gas::{GasParameterBatch, GasParameters, ParameterTable},
        network::{HolographChainId, Network, SELF_CHAIN_ID},
    },
    alloy::{network::Network as AlloyNetwork, providers::Provider},
    async_trait::async_trait,
};

/// Read access to the gas parameters currently stored for a chain.
#[async_trait]
pub trait GasParameterSource {
    type Error;

    async fn gas_parameters(&self, chain_id: HolographChainId)
    -> Result<GasParameters, Self::Error>;
}

#[async_trait]
impl<P, N> GasParameterSource for LayerZeroModule::LayerZeroModuleInstance<P, N>
where
    P: Provider<N>,
    N: AlloyNetwork,
{
    type Error = alloy::contract::Error;

    async fn gas_parameters(
        &self,
        chain_id: HolographChainId,
    ) -> Result<GasParameters, Self::Error> {
        self.getGasParameters(chain_id)
            .call()
            .await
            .map(GasParameters::from)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError<E> {
    #[error("failed to fetch gas parameters of chain {chain_id}")]
    Fetch {
        chain_id: HolographChainId,
        #[source]
        source: E,
    },

    #[error("no desired gas parameters for chain {chain_id}")]
    MissingDesired { chain_id: HolographChainId },
}

/// Computes the minimal batch that brings the observed gas parameters of
/// `networks` in line with `desired`.
///
/// Networks are visited in order and fetched one at a time. A network whose
/// observed vector differs from the desired one in any coordinate contributes
/// its full desired vector; when that network is the local chain, the entry is
/// immediately followed by a copy under [`SELF_CHAIN_ID`].
///
/// The first failed fetch aborts the run.
pub async fn reconcile<'a, S, I>(
    desired: &ParameterTable,
    observed: &S,
    networks: I,
    local_chain_id: HolographChainId,
) -> Result<GasParameterBatch, ReconcileError<S::Error>>
where
    S: GasParameterSource + Sync + ?Sized,
    I: IntoIterator<Item = &'a Network>,
{
    let mut batch = GasParameterBatch::new();

    for network in networks {
        let chain_id = network.holograph_id;

        let target = *desired
            .get(chain_id)
            .ok_or(ReconcileError::MissingDesired { chain_id })?;

        let current = observed
            .gas_parameters(chain_id)
            .await
            .map_err(|source| ReconcileError::Fetch { chain_id, source })?;

        let Some(position) = target.first_mismatch(&current) else {
            continue;
        };

        tracing::debug!(
            network = %network.key,
            chain_id,
            field = GasParameters::FIELDS[position],
            desired = %target.to_array()[position],
            observed = %current.to_array()[position],
            "Gas parameters out of date"
        );

        batch.push(chain_id, target);

        if chain_id == local_chain_id {
            batch.push(SELF_CHAIN_ID, target);
        }
    }

    Ok(batch)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            gas::GasConfig,
            network::{NetworkType, tests::network},
        },
        alloy::{
            primitives::{Address, Bytes, U256},
            providers::ProviderBuilder,
            sol_types::SolValue,
            transports::mock::Asserter,
        },
        std::{collections::BTreeMap, sync::Mutex},
    };

    #[derive(Debug, PartialEq, Eq)]
    struct Unreachable(HolographChainId);

    impl std::fmt::Display for Unreachable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "chain {} unreachable", self.0)
        }
    }

    impl std::error::Error for Unreachable {}

    /// In-memory module storage that records the order of reads.
    #[derive(Default)]
    struct MockModule {
        stored: BTreeMap<HolographChainId, GasParameters>,
        failing: Option<HolographChainId>,
        reads: Mutex<Vec<HolographChainId>>,
    }

    impl MockModule {
        fn with(mut self, chain_id: HolographChainId, params: GasParameters) -> Self {
            self.stored.insert(chain_id, params);
            self
        }
    }

    #[async_trait]
    impl GasParameterSource for MockModule {
        type Error = Unreachable;

        async fn gas_parameters(
            &self,
            chain_id: HolographChainId,
        ) -> Result<GasParameters, Self::Error> {
            self.reads.lock().unwrap().push(chain_id);

            if self.failing == Some(chain_id) {
                return Err(Unreachable(chain_id));
            }

            // Unset storage reads back as zeroes.
            Ok(self
                .stored
                .get(&chain_id)
                .copied()
                .unwrap_or(GasParameters::from_array([U256::ZERO; 6])))
        }
    }

    fn testnets(ids: &[HolographChainId]) -> Vec<Network> {
        ids.iter()
            .map(|id| network(&format!("net{id}"), *id, NetworkType::Testnet))
            .collect()
    }

    fn default_table(networks: &[Network]) -> ParameterTable {
        ParameterTable::desired(networks, &GasConfig::default())
    }

    #[tokio::test]
    async fn no_updates_when_everything_matches() {
        let networks = testnets(&[5, 7]);
        let module = MockModule::default()
            .with(5, GasParameters::default())
            .with(7, GasParameters::default());

        let batch = reconcile(&default_table(&networks), &module, &networks, 7)
            .await
            .unwrap();

        assert!(batch.is_empty());
        assert!(batch.parameters().is_empty());
    }

    #[tokio::test]
    async fn local_mismatch_is_mirrored_under_self_chain_id() {
        let networks = testnets(&[5, 7]);
        let desired = ParameterTable::from_iter([
            (5, GasParameters::new(110000, 25, 160000, 35, 1, 10000001)),
            (7, GasParameters::new(110000, 25, 160000, 35, 1, 10000001)),
        ]);
        let module = MockModule::default()
            .with(5, GasParameters::new(110000, 25, 160000, 35, 1, 10000001))
            .with(7, GasParameters::new(110000, 25, 160000, 35, 999, 10000001));

        let batch = reconcile(&desired, &module, &networks, 7).await.unwrap();

        let expected = GasParameters::new(110000, 25, 160000, 35, 1, 10000001);
        assert_eq!(batch.chain_ids(), [7, 0]);
        assert_eq!(batch.parameters(), [expected, expected]);
    }

    #[tokio::test]
    async fn single_field_drift_rewrites_whole_vector() {
        let networks = testnets(&[5, 7]);
        let mut drifted = GasParameters::default();
        drifted.job_gas_per_byte = U256::from(36);
        let module = MockModule::default()
            .with(5, drifted)
            .with(7, GasParameters::default());

        let batch = reconcile(&default_table(&networks), &module, &networks, 7)
            .await
            .unwrap();

        assert_eq!(batch.chain_ids(), [5]);
        assert_eq!(batch.parameters(), [GasParameters::default()]);
    }

    #[tokio::test]
    async fn results_follow_network_order() {
        let networks = testnets(&[9, 3, 7, 1]);
        // Nothing stored yet, so every chain differs.
        let module = MockModule::default().with(7, GasParameters::default());

        let batch = reconcile(&default_table(&networks), &module, &networks, 3)
            .await
            .unwrap();

        assert_eq!(batch.chain_ids(), [9, 3, 0, 1]);
        assert_eq!(batch.chain_ids().len(), batch.parameters().len());
        assert_eq!(*module.reads.lock().unwrap(), [9, 3, 7, 1]);
    }

    #[tokio::test]
    async fn overrides_are_compared_per_network() {
        let networks = vec![
            network("ethereum", 1, NetworkType::Mainnet),
            network("polygon", 2, NetworkType::Mainnet),
        ];
        let gas = GasConfig::default();
        // Polygon still holds the default vector instead of its override.
        let module = MockModule::default()
            .with(1, gas.overrides["ethereum"])
            .with(2, GasParameters::default());

        let desired = ParameterTable::desired(&networks, &gas);
        let batch = reconcile(&desired, &module, &networks, 1).await.unwrap();

        assert_eq!(batch.chain_ids(), [2]);
        assert_eq!(batch.parameters(), [gas.overrides["polygon"]]);
    }

    #[tokio::test]
    async fn fetch_failure_aborts_and_names_the_chain() {
        let networks = testnets(&[5, 7, 9]);
        let module = MockModule {
            failing: Some(7),
            ..Default::default()
        };

        let err = reconcile(&default_table(&networks), &module, &networks, 5)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::Fetch { chain_id: 7, source: Unreachable(7) }
        ));
        // Chain 9 is never read.
        assert_eq!(*module.reads.lock().unwrap(), [5, 7]);
    }

    #[tokio::test]
    async fn missing_desired_entry_is_an_error() {
        let networks = testnets(&[5]);

        let err = reconcile(&ParameterTable::default(), &MockModule::default(), &networks, 5)
            .await
            .unwrap_err();

        assert!(matches!(err, ReconcileError::MissingDesired { chain_id: 5 }));
    }

    fn encoded(params: GasParameters) -> Bytes {
        LayerZeroModule::GasParameters::from(params).abi_encode().into()
    }

    #[tokio::test]
    async fn module_binding_reads_fields_in_contract_order() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        let module = LayerZeroModule::new(Address::with_last_byte(1), &provider);

        let onchain = LayerZeroModule::GasParameters {
            msgBaseGas: U256::from(1),
            msgGasPerByte: U256::from(2),
            jobBaseGas: U256::from(3),
            jobGasPerByte: U256::from(4),
            minGasPrice: U256::from(5),
            maxGasLimit: U256::from(6),
        };
        asserter.push_success(&Bytes::from(onchain.abi_encode()));

        let observed = module.gas_parameters(7).await.unwrap();

        assert_eq!(observed, GasParameters::new(1, 2, 3, 4, 5, 6));
    }

    #[tokio::test]
    async fn reconcile_against_module_binding() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        let module = LayerZeroModule::new(Address::with_last_byte(1), &provider);

        let networks = testnets(&[3, 5, 9]);
        let mut drifted = GasParameters::default();
        drifted.min_gas_price = U256::from(2);

        asserter.push_success(&encoded(drifted));
        asserter.push_success(&encoded(GasParameters::default()));
        asserter.push_failure_msg("header not found");

        let err = reconcile(&default_table(&networks), &module, &networks, 3)
            .await
            .unwrap_err();
        assert!(matches!(err, ReconcileError::Fetch { chain_id: 9, .. }));

        asserter.push_success(&encoded(drifted));
        asserter.push_success(&encoded(GasParameters::default()));
        asserter.push_success(&encoded(GasParameters::default()));

        let batch = reconcile(&default_table(&networks), &module, &networks, 3)
            .await
            .unwrap();

        assert_eq!(batch.chain_ids(), [3, 0]);
        assert_eq!(batch.parameters(), [GasParameters::default(); 2]);
    }
}
