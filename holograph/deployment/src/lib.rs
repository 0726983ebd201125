pub mod contract_bindings {
    pub mod admin {
        use alloy::sol;

        sol! {
            #[sol(rpc)]
            interface Admin {
                function getAdmin() external view returns (address);
            }
        }
    }

    pub mod genesis {
        use alloy::sol;

        sol! {
            #[sol(rpc)]
            interface HolographGenesis {
                function deploy(
                    uint256 chainId,
                    bytes12 saltHash,
                    bytes memory sourceCode,
                    bytes memory initCode
                ) external;
            }
        }
    }

    pub mod holograph {
        use alloy::sol;

        sol! {
            #[sol(rpc)]
            interface Holograph {
                function getBridge() external view returns (address);
                function getFactory() external view returns (address);
                function getInterfaces() external view returns (address);
                function getOperator() external view returns (address);
                function getRegistry() external view returns (address);
            }
        }
    }

    pub mod operator {
        use alloy::sol;

        sol! {
            #[sol(rpc)]
            interface HolographOperator {
                function getMessagingModule() external view returns (address);
                function setMessagingModule(address messagingModule) external;
            }
        }
    }

    pub mod layer_zero_module {
        use alloy::sol;

        sol! {
            #[sol(rpc)]
            interface LayerZeroModule {
                struct GasParameters {
                    uint256 msgBaseGas;
                    uint256 msgGasPerByte;
                    uint256 jobBaseGas;
                    uint256 jobGasPerByte;
                    uint256 minGasPrice;
                    uint256 maxGasLimit;
                }

                function getGasParameters(uint32 chainId) external view returns (GasParameters memory);
                function setGasParameters(uint32[] memory chainIds, GasParameters[] memory gasParameters) external;
                function getOptimismGasPriceOracle() external view returns (address);
                function setOptimismGasPriceOracle(address optimismGasPriceOracle) external;
            }
        }
    }

    pub mod factory {
        use alloy::sol;

        sol! {
            #[sol(rpc)]
            interface HolographFactory {
                #[derive(Debug)]
                struct DeploymentConfig {
                    bytes32 contractType;
                    uint32 chainType;
                    bytes32 salt;
                    bytes byteCode;
                    bytes initCode;
                }

                struct Verification {
                    bytes32 r;
                    bytes32 s;
                    uint8 v;
                }

                event BridgeableContractDeployed(address indexed contractAddress, bytes32 indexed hash);

                function deployHolographableContract(
                    DeploymentConfig memory config,
                    Verification memory signature,
                    address signer
                ) external;
            }
        }
    }

    pub mod registry {
        use alloy::sol;

        sol! {
            #[sol(rpc)]
            interface HolographRegistry {
                function getHolographedHashAddress(bytes32 hash) external view returns (address);
            }
        }
    }
}

pub mod artifacts;
pub mod config;
pub mod deployments;
pub mod error;
pub mod gas;
pub mod genesis;
pub mod holographable;
pub mod network;
pub mod reconcile;
pub mod setup;
pub mod signer;
pub mod steps;
pub mod tx;
