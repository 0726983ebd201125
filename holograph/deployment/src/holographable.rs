use {
    crate::{
        contract_bindings::factory::HolographFactory::{DeploymentConfig, Verification},
        network::HolographChainId,
    },
    alloy::{
        primitives::{Address, B256, Bytes, Signature, U256, keccak256},
        sol_types::{SolType, SolValue, sol_data},
    },
};

/// Events an ERC-20 holographable contract can opt into. The discriminant is
/// the bit position in the event configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Erc20Event {
    BridgeIn = 1,
    BridgeOut,
    AfterApprove,
    BeforeApprove,
    AfterOnErc20Received,
    BeforeOnErc20Received,
    AfterBurn,
    BeforeBurn,
    AfterMint,
    BeforeMint,
    AfterSafeTransfer,
    BeforeSafeTransfer,
    AfterTransfer,
    BeforeTransfer,
    OnAllowance,
}

/// Events an ERC-721 holographable contract can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Erc721Event {
    BridgeIn = 1,
    BridgeOut,
    AfterApprove,
    BeforeApprove,
    AfterApprovalAll,
    BeforeApprovalAll,
    AfterBurn,
    BeforeBurn,
    AfterMint,
    BeforeMint,
    AfterSafeTransfer,
    BeforeSafeTransfer,
    AfterTransfer,
    BeforeTransfer,
    BeforeOnErc721Received,
    AfterOnErc721Received,
    OnIsApprovedForAll,
    CustomContractUri,
}

/// Packs event ids into the 256-bit mask holographable contracts read their
/// event configuration from.
pub fn configure_events<I>(events: I) -> U256
where
    I: IntoIterator<Item = u8>,
{
    events
        .into_iter()
        .fold(U256::ZERO, |mask, event| mask | (U256::from(1) << event as usize))
}

/// An ASCII name right-aligned in 32 bytes, the way contract types and
/// contract identifiers are stored on chain.
pub fn padded_name(name: &str) -> B256 {
    B256::left_padding_from(name.as_bytes())
}

pub struct Erc20Params<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub decimals: u8,
    pub event_config: U256,
    pub domain_separator: &'a str,
    pub domain_version: &'a str,
    pub init_code: Bytes,
}

pub struct Erc721Params<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub royalty_bps: u16,
    pub event_config: U256,
    pub init_code: Bytes,
}

/// A deployment config for the Holograph factory together with the hash the
/// signer must sign and the registry indexes the deployment by.
#[derive(Debug, Clone)]
pub struct HolographableConfig {
    pub config: DeploymentConfig,
    pub hash: B256,
}

impl HolographableConfig {
    pub fn new(
        contract_type: &str,
        chain_type: HolographChainId,
        salt: B256,
        byte_code: Bytes,
        init_code: Bytes,
        signer: Address,
    ) -> Self {
        let contract_type = padded_name(contract_type);

        let mut preimage = Vec::with_capacity(32 + 4 + 32 * 3 + 20);
        preimage.extend_from_slice(contract_type.as_slice());
        preimage.extend_from_slice(&chain_type.to_be_bytes());
        preimage.extend_from_slice(salt.as_slice());
        preimage.extend_from_slice(keccak256(&byte_code).as_slice());
        preimage.extend_from_slice(keccak256(&init_code).as_slice());
        preimage.extend_from_slice(signer.as_slice());

        Self {
            hash: keccak256(preimage),
            config: DeploymentConfig {
                contractType: contract_type,
                chainType: chain_type,
                salt,
                byteCode: byte_code,
                initCode: init_code,
            },
        }
    }

    pub fn erc20(
        chain_type: HolographChainId,
        salt: B256,
        byte_code: Bytes,
        params: Erc20Params,
        signer: Address,
    ) -> Self {
        let init_code = <(
            sol_data::String,
            sol_data::String,
            sol_data::Uint<8>,
            sol_data::Uint<256>,
            sol_data::String,
            sol_data::String,
            sol_data::Bool,
            sol_data::Bytes,
        ) as SolType>::abi_encode_params(&(
            params.name.to_string(),
            params.symbol.to_string(),
            params.decimals,
            params.event_config,
            params.domain_separator.to_string(),
            params.domain_version.to_string(),
            false, // skip init
            params.init_code,
        ));

        Self::new(
            "HolographERC20",
            chain_type,
            salt,
            byte_code,
            init_code.into(),
            signer,
        )
    }

    pub fn erc721(
        chain_type: HolographChainId,
        salt: B256,
        byte_code: Bytes,
        params: Erc721Params,
        signer: Address,
    ) -> Self {
        let init_code = (
            params.name.to_string(),
            params.symbol.to_string(),
            params.royalty_bps,
            params.event_config,
            false, // skip init
            params.init_code,
        )
            .abi_encode_params();

        Self::new(
            "HolographERC721",
            chain_type,
            salt,
            byte_code,
            init_code.into(),
            signer,
        )
    }
}

/// Splits a signature into the form the factory verifies, with `v` as 27/28.
pub fn verification(signature: &Signature) -> Verification {
    Verification {
        r: B256::from(signature.r()),
        s: B256::from(signature.s()),
        v: 27 + signature.v() as u8,
    }
}

// ----------------------------------- tests -----------------------------------
