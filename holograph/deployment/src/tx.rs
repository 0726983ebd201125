use {
    crate::{config::TxConfig, contract_bindings::admin::Admin, gas::gwei, signer::Deployer},
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, Bytes, TxHash},
        providers::Provider,
        rpc::types::{TransactionReceipt, TransactionRequest},
        sol_types::SolCall,
    },
};

/// Adds `percent` on top of an estimated gas limit.
pub fn with_buffer(gas: u64, percent: u64) -> u64 {
    gas.saturating_add(gas.saturating_mul(percent) / 100)
}

/// Fills in the gas limit, with a safety buffer over the node's estimate, and
/// the configured gas price if any.
pub async fn tx_params(
    provider: &impl Provider,
    tx: TransactionRequest,
    config: &TxConfig,
) -> anyhow::Result<TransactionRequest> {
    let estimate = provider.estimate_gas(tx.clone()).await?;
    let tx = tx.with_gas_limit(with_buffer(estimate, config.gas_limit_buffer_percent));

    Ok(match config.gas_price_gwei {
        Some(price) => tx.with_gas_price(u128::from(gwei(price))),
        None => tx,
    })
}

/// Sends a call from the deployer and waits for its receipt.
pub async fn send_call<C>(
    deployer: &Deployer,
    to: Address,
    call: &C,
    config: &TxConfig,
) -> anyhow::Result<TransactionReceipt>
where
    C: SolCall,
{
    let tx = TransactionRequest::default()
        .with_from(deployer.address())
        .with_to(to)
        .with_call(call);
    let tx = tx_params(deployer.provider(), tx, config).await?;

    let pending = deployer.provider().send_transaction(tx).await?;
    tracing::info!(hash = %pending.tx_hash(), "Transaction sent");

    let receipt = pending.get_receipt().await?;

    anyhow::ensure!(
        receipt.status(),
        "transaction {} reverted",
        receipt.transaction_hash
    );

    Ok(receipt)
}

/// A transaction the deployer may not send itself, to be executed by the
/// admin of the target contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigProposal {
    pub admin: Address,
    pub to: Address,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Sent(TxHash),
    Proposed(MultisigProposal),
}

/// Sends `call` to `to` if the deployer administers the contract; otherwise
/// logs the transaction for the admin (typically a multisig) to execute.
pub async fn dispatch<C>(
    deployer: &Deployer,
    to: Address,
    call: &C,
    config: &TxConfig,
) -> anyhow::Result<Dispatch>
where
    C: SolCall,
{
    let admin = Admin::new(to, deployer.provider()).getAdmin().call().await?;

    if admin != deployer.address() {
        let proposal = MultisigProposal {
            admin,
            to,
            data: call.abi_encode().into(),
        };

        tracing::warn!(
            admin = %proposal.admin,
            to = %proposal.to,
            data = ?proposal.data,
            "Deployer is not the admin, execute this transaction from the admin account"
        );

        return Ok(Dispatch::Proposed(proposal));
    }

    let receipt = send_call(deployer, to, call, config).await?;

    Ok(Dispatch::Sent(receipt.transaction_hash))
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            contract_bindings::operator::HolographOperator,
            signer::tests::{DEV_ADDRESS, mocked_deployer},
        },
        alloy::{primitives::address, sol_types::SolValue, transports::mock::Asserter},
        test_case::test_case,
    };

    const OPERATOR: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const MULTISIG: Address = address!("0x000000000000000000000000000000000000dEaD");

    #[test_case(100_000, 25 => 125_000 ; "quarter")]
    #[test_case(21_000, 0 => 21_000 ; "no buffer")]
    #[test_case(99, 10 => 108 ; "rounds down")]
    #[test_case(u64::MAX, 50 => u64::MAX ; "saturates")]
    fn gas_limit_buffer(gas: u64, percent: u64) -> u64 {
        with_buffer(gas, percent)
    }

    #[tokio::test]
    async fn foreign_admin_gets_a_proposal() {
        let asserter = Asserter::new();
        let deployer = mocked_deployer(&asserter);
        let call = HolographOperator::setMessagingModuleCall {
            messagingModule: Address::with_last_byte(7),
        };

        // `getAdmin()`. No response is queued for gas estimation or sending.
        asserter.push_success(&Bytes::from(SolValue::abi_encode(&MULTISIG)));

        let outcome = dispatch(&deployer, OPERATOR, &call, &TxConfig::default())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Dispatch::Proposed(MultisigProposal {
                admin: MULTISIG,
                to: OPERATOR,
                data: SolCall::abi_encode(&call).into(),
            })
        );
    }

    #[tokio::test]
    async fn deployer_admin_sends_the_call() {
        let asserter = Asserter::new();
        let deployer = mocked_deployer(&asserter);
        let call = HolographOperator::setMessagingModuleCall {
            messagingModule: Address::with_last_byte(7),
        };

        asserter.push_success(&Bytes::from(SolValue::abi_encode(&DEV_ADDRESS)));
        // Gas estimation is the first step of sending.
        asserter.push_failure_msg("execution reverted");

        let err = dispatch(&deployer, OPERATOR, &call, &TxConfig::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("execution reverted"));
    }
}
