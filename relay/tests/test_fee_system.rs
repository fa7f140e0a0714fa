//! Fee system integration tests.
//!
//! Fee accumulation on release, owner withdrawals, quorum-gated admin fee and
//! bridge wallet changes, and the operator fee settings.

mod suite;

use common::GovernanceAction;
use cosmwasm_std::Uint128;

use relay::fee_manager::FeeConfig;
use relay::msg::{CalculateFeeResponse, ExecuteMsg, GovernanceNonceResponse, QueryMsg};

use suite::{assert_err_contains, setup_with, Suite, SuiteConfig};

fn with_gas_fee() -> Suite {
    setup_with(SuiteConfig {
        gas_fee: 10,
        ..SuiteConfig::default()
    })
}

fn fee_config(suite: &Suite) -> FeeConfig {
    suite.query(&QueryMsg::FeeConfig {})
}

fn governance_nonce(suite: &Suite) -> u64 {
    let res: GovernanceNonceResponse = suite.query(&QueryMsg::GovernanceNonce {});
    res.nonce
}

fn set_bridge_wallet(suite: &mut Suite, bridge_wallet: Option<String>) -> anyhow::Result<()> {
    let action = GovernanceAction::SetBridgeWallet {
        bridge_wallet: bridge_wallet.clone(),
    };
    let signer = &suite.signers[0];
    let signatures = suite.sign_governance(&[signer], &action);
    let relayer = suite.relayer.clone();
    suite.execute(
        &relayer,
        &ExecuteMsg::SetBridgeWallet {
            bridge_wallet,
            signatures,
        },
    )?;
    Ok(())
}

// ============================================================================
// Accumulation
// ============================================================================

#[test]
fn test_fees_accumulate_on_release() {
    let mut suite = with_gas_fee();
    let bob = suite.bob.to_string();

    let res = suite.send(&[0], "0xa11ce", &bob, 1_000, 0).unwrap();
    assert_eq!(suite.relay_attr(&res, "admin_fee").as_deref(), Some("50"));
    assert_eq!(suite.relay_attr(&res, "gas_fee").as_deref(), Some("10"));
    assert_eq!(suite.relay_attr(&res, "amount").as_deref(), Some("940"));

    suite.send(&[0], "0xa11ce", &bob, 2_000, 1).unwrap();

    let acc = suite.fee_accumulator();
    assert_eq!(acc.admin_fee_accumulated, Uint128::new(50 + 100));
    assert_eq!(acc.gas_fee_accumulated, Uint128::new(20));
    assert_eq!(suite.balance(&suite.bob), 940 + 1_890);

    // Every released unit is either paid out or accumulated
    let stats = suite.stats();
    assert_eq!(
        stats.total_released.u128(),
        suite.balance(&suite.bob)
            + acc.admin_fee_accumulated.u128()
            + acc.gas_fee_accumulated.u128()
    );
}

#[test]
fn test_bridge_wallet_receives_admin_fee_directly() {
    let mut suite = setup_with(SuiteConfig {
        gas_fee: 10,
        bridge_wallet: true,
        ..SuiteConfig::default()
    });
    let bob = suite.bob.to_string();

    suite.send(&[0], "0xa11ce", &bob, 1_000, 0).unwrap();

    assert_eq!(suite.balance(&suite.wallet), 50);
    let acc = suite.fee_accumulator();
    assert_eq!(acc.admin_fee_accumulated, Uint128::zero());
    assert_eq!(acc.gas_fee_accumulated, Uint128::new(10));
}

#[test]
fn test_calculate_fee_query() {
    let suite = with_gas_fee();

    let res: CalculateFeeResponse = suite.query(&QueryMsg::CalculateFee {
        amount: Uint128::new(1_000),
    });
    assert_eq!(res.admin_fee, Uint128::new(50));
    assert_eq!(res.gas_fee, Uint128::new(10));
    assert_eq!(res.recipient_amount, Uint128::new(940));

    // Nothing left for the recipient
    let res: CalculateFeeResponse = suite.query(&QueryMsg::CalculateFee {
        amount: Uint128::new(5),
    });
    assert_eq!(res.recipient_amount, Uint128::zero());
}

// ============================================================================
// Withdrawals
// ============================================================================

#[test]
fn test_withdraw_admin_fee() {
    let mut suite = with_gas_fee();
    let bob = suite.bob.to_string();
    let owner = suite.owner.clone();
    let wallet = suite.wallet.to_string();
    suite.send(&[0], "0xa11ce", &bob, 1_000, 0).unwrap();

    let res = suite.execute(
        &owner,
        &ExecuteMsg::WithdrawAdminFee {
            to: wallet.clone(),
            amount: Uint128::new(51),
        },
    );
    assert_err_contains(res, "InsufficientAdminFee");

    let res = suite.execute(
        &owner,
        &ExecuteMsg::WithdrawAdminFee {
            to: wallet.clone(),
            amount: Uint128::zero(),
        },
    );
    assert_err_contains(res, "Invalid amount");

    let res = suite
        .execute(
            &owner,
            &ExecuteMsg::WithdrawAdminFee {
                to: wallet.clone(),
                amount: Uint128::new(20),
            },
        )
        .unwrap();
    assert_eq!(suite.relay_attr(&res, "remaining").as_deref(), Some("30"));

    suite
        .execute(
            &owner,
            &ExecuteMsg::WithdrawAdminFee {
                to: wallet,
                amount: Uint128::new(30),
            },
        )
        .unwrap();

    assert_eq!(suite.balance(&suite.wallet), 50);
    let acc = suite.fee_accumulator();
    assert_eq!(acc.admin_fee_accumulated, Uint128::zero());
    assert_eq!(acc.gas_fee_accumulated, Uint128::new(10));
}

#[test]
fn test_withdraw_gas_fee() {
    let mut suite = with_gas_fee();
    let bob = suite.bob.to_string();
    let owner = suite.owner.clone();
    let wallet = suite.wallet.to_string();
    suite.send(&[0], "0xa11ce", &bob, 1_000, 0).unwrap();

    let res = suite.execute(
        &owner,
        &ExecuteMsg::WithdrawGasFee {
            to: wallet.clone(),
            amount: Uint128::new(11),
        },
    );
    assert_err_contains(res, "InsufficientGasFee");

    suite
        .execute(
            &owner,
            &ExecuteMsg::WithdrawGasFee {
                to: wallet,
                amount: Uint128::new(10),
            },
        )
        .unwrap();
    assert_eq!(suite.balance(&suite.wallet), 10);
    assert_eq!(suite.fee_accumulator().gas_fee_accumulated, Uint128::zero());
}

#[test]
fn test_withdraw_requires_owner() {
    let mut suite = with_gas_fee();
    let bob = suite.bob.to_string();
    let operator = suite.operator.clone();
    suite.send(&[0], "0xa11ce", &bob, 1_000, 0).unwrap();

    let res = suite.execute(
        &operator,
        &ExecuteMsg::WithdrawAdminFee {
            to: operator.to_string(),
            amount: Uint128::new(1),
        },
    );
    assert_err_contains(res, "CallerNoOwner");

    let res = suite.execute(
        &operator,
        &ExecuteMsg::WithdrawGasFee {
            to: operator.to_string(),
            amount: Uint128::new(1),
        },
    );
    assert_err_contains(res, "CallerNoOwner");
}

// ============================================================================
// Quorum-Gated Settings
// ============================================================================

#[test]
fn test_set_admin_fee_by_quorum() {
    let mut suite = with_gas_fee();
    let relayer = suite.relayer.clone();

    for invalid in [0u64, 1001] {
        let action = GovernanceAction::SetAdminFee {
            admin_fee_bps: invalid,
        };
        let signatures = suite.sign_governance(&[&suite.signers[0]], &action);
        let res = suite.execute(
            &relayer,
            &ExecuteMsg::SetAdminFee {
                admin_fee_bps: invalid,
                signatures,
            },
        );
        assert_err_contains(res, "AdminFeeInvalid");
        assert_eq!(governance_nonce(&suite), 0);
    }

    let action = GovernanceAction::SetAdminFee {
        admin_fee_bps: 1000,
    };
    let signatures = suite.sign_governance(&[&suite.signers[0]], &action);
    let res = suite
        .execute(
            &relayer,
            &ExecuteMsg::SetAdminFee {
                admin_fee_bps: 1000,
                signatures,
            },
        )
        .unwrap();
    assert_eq!(
        suite.relay_attr(&res, "method").as_deref(),
        Some("admin_fee_changed")
    );
    assert_eq!(fee_config(&suite).admin_fee_bps, 1000);
    assert_eq!(governance_nonce(&suite), 1);

    let bob = suite.bob.to_string();
    suite.send(&[0], "0xa11ce", &bob, 1_000, 0).unwrap();
    assert_eq!(suite.balance(&suite.bob), 890);
}

#[test]
fn test_set_bridge_wallet_by_quorum() {
    let mut suite = with_gas_fee();
    let wallet = suite.wallet.to_string();

    set_bridge_wallet(&mut suite, Some(wallet)).unwrap();
    assert_eq!(fee_config(&suite).bridge_wallet, Some(suite.wallet.clone()));

    set_bridge_wallet(&mut suite, None).unwrap();
    assert_eq!(fee_config(&suite).bridge_wallet, None);

    // Admin fees accumulate again once cleared
    let bob = suite.bob.to_string();
    suite.send(&[0], "0xa11ce", &bob, 1_000, 0).unwrap();
    assert_eq!(
        suite.fee_accumulator().admin_fee_accumulated,
        Uint128::new(50)
    );
}

#[test]
fn test_set_bridge_wallet_rejects_invalid() {
    let mut suite = with_gas_fee();
    let relay = suite.relay.to_string();

    let err = set_bridge_wallet(&mut suite, Some(relay)).unwrap_err();
    assert!(err.root_cause().to_string().contains("BridgeWalletInvalid"));

    let err = set_bridge_wallet(&mut suite, Some(String::new())).unwrap_err();
    assert!(err.root_cause().to_string().contains("BridgeWalletInvalid"));

    assert_eq!(fee_config(&suite).bridge_wallet, None);
    assert_eq!(governance_nonce(&suite), 0);
}

// ============================================================================
// Operator Settings
// ============================================================================

#[test]
fn test_set_base_gas() {
    let mut suite = with_gas_fee();
    let operator = suite.operator.clone();
    let owner = suite.owner.clone();
    let alice = suite.alice.clone();

    let res = suite
        .execute(
            &operator,
            &ExecuteMsg::SetBaseGas {
                gas_fee: Uint128::new(25),
            },
        )
        .unwrap();
    assert_eq!(
        suite.relay_attr(&res, "previous_gas_fee").as_deref(),
        Some("10")
    );
    assert_eq!(fee_config(&suite).gas_fee, Uint128::new(25));

    suite
        .execute(
            &owner,
            &ExecuteMsg::SetBaseGas {
                gas_fee: Uint128::zero(),
            },
        )
        .unwrap();
    assert_eq!(fee_config(&suite).gas_fee, Uint128::zero());

    let res = suite.execute(
        &alice,
        &ExecuteMsg::SetBaseGas {
            gas_fee: Uint128::new(1),
        },
    );
    assert_err_contains(res, "CallerNoOperator");
}

#[test]
fn test_set_min_transfer_amount() {
    let mut suite = with_gas_fee();
    let operator = suite.operator.clone();
    let alice = suite.alice.clone();

    suite
        .execute(
            &operator,
            &ExecuteMsg::SetMinTransferAmount {
                min_transfer_amount: Uint128::new(500),
            },
        )
        .unwrap();
    assert_eq!(fee_config(&suite).min_transfer_amount, Uint128::new(500));

    let res = suite.deposit(&alice, 500, "0xb0b", suite::DEST_CHAIN_ID);
    assert_err_contains(res, "DepositAmountInvalid");
    suite
        .deposit(&alice, 501, "0xb0b", suite::DEST_CHAIN_ID)
        .unwrap();

    let res = suite.execute(
        &alice,
        &ExecuteMsg::SetMinTransferAmount {
            min_transfer_amount: Uint128::zero(),
        },
    );
    assert_err_contains(res, "CallerNoOperator");
}
