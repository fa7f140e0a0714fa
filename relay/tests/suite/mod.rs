//! Shared cw-multi-test setup for the relay integration tests.

#![allow(dead_code)]

use anyhow::Result as AnyResult;
use cosmwasm_std::{coins, to_json_binary, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg, MinterResponse};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use serde::de::DeserializeOwned;

use common::testing::TestSigner;
use common::{Domain, GovernanceAction};
use relay::fee_manager::FeeAccumulator;
use relay::msg::{
    DigestResponse, ExecuteMsg, InstantiateMsg, QueryMsg, ReceiveMsg, StatsResponse,
};
use relay::state::TokenMode;

pub const CHAIN_ID: u64 = 1;
pub const DEST_CHAIN_ID: u64 = 56;
pub const ALICE_BALANCE: u128 = 1_000_000;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_relay() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        relay::contract::execute,
        relay::contract::instantiate,
        relay::contract::query,
    )
    .with_migrate(relay::contract::migrate);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

// ============================================================================
// Setup
// ============================================================================

pub struct SuiteConfig {
    pub mode: TokenMode,
    pub signers: u64,
    pub threshold: u32,
    pub admin_fee_bps: u64,
    pub gas_fee: u128,
    pub min_transfer_amount: u128,
    pub bridge_wallet: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            mode: TokenMode::MintBurn,
            signers: 1,
            threshold: 1,
            admin_fee_bps: 500,
            gas_fee: 0,
            min_transfer_amount: 0,
            bridge_wallet: false,
        }
    }
}

pub struct Suite {
    pub app: App,
    pub relay: Addr,
    pub token: Addr,
    pub owner: Addr,
    pub operator: Addr,
    pub relayer: Addr,
    pub alice: Addr,
    pub bob: Addr,
    pub wallet: Addr,
    /// Sorted by signer id
    pub signers: Vec<TestSigner>,
}

pub fn setup() -> Suite {
    setup_with(SuiteConfig::default())
}

pub fn setup_with(cfg: SuiteConfig) -> Suite {
    let mut app = App::default();

    let owner = Addr::unchecked("terra1owner");
    let operator = Addr::unchecked("terra1operator");
    let relayer = Addr::unchecked("terra1relayer");
    let alice = Addr::unchecked("terra1alice");
    let bob = Addr::unchecked("terra1bob");
    let wallet = Addr::unchecked("terra1wallet");

    app.init_modules(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &alice, coins(10_000_000, "uluna"))
            .unwrap();
    });

    // Token, minted by the owner until the relay takes over
    let cw20_code_id = app.store_code(contract_cw20());
    let token = app
        .instantiate_contract(
            cw20_code_id,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Relay Token".to_string(),
                symbol: "RLY".to_string(),
                decimals: 6,
                initial_balances: vec![Cw20Coin {
                    address: alice.to_string(),
                    amount: Uint128::new(ALICE_BALANCE),
                }],
                mint: Some(MinterResponse {
                    minter: owner.to_string(),
                    cap: None,
                }),
                marketing: None,
            },
            &[],
            "relay-token",
            None,
        )
        .unwrap();

    let signers = TestSigner::sorted(cfg.signers);

    let relay_code_id = app.store_code(contract_relay());
    let relay = app
        .instantiate_contract(
            relay_code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                operators: vec![operator.to_string()],
                signers: signers.iter().map(|s| s.hex()).collect(),
                threshold: cfg.threshold,
                token: token.to_string(),
                token_mode: cfg.mode.clone(),
                chain_id: CHAIN_ID,
                admin_fee_bps: cfg.admin_fee_bps,
                gas_fee: Uint128::new(cfg.gas_fee),
                min_transfer_amount: Uint128::new(cfg.min_transfer_amount),
                bridge_wallet: cfg.bridge_wallet.then(|| wallet.to_string()),
            },
            &[],
            "quorum-relay",
            Some(owner.to_string()),
        )
        .unwrap();

    if cfg.mode == TokenMode::MintBurn {
        app.execute_contract(
            owner.clone(),
            token.clone(),
            &Cw20ExecuteMsg::UpdateMinter {
                new_minter: Some(relay.to_string()),
            },
            &[],
        )
        .unwrap();
    }

    Suite {
        app,
        relay,
        token,
        owner,
        operator,
        relayer,
        alice,
        bob,
        wallet,
        signers,
    }
}

// ============================================================================
// Helpers
// ============================================================================

impl Suite {
    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> AnyResult<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.relay.clone(), msg, &[])
    }

    pub fn query<T: DeserializeOwned>(&self, msg: &QueryMsg) -> T {
        self.app.wrap().query_wasm_smart(&self.relay, msg).unwrap()
    }

    /// Deposit through the cw20 `Send` hook.
    pub fn deposit(
        &mut self,
        from: &Addr,
        amount: u128,
        recipient: &str,
        destination_chain_id: u64,
    ) -> AnyResult<AppResponse> {
        let msg = Cw20ExecuteMsg::Send {
            contract: self.relay.to_string(),
            amount: Uint128::new(amount),
            msg: to_json_binary(&ReceiveMsg::Deposit {
                recipient: recipient.to_string(),
                destination_chain_id,
            })?,
        };
        self.app
            .execute_contract(from.clone(), self.token.clone(), &msg, &[])
    }

    /// Digest a release is signed over on the suite's relay.
    pub fn send_digest(&self, sender: &str, recipient: &str, amount: u128, nonce: u64) -> [u8; 32] {
        let domain = Domain {
            chain_id: CHAIN_ID,
            relay: self.relay.as_str(),
        };
        common::send_digest(&domain, sender, recipient, amount, nonce)
    }

    /// Signatures of `signers[i]` for each `i` in `indexes`, in that order.
    pub fn sign_send(
        &self,
        indexes: &[usize],
        sender: &str,
        recipient: &str,
        amount: u128,
        nonce: u64,
    ) -> Vec<Binary> {
        let digest = self.send_digest(sender, recipient, amount, nonce);
        indexes
            .iter()
            .map(|i| self.signers[*i].sign(&digest))
            .collect()
    }

    /// Submit a release signed by `signers[i]` for each `i` in `indexes`.
    pub fn send(
        &mut self,
        indexes: &[usize],
        sender: &str,
        recipient: &str,
        amount: u128,
        nonce: u64,
    ) -> AnyResult<AppResponse> {
        let signatures = self.sign_send(indexes, sender, recipient, amount, nonce);
        self.send_with(sender, recipient, amount, nonce, signatures)
    }

    pub fn send_with(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: u128,
        nonce: u64,
        signatures: Vec<Binary>,
    ) -> AnyResult<AppResponse> {
        let relayer = self.relayer.clone();
        self.execute(
            &relayer,
            &ExecuteMsg::Send {
                sender: sender.to_string(),
                recipient: recipient.to_string(),
                amount: Uint128::new(amount),
                nonce,
                signatures,
            },
        )
    }

    /// Digest returned by a `SendDigest` or `GovernanceDigest` query on `relay`.
    pub fn digest_on(&self, relay: &Addr, msg: &QueryMsg) -> [u8; 32] {
        let res: DigestResponse = self.app.wrap().query_wasm_smart(relay, msg).unwrap();
        res.digest.as_slice().try_into().unwrap()
    }

    /// Signatures approving `action` at the relay's current governance nonce.
    pub fn sign_governance(
        &self,
        signers: &[&TestSigner],
        action: &GovernanceAction,
    ) -> Vec<Binary> {
        let msg = QueryMsg::GovernanceDigest {
            action: action.clone(),
        };
        let digest = self.digest_on(&self.relay, &msg);
        signers.iter().map(|s| s.sign(&digest)).collect()
    }

    /// Second relay on `chain_id` with the same signers, token and owner.
    /// Lock/unlock mode with a threshold of one and the default admin fee.
    pub fn instantiate_relay(&mut self, chain_id: u64) -> Addr {
        let code_id = self.app.store_code(contract_relay());
        self.app
            .instantiate_contract(
                code_id,
                self.owner.clone(),
                &InstantiateMsg {
                    owner: self.owner.to_string(),
                    operators: vec![self.operator.to_string()],
                    signers: self.signers.iter().map(|s| s.hex()).collect(),
                    threshold: 1,
                    token: self.token.to_string(),
                    token_mode: TokenMode::LockUnlock,
                    chain_id,
                    admin_fee_bps: 500,
                    gas_fee: Uint128::zero(),
                    min_transfer_amount: Uint128::zero(),
                    bridge_wallet: None,
                },
                &[],
                "quorum-relay",
                Some(self.owner.to_string()),
            )
            .unwrap()
    }

    pub fn balance(&self, address: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.token,
                &Cw20QueryMsg::Balance {
                    address: address.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn fee_accumulator(&self) -> FeeAccumulator {
        self.query(&QueryMsg::FeeAccumulator {})
    }

    pub fn stats(&self) -> StatsResponse {
        self.query(&QueryMsg::Stats {})
    }

    /// Custom attribute `key` emitted by the relay itself.
    pub fn relay_attr(&self, res: &AppResponse, key: &str) -> Option<String> {
        res.events
            .iter()
            .filter(|e| {
                e.ty == "wasm"
                    && e.attributes
                        .iter()
                        .any(|a| a.key == "_contract_address" && a.value == self.relay.as_str())
            })
            .flat_map(|e| e.attributes.iter())
            .find(|a| a.key == key)
            .map(|a| a.value.clone())
    }
}

pub fn assert_err_contains(res: AnyResult<AppResponse>, needle: &str) {
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains(needle),
        "expected error containing {:?}, got: {}",
        needle,
        err_str
    );
}
