#![allow(dead_code)]

use std::collections::BTreeSet;

use anyhow::{anyhow, ensure, Context};
use cosmwasm_std::{
    from_json, testing::MockQuerier, to_json_binary, Addr, Binary, ContractResult, Deps, DepsMut,
    Empty, Env, MessageInfo, Response, StdError, StdResult, SystemError, SystemResult, WasmQuery,
};
use cw_impressions::{
    contract,
    msg::{
        AllChainRecordsResponse, CampaignIdResponse, ConfigResponse, ExecuteMsg,
        ForeignChainIdsResponse, ImpressionsCountResponse, InstantiateMsg, QueryMsg,
        TrustedEmitter, TrustedEmitterResponse,
    },
    state::ChainRecord,
    wormhole::{CoreBridgeQueryMsg, ParsedVaa},
};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use impressions_sdk::{ChainUpdate, Message};
use k256::ecdsa::{recoverable, signature::Signer, SigningKey};
use serde::Serialize;
use serde_wormhole::RawMessage;
use wormhole_sdk::{
    vaa::{digest, Body, Header, Signature},
    Address, Chain,
};

pub const OWNER: &str = "owner";
pub const USER: &str = "user";

pub const HOME_CHAIN: u16 = 21;
pub const EMITTER_CHAIN: Chain = Chain::Ethereum;
pub const EMITTER: Address = Address([0xe1; 32]);

pub fn guardian_keys() -> Vec<SigningKey> {
    (1..=7u8)
        .map(|i| SigningKey::from_bytes(&[i; 32]).unwrap())
        .collect()
}

pub fn quorum(num_guardians: usize) -> usize {
    num_guardians * 2 / 3 + 1
}

/// Signs `data` with the first `count` guardians.
pub fn sign(data: &[u8], count: usize) -> Vec<Signature> {
    let d = digest(data).unwrap();
    guardian_keys()
        .iter()
        .take(count)
        .enumerate()
        .map(|(idx, g)| {
            let sig: recoverable::Signature = g.sign(&d.hash[..]);
            Signature {
                index: idx as u8,
                signature: sig.as_ref().try_into().unwrap(),
            }
        })
        .collect()
}

pub fn sign_vaa_body_with<P: Serialize>(body: &Body<P>, signers: usize) -> Binary {
    let data = serde_wormhole::to_vec(body).unwrap();
    let header = Header {
        version: 1,
        guardian_set_index: 0,
        signatures: sign(&data, signers),
    };

    serde_wormhole::to_vec(&(header, body)).map(From::from).unwrap()
}

pub fn sign_vaa_body<P: Serialize>(body: &Body<P>) -> Binary {
    sign_vaa_body_with(body, guardian_keys().len())
}

pub fn update(chain: u16, impressions_count: u64, block_num: u64, block_time: u64) -> ChainUpdate {
    ChainUpdate {
        chain: Chain::from(chain),
        impressions_count,
        block_num,
        block_time,
    }
}

pub fn sync_body(sequence: u64, updates: Vec<ChainUpdate>) -> Body<Message> {
    Body {
        timestamp: 1,
        nonce: 0,
        emitter_chain: EMITTER_CHAIN,
        emitter_address: EMITTER,
        sequence,
        consistency_level: 32,
        payload: Message::Sync { updates },
    }
}

pub fn sync_vaa(sequence: u64, updates: Vec<ChainUpdate>) -> Binary {
    sign_vaa_body(&sync_body(sequence, updates))
}

/// Checks guardian signatures the way the core bridge does and returns the parsed VAA.
pub fn verify_vaa(vaa: &[u8]) -> anyhow::Result<ParsedVaa> {
    let (header, data) = serde_wormhole::from_slice::<(Header, &RawMessage)>(vaa)
        .context("failed to parse VAA header")?;
    ensure!(header.version == 1, "unsupported VAA version");
    ensure!(header.guardian_set_index == 0, "invalid guardian set");

    let d = digest(data).context("unable to create digest of vaa body")?;
    let guardians = guardian_keys();
    let mut signers = BTreeSet::new();
    for s in &header.signatures {
        let g = guardians
            .get(s.index as usize)
            .ok_or_else(|| anyhow!("invalid guardian index"))?;
        let sig = recoverable::Signature::try_from(&s.signature[..])
            .context("failed to decode signature")?;
        let verifying_key = sig
            .recover_verifying_key_from_digest_bytes(&d.secp256k_hash.into())
            .context("failed to recover verifying key")?;
        ensure!(
            g.verifying_key() == verifying_key,
            "failed to verify signature"
        );
        signers.insert(s.index);
    }
    ensure!(signers.len() >= quorum(guardians.len()), "no quorum");

    let body = serde_wormhole::from_slice::<Body<&RawMessage>>(data)
        .context("failed to parse VAA body")?;

    Ok(ParsedVaa {
        version: header.version,
        guardian_set_index: header.guardian_set_index,
        timestamp: body.timestamp,
        nonce: body.nonce,
        len_signers: header.signatures.len() as u8,
        emitter_chain: body.emitter_chain.into(),
        emitter_address: body.emitter_address.0.to_vec(),
        sequence: body.sequence,
        consistency_level: body.consistency_level,
        payload: body.payload.to_vec(),
        hash: d.hash.to_vec(),
    })
}

/// Answers `VerifyVAA` queries on a mock querier, standing in for the core bridge contract.
pub fn mock_core_bridge(querier: &mut MockQuerier) {
    querier.update_wasm(|q| match q {
        WasmQuery::Smart { msg, .. } => {
            let res = from_json::<CoreBridgeQueryMsg>(msg)
                .map_err(anyhow::Error::from)
                .and_then(|m| match m {
                    CoreBridgeQueryMsg::VerifyVAA { vaa, .. } => verify_vaa(&vaa),
                });
            match res {
                Ok(parsed) => SystemResult::Ok(to_json_binary(&parsed).into()),
                Err(e) => SystemResult::Ok(ContractResult::Err(format!("{e:#}"))),
            }
        }
        _ => SystemResult::Err(SystemError::UnsupportedRequest {
            kind: "wasm".to_string(),
        }),
    });
}

fn core_instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::new())
}

fn core_execute(_deps: DepsMut, _env: Env, _info: MessageInfo, _msg: Empty) -> StdResult<Response> {
    Err(StdError::generic_err("core bridge does not accept messages"))
}

fn core_query(_deps: Deps, _env: Env, msg: CoreBridgeQueryMsg) -> StdResult<Binary> {
    match msg {
        CoreBridgeQueryMsg::VerifyVAA { vaa, .. } => verify_vaa(&vaa)
            .map_err(|e| StdError::generic_err(format!("{e:#}")))
            .and_then(|parsed| to_json_binary(&parsed)),
    }
}

pub struct Contract {
    addr: Addr,
    app: App,
}

impl Contract {
    pub fn addr(&self) -> Addr {
        self.addr.clone()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Moves the chain forward by one block and `seconds` of wall time.
    pub fn advance(&mut self, seconds: u64) {
        self.app.update_block(|b| {
            b.height += 1;
            b.time = b.time.plus_seconds(seconds);
        });
    }

    pub fn now(&self) -> u64 {
        self.app.block_info().time.seconds()
    }

    pub fn register_chain(&mut self, sender: &str, chain_id: u16) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.addr(),
            &ExecuteMsg::RegisterChain { chain_id },
            &[],
        )
    }

    pub fn register_emitter(
        &mut self,
        sender: &str,
        chain: u16,
        address: Binary,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.addr(),
            &ExecuteMsg::RegisterEmitter { chain, address },
            &[],
        )
    }

    pub fn track_impression(&mut self, campaign_id: u64) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(USER),
            self.addr(),
            &ExecuteMsg::TrackImpression { campaign_id },
            &[],
        )
    }

    pub fn submit_vaa(&mut self, vaa: Binary) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(USER),
            self.addr(),
            &ExecuteMsg::SubmitVaa { vaa },
            &[],
        )
    }

    pub fn query_impressions_count(&self) -> StdResult<u64> {
        self.app
            .wrap()
            .query_wasm_smart(self.addr(), &QueryMsg::ImpressionsCount {})
            .map(|r: ImpressionsCountResponse| r.impressions_count)
    }

    pub fn query_campaign_id(&self) -> StdResult<u64> {
        self.app
            .wrap()
            .query_wasm_smart(self.addr(), &QueryMsg::CampaignId {})
            .map(|r: CampaignIdResponse| r.campaign_id)
    }

    pub fn query_foreign_chain_ids(&self) -> StdResult<Vec<u16>> {
        self.app
            .wrap()
            .query_wasm_smart(self.addr(), &QueryMsg::ForeignChainIds {})
            .map(|r: ForeignChainIdsResponse| r.chain_ids)
    }

    pub fn query_chain_record(&self, chain_id: u16) -> StdResult<ChainRecord> {
        self.app
            .wrap()
            .query_wasm_smart(self.addr(), &QueryMsg::ChainRecord { chain_id })
    }

    pub fn query_all_chain_records(&self) -> StdResult<Vec<ChainRecord>> {
        self.app
            .wrap()
            .query_wasm_smart(self.addr(), &QueryMsg::AllChainRecords {})
            .map(|r: AllChainRecordsResponse| r.records)
    }

    pub fn query_trusted_emitter(&self, chain: u16) -> StdResult<Binary> {
        self.app
            .wrap()
            .query_wasm_smart(self.addr(), &QueryMsg::TrustedEmitter { chain })
            .map(|r: TrustedEmitterResponse| r.address)
    }

    pub fn query_config(&self) -> StdResult<ConfigResponse> {
        self.app
            .wrap()
            .query_wasm_smart(self.addr(), &QueryMsg::Config {})
    }
}

/// Deploys a fake core bridge and an impressions contract that trusts [`EMITTER`] and tracks
/// `foreign` chains.
pub fn proper_instantiate(foreign: &[u16]) -> Contract {
    let mut app = App::default();

    let core_code_id = app.store_code(Box::new(ContractWrapper::new(
        core_execute,
        core_instantiate,
        core_query,
    )));
    let core = app
        .instantiate_contract(
            core_code_id,
            Addr::unchecked(OWNER),
            &Empty {},
            &[],
            "core bridge",
            None,
        )
        .unwrap();

    let code_id = app.store_code(Box::new(ContractWrapper::new(
        contract::execute,
        contract::instantiate,
        contract::query,
    )));
    let addr = app
        .instantiate_contract(
            code_id,
            Addr::unchecked(OWNER),
            &InstantiateMsg {
                wormhole_contract: core.to_string(),
                home_chain_id: HOME_CHAIN,
                trusted_emitters: vec![TrustedEmitter {
                    chain: EMITTER_CHAIN.into(),
                    address: Binary::from(EMITTER.0),
                }],
                staleness_tolerance: None,
            },
            &[],
            "impressions",
            Some(OWNER.into()),
        )
        .unwrap();

    let mut contract = Contract { addr, app };
    for &chain in foreign {
        contract.register_chain(OWNER, chain).unwrap();
    }

    contract
}
