//! Interface to the wormhole core bridge contract, which verifies guardian signatures on our
//! behalf.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, Deps, QueryRequest, WasmQuery};

use crate::{error::ContractError, state::CONFIG};

#[cw_serde]
pub enum CoreBridgeQueryMsg {
    VerifyVAA { vaa: Binary, block_time: u64 },
}

/// A VAA whose signatures have been checked by the core bridge.
#[cw_serde]
pub struct ParsedVaa {
    pub version: u8,
    pub guardian_set_index: u32,
    pub timestamp: u32,
    pub nonce: u32,
    pub len_signers: u8,

    pub emitter_chain: u16,
    pub emitter_address: Vec<u8>,
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: Vec<u8>,

    pub hash: Vec<u8>,
}

/// Asks the core bridge to verify `vaa`. Nothing from a VAA that fails verification is returned.
pub fn verify_vaa(deps: Deps, block_time: u64, vaa: &Binary) -> Result<ParsedVaa, ContractError> {
    let cfg = CONFIG.load(deps.storage)?;
    let msg = to_json_binary(&CoreBridgeQueryMsg::VerifyVAA {
        vaa: vaa.clone(),
        block_time,
    })?;

    deps.querier
        .query(&QueryRequest::Wasm(WasmQuery::Smart {
            contract_addr: cfg.wormhole_contract.into_string(),
            msg,
        }))
        .map_err(|e| ContractError::InvalidAttestation(e.to_string()))
}
