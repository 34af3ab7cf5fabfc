use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

/// Maximum age, in seconds, of an attested block time before an update is rejected as stale.
pub const DEFAULT_STALENESS_TOLERANCE: u64 = 300;

pub const CONFIG: Item<Config> = Item::new("config");

// chain id -> impression record, including the home chain
pub const CHAIN_RECORDS: Map<u16, ChainRecord> = Map::new("chain_records");

// Foreign chains in registration order. Always equal to the keys of `CHAIN_RECORDS` minus the
// home chain.
pub const FOREIGN_CHAIN_IDS: Item<Vec<u16>> = Item::new("foreign_chain_ids");

// chain id -> the only emitter address on that chain allowed to publish impression syncs
pub const TRUSTED_EMITTERS: Map<u16, Binary> = Map::new("trusted_emitters");

#[cw_serde]
pub struct Config {
    /// The only address allowed to register chains and emitters.
    pub owner: Addr,

    /// Address of the wormhole core bridge contract used to verify VAAs.
    pub wormhole_contract: Addr,

    /// The wormhole id of the chain this contract is deployed on.
    pub home_chain_id: u16,

    pub staleness_tolerance: u64,
}

#[cw_serde]
#[derive(Default)]
pub struct ChainRecord {
    pub chain_id: u16,
    pub impressions_count: u64,
    /// Last campaign tracked locally. Unused for foreign records.
    pub campaign_id: u64,
    pub block_num: u64,
    /// Seconds since UNIX epoch.
    pub block_time: u64,
}

impl ChainRecord {
    pub const fn new(chain_id: u16) -> Self {
        Self {
            chain_id,
            impressions_count: 0,
            campaign_id: 0,
            block_num: 0,
            block_time: 0,
        }
    }
}

/// Seeds the zeroed home record and an empty foreign chain list.
pub fn init_records(storage: &mut dyn Storage, home_chain_id: u16) -> StdResult<()> {
    CHAIN_RECORDS.save(storage, home_chain_id, &ChainRecord::new(home_chain_id))?;
    FOREIGN_CHAIN_IDS.save(storage, &Vec::new())
}

/// Adds a zeroed record for `chain` and appends it to the foreign chain list. Returns `false`
/// without touching storage if a record for `chain` already exists.
pub fn register_chain(storage: &mut dyn Storage, chain: u16) -> StdResult<bool> {
    if CHAIN_RECORDS.has(storage, chain) {
        return Ok(false);
    }

    CHAIN_RECORDS.save(storage, chain, &ChainRecord::new(chain))?;

    let mut ids = foreign_chain_ids(storage)?;
    ids.push(chain);
    FOREIGN_CHAIN_IDS.save(storage, &ids)?;

    Ok(true)
}

pub fn load_record(storage: &dyn Storage, chain: u16) -> Result<ChainRecord, ContractError> {
    CHAIN_RECORDS
        .may_load(storage, chain)?
        .ok_or(ContractError::UnknownChain(chain))
}

/// Overwrites the record for `chain`. Records are never created here.
pub fn save_record(
    storage: &mut dyn Storage,
    chain: u16,
    record: &ChainRecord,
) -> Result<(), ContractError> {
    if !CHAIN_RECORDS.has(storage, chain) {
        return Err(ContractError::UnknownChain(chain));
    }

    CHAIN_RECORDS.save(storage, chain, record)?;
    Ok(())
}

pub fn foreign_chain_ids(storage: &dyn Storage) -> StdResult<Vec<u16>> {
    FOREIGN_CHAIN_IDS
        .may_load(storage)
        .map(Option::unwrap_or_default)
}
