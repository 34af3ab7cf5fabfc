use cosmwasm_std::{Deps, StdError, StdResult};

use crate::{
    msg::{
        AllChainRecordsResponse, CampaignIdResponse, ConfigResponse, ForeignChainIdsResponse,
        ImpressionsCountResponse, TrustedEmitterResponse,
    },
    state::{foreign_chain_ids, ChainRecord, CHAIN_RECORDS, CONFIG, TRUSTED_EMITTERS},
};

fn home_record(deps: Deps) -> StdResult<ChainRecord> {
    let cfg = CONFIG.load(deps.storage)?;
    CHAIN_RECORDS.load(deps.storage, cfg.home_chain_id)
}

pub fn query_impressions_count(deps: Deps) -> StdResult<ImpressionsCountResponse> {
    home_record(deps).map(|r| ImpressionsCountResponse {
        impressions_count: r.impressions_count,
    })
}

pub fn query_campaign_id(deps: Deps) -> StdResult<CampaignIdResponse> {
    home_record(deps).map(|r| CampaignIdResponse {
        campaign_id: r.campaign_id,
    })
}

pub fn query_foreign_chain_ids(deps: Deps) -> StdResult<ForeignChainIdsResponse> {
    foreign_chain_ids(deps.storage).map(|chain_ids| ForeignChainIdsResponse { chain_ids })
}

pub fn query_chain_record(deps: Deps, chain_id: u16) -> StdResult<ChainRecord> {
    CHAIN_RECORDS
        .may_load(deps.storage, chain_id)?
        .ok_or_else(|| StdError::not_found(format!("chain record for chain {chain_id}")))
}

pub fn query_all_chain_records(deps: Deps) -> StdResult<AllChainRecordsResponse> {
    let mut records = vec![home_record(deps)?];
    for chain in foreign_chain_ids(deps.storage)? {
        records.push(CHAIN_RECORDS.load(deps.storage, chain)?);
    }

    Ok(AllChainRecordsResponse { records })
}

pub fn query_trusted_emitter(deps: Deps, chain: u16) -> StdResult<TrustedEmitterResponse> {
    TRUSTED_EMITTERS
        .may_load(deps.storage, chain)?
        .map(|address| TrustedEmitterResponse { address })
        .ok_or_else(|| StdError::not_found(format!("trusted emitter for chain {chain}")))
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    CONFIG.load(deps.storage).map(|cfg| ConfigResponse {
        owner: cfg.owner,
        wormhole_contract: cfg.wormhole_contract,
        home_chain_id: cfg.home_chain_id,
        staleness_tolerance: cfg.staleness_tolerance,
    })
}
