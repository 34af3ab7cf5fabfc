#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use anyhow::Context;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
};
use cw2::{get_contract_version, set_contract_version};
use semver::Version;

use crate::{
    error::ContractError,
    execute::{register_chain, register_emitter, submit_vaa, track_impression},
    msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg},
    query::{
        query_all_chain_records, query_campaign_id, query_chain_record, query_config,
        query_foreign_chain_ids, query_impressions_count, query_trusted_emitter,
    },
    state::{init_records, Config, CONFIG, DEFAULT_STALENESS_TOLERANCE},
    trust::set_trusted_emitter,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-impressions";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let cfg = Config {
        owner: info.sender,
        wormhole_contract: deps.api.addr_validate(&msg.wormhole_contract)?,
        home_chain_id: msg.home_chain_id,
        staleness_tolerance: msg
            .staleness_tolerance
            .unwrap_or(DEFAULT_STALENESS_TOLERANCE),
    };
    CONFIG.save(deps.storage, &cfg)?;

    init_records(deps.storage, cfg.home_chain_id)?;

    for emitter in &msg.trusted_emitters {
        set_trusted_emitter(deps.storage, emitter.chain, &emitter.address)?;
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", cfg.owner)
        .add_attribute("home_chain_id", cfg.home_chain_id.to_string())
        .add_attribute("version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, anyhow::Error> {
    let ver = get_contract_version(deps.storage)?;
    // ensure we are migrating from an allowed contract
    if ver.contract != CONTRACT_NAME {
        return Err(StdError::generic_err("Can only upgrade from same type").into());
    }

    // ensure we are migrating to a newer version
    let saved_version =
        Version::parse(&ver.version).context("could not parse saved contract version")?;
    let new_version =
        Version::parse(CONTRACT_VERSION).context("could not parse new contract version")?;
    if saved_version >= new_version {
        return Err(StdError::generic_err("Cannot upgrade from a newer or equal version").into());
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", ver.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterChain { chain_id } => register_chain(deps, info, chain_id),
        ExecuteMsg::RegisterEmitter { chain, address } => {
            register_emitter(deps, info, chain, address)
        }
        ExecuteMsg::TrackImpression { campaign_id } => track_impression(deps, env, campaign_id),
        ExecuteMsg::SubmitVaa { vaa } => submit_vaa(deps, env, vaa),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ImpressionsCount {} => to_json_binary(&query_impressions_count(deps)?),
        QueryMsg::CampaignId {} => to_json_binary(&query_campaign_id(deps)?),
        QueryMsg::ForeignChainIds {} => to_json_binary(&query_foreign_chain_ids(deps)?),
        QueryMsg::ChainRecord { chain_id } => to_json_binary(&query_chain_record(deps, chain_id)?),
        QueryMsg::AllChainRecords {} => to_json_binary(&query_all_chain_records(deps)?),
        QueryMsg::TrustedEmitter { chain } => to_json_binary(&query_trusted_emitter(deps, chain)?),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
    }
}
