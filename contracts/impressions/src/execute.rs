use cosmwasm_std::{Addr, Binary, DepsMut, Env, MessageInfo, Response, Storage};

use crate::{
    error::ContractError,
    reconcile::reconcile,
    state::{self, Config, CONFIG},
    tracker, trust,
    wormhole::verify_vaa,
};

fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<Config, ContractError> {
    let cfg = CONFIG.load(storage)?;
    if cfg.owner != *sender {
        return Err(ContractError::InvalidCaller);
    }

    Ok(cfg)
}

pub fn register_chain(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let added = state::register_chain(deps.storage, chain_id)?;

    Ok(Response::new()
        .add_attribute("action", "register_chain")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("added", added.to_string()))
}

pub fn register_emitter(
    deps: DepsMut,
    info: MessageInfo,
    chain: u16,
    address: Binary,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    trust::set_trusted_emitter(deps.storage, chain, &address)?;

    Ok(Response::new()
        .add_attribute("action", "register_emitter")
        .add_attribute("chain", chain.to_string())
        .add_attribute("emitter_address", hex::encode(address.as_slice())))
}

pub fn track_impression(
    deps: DepsMut,
    env: Env,
    campaign_id: u64,
) -> Result<Response, ContractError> {
    let cfg = CONFIG.load(deps.storage)?;
    let evt = tracker::track_impression(deps.storage, cfg.home_chain_id, &env.block, campaign_id)?;

    Ok(Response::new()
        .add_attribute("action", "track_impression")
        .add_event(evt))
}

pub fn submit_vaa(deps: DepsMut, env: Env, vaa: Binary) -> Result<Response, ContractError> {
    let parsed = verify_vaa(deps.as_ref(), env.block.time.seconds(), &vaa)?;
    let evts = reconcile(deps.storage, &env.block, &parsed)?;

    deps.api.debug(&format!(
        "impressions: applied {} updates from chain {} sequence {}",
        evts.len(),
        parsed.emitter_chain,
        parsed.sequence
    ));

    Ok(Response::new()
        .add_attribute("action", "submit_vaa")
        .add_attribute("emitter_chain", parsed.emitter_chain.to_string())
        .add_attribute("sequence", parsed.sequence.to_string())
        .add_events(evts))
}
