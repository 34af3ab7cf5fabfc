//! Applies an impression sync from a verified VAA to the stored chain records.
//!
//! A sync must report every registered foreign chain exactly once. Each update is checked
//! against the record it replaces (strictly newer block number, attested time within the
//! staleness tolerance) and staged in memory. Storage is only written once the whole batch has
//! passed, so a rejected sync leaves every record as it was.

use std::collections::{btree_map::Entry, BTreeMap};

use cosmwasm_std::{BlockInfo, Event, Storage};
use impressions_sdk::ChainUpdate;

use crate::{
    error::ContractError,
    state::{self, ChainRecord, CONFIG},
    tracker, trust,
    wormhole::ParsedVaa,
};

/// Reconciles the records against the sync carried by `vaa`, returning one `ImpressionsUpdated`
/// event per applied update in payload order.
pub fn reconcile(
    storage: &mut dyn Storage,
    block: &BlockInfo,
    vaa: &ParsedVaa,
) -> Result<Vec<Event>, ContractError> {
    let cfg = CONFIG.load(storage)?;

    if !trust::is_trusted(storage, vaa.emitter_chain, &vaa.emitter_address)? {
        return Err(ContractError::UntrustedEmitter {
            chain: vaa.emitter_chain,
            address: hex::encode(&vaa.emitter_address),
        });
    }

    let updates = impressions_sdk::decode(&vaa.payload)?;

    let foreign = state::foreign_chain_ids(storage)?;
    if updates.len() != foreign.len() {
        return Err(ContractError::UnexpectedResultLength {
            expected: foreign.len(),
            found: updates.len(),
        });
    }

    let now = block.time.seconds();
    let mut staged = BTreeMap::<u16, ChainRecord>::new();
    let mut events = Vec::with_capacity(updates.len());
    for update in &updates {
        let chain = u16::from(update.chain);

        // The home chain is never in this list, so a sync can't overwrite our own record.
        if !foreign.contains(&chain) {
            return Err(ContractError::UnknownChain(chain));
        }

        // With the length check above, distinct chains mean the batch covers the whole set.
        let record = match staged.entry(chain) {
            Entry::Occupied(_) => return Err(ContractError::DuplicateChain(chain)),
            Entry::Vacant(e) => e.insert(state::load_record(storage, chain)?),
        };

        check_update(record, update, now, cfg.staleness_tolerance)?;

        record.impressions_count = update.impressions_count;
        record.block_num = update.block_num;
        record.block_time = update.block_time;

        events.push(
            Event::new("ImpressionsUpdated")
                .add_attribute("chain_id", chain.to_string())
                .add_attribute("impressions_count", update.impressions_count.to_string()),
        );
    }

    for (chain, record) in &staged {
        state::save_record(storage, *chain, record)?;
    }

    tracker::advance_home(storage, cfg.home_chain_id, block)?;

    Ok(events)
}

fn check_update(
    stored: &ChainRecord,
    update: &ChainUpdate,
    now: u64,
    tolerance: u64,
) -> Result<(), ContractError> {
    let chain = stored.chain_id;

    // A block time ahead of ours counts as zero elapsed.
    if now.saturating_sub(update.block_time) > tolerance {
        return Err(ContractError::StaleUpdate {
            chain,
            block_time: update.block_time,
            now,
        });
    }

    if update.block_num <= stored.block_num {
        return Err(ContractError::ObsoleteUpdate {
            chain,
            stored: stored.block_num,
            incoming: update.block_num,
        });
    }

    Ok(())
}
