use cosmwasm_std::{BlockInfo, Event, Storage};

use crate::{
    error::ContractError,
    state::{load_record, save_record, ChainRecord},
};

/// Counts one impression on the home chain and stamps the record with the current block.
pub fn track_impression(
    storage: &mut dyn Storage,
    home_chain_id: u16,
    block: &BlockInfo,
    campaign_id: u64,
) -> Result<Event, ContractError> {
    let mut record = load_record(storage, home_chain_id)?;
    record.campaign_id = campaign_id;
    bump(&mut record, block);
    save_record(storage, home_chain_id, &record)?;

    Ok(Event::new("ImpressionTracked")
        .add_attribute("chain_id", home_chain_id.to_string())
        .add_attribute("campaign_id", campaign_id.to_string()))
}

/// Same as tracking an impression, minus the campaign: receiving a sync counts as local
/// activity. Leaves `campaign_id` untouched.
pub fn advance_home(
    storage: &mut dyn Storage,
    home_chain_id: u16,
    block: &BlockInfo,
) -> Result<ChainRecord, ContractError> {
    let mut record = load_record(storage, home_chain_id)?;
    bump(&mut record, block);
    save_record(storage, home_chain_id, &record)?;

    Ok(record)
}

fn bump(record: &mut ChainRecord, block: &BlockInfo) {
    record.impressions_count = record.impressions_count.saturating_add(1);
    record.block_num = block.height;
    record.block_time = block.time.seconds();
}
