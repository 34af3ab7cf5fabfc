//! Allow-list of emitters whose impression syncs are accepted.
//!
//! Each chain has at most one trusted emitter. A VAA from any other (chain, address) pair is
//! rejected before its payload is looked at.

use cosmwasm_std::{Binary, StdResult, Storage};

use crate::{error::ContractError, state::TRUSTED_EMITTERS};

/// Length of a wormhole universal address.
pub const EMITTER_ADDRESS_LEN: usize = 32;

pub fn is_trusted(storage: &dyn Storage, chain: u16, address: &[u8]) -> StdResult<bool> {
    Ok(TRUSTED_EMITTERS
        .may_load(storage, chain)?
        .map_or(false, |trusted| trusted.as_slice() == address))
}

/// Sets the trusted emitter for `chain`, replacing any previous one.
pub fn set_trusted_emitter(
    storage: &mut dyn Storage,
    chain: u16,
    address: &Binary,
) -> Result<(), ContractError> {
    if address.len() != EMITTER_ADDRESS_LEN {
        return Err(ContractError::InvalidEmitterAddress(address.len()));
    }

    TRUSTED_EMITTERS.save(storage, chain, address)?;
    Ok(())
}
