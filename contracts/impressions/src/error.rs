use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("caller is not the contract owner")]
    InvalidCaller,

    #[error("unknown chain {0}")]
    UnknownChain(u16),

    #[error("untrusted emitter {address} on chain {chain}")]
    UntrustedEmitter { chain: u16, address: String },

    #[error("emitter address must be 32 bytes, got {0}")]
    InvalidEmitterAddress(usize),

    #[error("expected {expected} chain updates, found {found}")]
    UnexpectedResultLength { expected: usize, found: usize },

    #[error("chain {0} appears more than once in one sync")]
    DuplicateChain(u16),

    #[error("obsolete update for chain {chain}: block {incoming} is not newer than {stored}")]
    ObsoleteUpdate {
        chain: u16,
        stored: u64,
        incoming: u64,
    },

    #[error("stale update for chain {chain}: attested at {block_time}, current time {now}")]
    StaleUpdate { chain: u16, block_time: u64, now: u64 },

    #[error("failed to verify VAA: {0}")]
    InvalidAttestation(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<impressions_sdk::Error> for ContractError {
    fn from(e: impressions_sdk::Error) -> ContractError {
        ContractError::MalformedPayload(e.to_string())
    }
}
