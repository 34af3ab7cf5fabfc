use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

use crate::state::ChainRecord;

#[cw_serde]
pub struct InstantiateMsg {
    /// Address of the wormhole core bridge contract.
    pub wormhole_contract: String,

    /// The wormhole id of the chain this contract is deployed on.
    pub home_chain_id: u16,

    /// Emitters allowed to publish impression syncs, at most one per chain.
    pub trusted_emitters: Vec<TrustedEmitter>,

    /// Maximum age in seconds of an attested block time. Defaults to
    /// [`crate::state::DEFAULT_STALENESS_TOLERANCE`].
    pub staleness_tolerance: Option<u64>,
}

#[cw_serde]
pub struct TrustedEmitter {
    pub chain: u16,
    /// 32-byte wormhole universal address.
    pub address: Binary,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Start tracking a foreign chain. Owner only. Registering a chain that is already tracked
    /// does nothing.
    RegisterChain { chain_id: u16 },

    /// Set the trusted emitter for `chain`, replacing any previous one. Owner only.
    RegisterEmitter { chain: u16, address: Binary },

    /// Count one impression on this chain.
    TrackImpression { campaign_id: u64 },

    /// Submit a signed impression sync. Either every update in the VAA is applied or none are.
    SubmitVaa {
        /// VAA to submit. The VAA should be encoded in the standard wormhole
        /// wire format.
        vaa: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ImpressionsCountResponse)]
    ImpressionsCount {},
    #[returns(CampaignIdResponse)]
    CampaignId {},
    #[returns(ForeignChainIdsResponse)]
    ForeignChainIds {},
    #[returns(ChainRecord)]
    ChainRecord { chain_id: u16 },
    #[returns(AllChainRecordsResponse)]
    AllChainRecords {},
    #[returns(TrustedEmitterResponse)]
    TrustedEmitter { chain: u16 },
    #[returns(ConfigResponse)]
    Config {},
}

#[cw_serde]
pub struct ImpressionsCountResponse {
    pub impressions_count: u64,
}

#[cw_serde]
pub struct CampaignIdResponse {
    pub campaign_id: u64,
}

#[cw_serde]
pub struct ForeignChainIdsResponse {
    /// In registration order.
    pub chain_ids: Vec<u16>,
}

#[cw_serde]
pub struct AllChainRecordsResponse {
    /// The home record first, then foreign records in registration order.
    pub records: Vec<ChainRecord>,
}

#[cw_serde]
pub struct TrustedEmitterResponse {
    pub address: Binary,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub wormhole_contract: Addr,
    pub home_chain_id: u16,
    pub staleness_tolerance: u64,
}
