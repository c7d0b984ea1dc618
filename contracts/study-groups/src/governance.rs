use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{
    to_binary, Addr, Decimal, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult, Storage,
    Uint128,
};
use cw_storage_plus::{Bound, Index, IndexList, IndexedMap, Item, Map, MultiIndex};
use cw_utils::maybe_addr;
use study_utils::Expiration;

use crate::error::ContractError;
use crate::msg::{
    CreateProposalResponse, ProposalListResponse, ProposalResponse, VoteInfo, VoteListResponse,
    VoteResponse,
};
use crate::rewards::active_member_count;
use crate::state::{load_group, update_profile, MEMBERS};

// we multiply by this when calculating the required threshold in order to round up properly
const PRECISION_FACTOR: u128 = 1_000_000_000;

pub const MAX_PROPOSAL_DESCRIPTION_LEN: usize = 1000;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ProposalKind {
    ChangeTopic,
    UpdateSchedule,
    AddResource,
    ModifyStake,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Executed,
    Rejected,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Proposal {
    pub group_id: u64,
    pub proposer: Addr,
    pub kind: ProposalKind,
    pub description: String,
    pub votes_for: u32,
    pub votes_against: u32,
    /// Approvals needed, fixed from the active member count when the proposal was created
    pub required_threshold: u32,
    pub deadline: Expiration,
    pub status: ProposalStatus,
}

impl Proposal {
    /// Outcome of the vote, only meaningful after the deadline
    pub fn is_passed(&self) -> bool {
        self.votes_for >= self.required_threshold && self.votes_for > self.votes_against
    }

    fn into_response(self, id: u64) -> ProposalResponse {
        ProposalResponse {
            id,
            group_id: self.group_id,
            proposer: self.proposer,
            kind: self.kind,
            description: self.description,
            votes_for: self.votes_for,
            votes_against: self.votes_against,
            required_threshold: self.required_threshold,
            deadline: self.deadline.time(),
            status: self.status,
        }
    }
}

pub struct ProposalIndexes<'a> {
    pub group: MultiIndex<'a, u64, Proposal, u64>,
}

impl<'a> IndexList<Proposal> for ProposalIndexes<'a> {
    fn get_indexes(&'_ self) -> Box<dyn Iterator<Item = &'_ dyn Index<Proposal>> + '_> {
        let v: Vec<&dyn Index<Proposal>> = vec![&self.group];
        Box::new(v.into_iter())
    }
}

pub fn proposals<'a>() -> IndexedMap<'a, u64, Proposal, ProposalIndexes<'a>> {
    let indexes = ProposalIndexes {
        group: MultiIndex::new(|proposal| proposal.group_id, "proposals", "proposals__group"),
    };
    IndexedMap::new("proposals", indexes)
}

pub const PROPOSAL_COUNT: Item<u64> = Item::new("proposal_count");
/// Cast ballots, `true` is an approval
pub const BALLOTS: Map<(u64, &Addr), bool> = Map::new("ballots");

pub fn next_proposal_id(store: &mut dyn Storage) -> StdResult<u64> {
    let id: u64 = PROPOSAL_COUNT.may_load(store)?.unwrap_or_default() + 1;
    PROPOSAL_COUNT.save(store, &id)?;
    Ok(id)
}

// we must *round up* here, as we need 2, not 1 approval to reach 60% of 3 members
pub fn required_threshold(members: u32, quorum: Decimal) -> u32 {
    let applied = quorum * Uint128::new(PRECISION_FACTOR * members as u128);
    ((applied.u128() + PRECISION_FACTOR - 1) / PRECISION_FACTOR) as u32
}

fn load_proposal(storage: &dyn Storage, proposal_id: u64) -> Result<Proposal, ContractError> {
    proposals()
        .may_load(storage, proposal_id)?
        .ok_or(ContractError::ProposalNotFound(proposal_id))
}

/// Fails unless `addr` is an active member of the group
fn ensure_active_member(
    storage: &dyn Storage,
    group_id: u64,
    addr: &Addr,
) -> Result<(), ContractError> {
    match MEMBERS.may_load(storage, (group_id, addr))? {
        Some(member) if member.is_active => Ok(()),
        Some(_) => Err(ContractError::MemberNotActive {}),
        None => Err(ContractError::NotMember {}),
    }
}

pub fn execute_create_proposal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    group_id: u64,
    kind: ProposalKind,
    description: String,
) -> Result<Response, ContractError> {
    let group = load_group(deps.storage, group_id)?;
    ensure_active_member(deps.storage, group_id, &info.sender)?;

    let description = description.trim().to_owned();
    if description.is_empty() {
        return Err(ContractError::EmptyField("description".to_owned()));
    }
    if description.chars().count() > MAX_PROPOSAL_DESCRIPTION_LEN {
        return Err(ContractError::TooLong {
            field: "description".to_owned(),
            max: MAX_PROPOSAL_DESCRIPTION_LEN,
        });
    }

    // members who already claimed their rewards no longer vote
    let eligible = active_member_count(deps.storage, group_id)?;
    let proposal = Proposal {
        group_id,
        proposer: info.sender.clone(),
        kind,
        description,
        votes_for: 0,
        votes_against: 0,
        required_threshold: required_threshold(eligible, group.governance.quorum),
        deadline: group.governance.voting_period().after(&env.block),
        status: ProposalStatus::Pending,
    };
    let id = next_proposal_id(deps.storage)?;
    proposals().save(deps.storage, id, &proposal)?;

    let resp = CreateProposalResponse { proposal_id: id };

    Ok(Response::new()
        .add_attribute("action", "create_proposal")
        .add_attribute("sender", info.sender)
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("proposal_id", id.to_string())
        .add_attribute("required_threshold", proposal.required_threshold.to_string())
        .set_data(to_binary(&resp)?))
}

pub fn execute_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: u64,
    approve: bool,
) -> Result<Response, ContractError> {
    // ensure proposal exists and can be voted on
    let mut proposal = load_proposal(deps.storage, proposal_id)?;
    if proposal.status != ProposalStatus::Pending {
        return Err(ContractError::ProposalNotPending {});
    }
    if proposal.deadline.is_expired(&env.block) {
        return Err(ContractError::VotingClosed {});
    }
    ensure_active_member(deps.storage, proposal.group_id, &info.sender)?;

    // cast vote if no vote previously cast
    BALLOTS.update(
        deps.storage,
        (proposal_id, &info.sender),
        |ballot| match ballot {
            Some(_) => Err(ContractError::AlreadyVoted {}),
            None => Ok(approve),
        },
    )?;

    if approve {
        proposal.votes_for += 1;
    } else {
        proposal.votes_against += 1;
    }
    proposals().save(deps.storage, proposal_id, &proposal)?;

    update_profile(deps.storage, &info.sender, env.block.time, |profile| {
        profile.proposals_voted += 1
    })?;

    Ok(Response::new()
        .add_attribute("action", "vote")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_string())
        .add_attribute("approve", approve.to_string())
        .add_attribute("votes_for", proposal.votes_for.to_string())
        .add_attribute("votes_against", proposal.votes_against.to_string()))
}

pub fn execute_close_proposal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: u64,
) -> Result<Response, ContractError> {
    // anyone can trigger this once the voting period is over
    let mut proposal = load_proposal(deps.storage, proposal_id)?;
    if proposal.status != ProposalStatus::Pending {
        return Err(ContractError::ProposalNotPending {});
    }
    if !proposal.deadline.is_expired(&env.block) {
        return Err(ContractError::VotingStillOpen {});
    }

    proposal.status = if proposal.is_passed() {
        ProposalStatus::Executed
    } else {
        ProposalStatus::Rejected
    };
    proposals().save(deps.storage, proposal_id, &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "close_proposal")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_string())
        .add_attribute("status", format!("{:?}", proposal.status)))
}

pub fn query_proposal(deps: Deps, proposal_id: u64) -> StdResult<ProposalResponse> {
    let proposal = proposals().load(deps.storage, proposal_id)?;
    Ok(proposal.into_response(proposal_id))
}

pub fn list_proposals(
    deps: Deps,
    group_id: u64,
    start_after: Option<u64>,
    limit: usize,
) -> StdResult<ProposalListResponse> {
    let start = start_after.map(Bound::exclusive);
    let props: StdResult<Vec<_>> = proposals()
        .idx
        .group
        .prefix(group_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (id, proposal) = item?;
            Ok(proposal.into_response(id))
        })
        .collect();

    Ok(ProposalListResponse { proposals: props? })
}

pub fn query_vote(deps: Deps, proposal_id: u64, voter: String) -> StdResult<VoteResponse> {
    let voter_addr = deps.api.addr_validate(&voter)?;
    let ballot = BALLOTS.may_load(deps.storage, (proposal_id, &voter_addr))?;
    let vote = ballot.map(|approve| VoteInfo { voter, approve });
    Ok(VoteResponse { vote })
}

pub fn list_votes(
    deps: Deps,
    proposal_id: u64,
    start_after: Option<String>,
    limit: usize,
) -> StdResult<VoteListResponse> {
    let addr = maybe_addr(deps.api, start_after)?;
    let start = addr.as_ref().map(Bound::exclusive);

    let votes: StdResult<Vec<_>> = BALLOTS
        .prefix(proposal_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (voter, approve) = item?;
            Ok(VoteInfo {
                voter: voter.into(),
                approve,
            })
        })
        .collect();

    Ok(VoteListResponse { votes: votes? })
}
