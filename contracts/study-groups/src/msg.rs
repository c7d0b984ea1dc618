use cosmwasm_std::{Addr, Decimal, Timestamp, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::governance::{ProposalKind, ProposalStatus};
use crate::state::{Achievement, GovernanceSettings, Member, TipCategory};

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct InstantiateMsg {
    /// May update the configuration and deactivate any group.
    /// Omit it to make the configuration immutable.
    pub admin: Option<String>,
    /// Denom of tokens staked, tipped and paid out by this contract.
    pub denom: String,
    /// Lowest stake a group may require
    pub min_stake: Uint128,
    /// Portion of the returned stake withheld when a member leaves, zero by default
    pub leave_penalty: Option<Decimal>,
    /// Receives withheld leave penalties. Required for a non-zero penalty.
    pub treasury: Option<String>,
    /// Price feed contract used to value stakes and rewards
    pub price_feed: Option<String>,
    /// Smallest single tip allowed
    pub min_tip: Option<Uint128>,
    /// Largest single tip allowed
    pub max_tip: Option<Uint128>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Change the admin
    UpdateAdmin { admin: Option<String> },
    /// Admin only. Fields left `None` keep their current value.
    UpdateConfig {
        min_stake: Option<Uint128>,
        leave_penalty: Option<Decimal>,
        treasury: Option<String>,
        price_feed: Option<String>,
        min_tip: Option<Uint128>,
        max_tip: Option<Uint128>,
    },
    /// Opens a new group. Its id is returned as response data (`CreateGroupResponse`).
    CreateGroup {
        name: String,
        subject: String,
        description: String,
        /// Amount every member has to send with `JoinGroup`
        stake: Uint128,
        max_members: u32,
        duration_days: u32,
        /// Defaults to `GovernanceSettings::default()`
        governance: Option<GovernanceSettings>,
    },
    /// Joins the group. Exactly the group stake has to be sent with the message.
    JoinGroup { group_id: u64 },
    /// Leaves the group, returning the stake (less the leave penalty) from the pool
    LeaveGroup { group_id: u64 },
    /// Once per UTC day
    CheckIn { group_id: u64 },
    /// Forwards the funds sent with this message to `recipient`
    Tip {
        group_id: u64,
        recipient: String,
        category: TipCategory,
    },
    CreateProposal {
        group_id: u64,
        kind: ProposalKind,
        description: String,
    },
    Vote { proposal_id: u64, approve: bool },
    /// Settles an expired proposal. Can be called by anyone.
    CloseProposal { proposal_id: u64 },
    /// Withdraws the sender's share of the reward pool after the group ended
    ClaimRewards { group_id: u64 },
    /// Stops further joins. Group creator or admin only.
    DeactivateGroup { group_id: u64 },
    UpdateProfile {
        username: String,
        email: Option<String>,
        #[serde(default)]
        bio: String,
        #[serde(default)]
        interests: Vec<String>,
    },
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    /// Returns Config
    Config {},
    /// Return AdminResponse
    Admin {},
    /// Returns GroupResponse
    Group { group_id: u64 },
    /// Returns GroupListResponse, ordered by id
    ListGroups {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Returns GroupListResponse with the groups `addr` belongs to
    ListMemberGroups {
        addr: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Returns MemberResponse
    Member { group_id: u64, addr: String },
    /// Returns IsMemberResponse
    IsMember { group_id: u64, addr: String },
    /// Returns CanCheckInResponse
    CanCheckIn { group_id: u64, addr: String },
    /// Returns RewardShareResponse
    RewardShare { group_id: u64, addr: String },
    /// Returns ProposalResponse
    Proposal { proposal_id: u64 },
    /// Returns ProposalListResponse
    ListProposals {
        group_id: u64,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    /// Returns VoteResponse
    Vote { proposal_id: u64, voter: String },
    /// Returns VoteListResponse
    ListVotes {
        proposal_id: u64,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Returns ProfileResponse
    Profile { addr: String },
    /// Returns UserStatsResponse
    UserStats { addr: String },
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct MigrateMsg {}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct CreateGroupResponse {
    pub group_id: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct CreateProposalResponse {
    pub proposal_id: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct GroupInfo {
    pub id: u64,
    pub name: String,
    pub subject: String,
    pub description: String,
    pub creator: Addr,
    pub stake: Uint128,
    pub max_members: u32,
    pub current_members: u32,
    pub reward_pool: Uint128,
    pub created_at: Timestamp,
    pub ends_at: Timestamp,
    pub duration_days: u32,
    pub is_active: bool,
    pub governance: GovernanceSettings,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct GroupResponse {
    pub group: GroupInfo,
    /// Members ordered by address
    pub members: Vec<Member>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct GroupListResponse {
    pub groups: Vec<GroupInfo>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct MemberResponse {
    pub member: Option<Member>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct IsMemberResponse {
    pub is_member: bool,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct CanCheckInResponse {
    pub can_check_in: bool,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Valuation {
    /// Price of the staked asset at join time
    pub price_at_join: Decimal,
    pub current_price: Decimal,
    /// The stake valued at `price_at_join`
    pub stake_value: Uint128,
    /// The share valued at `current_price`
    pub share_value: Uint128,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct RewardShareResponse {
    pub stake: Uint128,
    pub participation_score: u64,
    /// Sum of participation scores of all active members
    pub total_score: u64,
    pub reward_pool: Uint128,
    pub share: Uint128,
    /// Set when the group has a price feed and a join price was recorded
    pub valuation: Option<Valuation>,
    /// Whether the share can be withdrawn right now
    pub claimable: bool,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct ProposalResponse {
    pub id: u64,
    pub group_id: u64,
    pub proposer: Addr,
    pub kind: ProposalKind,
    pub description: String,
    pub votes_for: u32,
    pub votes_against: u32,
    pub required_threshold: u32,
    pub deadline: Timestamp,
    pub status: ProposalStatus,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct ProposalListResponse {
    pub proposals: Vec<ProposalResponse>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct VoteInfo {
    pub voter: String,
    pub approve: bool,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct VoteResponse {
    pub vote: Option<VoteInfo>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct VoteListResponse {
    pub votes: Vec<VoteInfo>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct ProfileResponse {
    pub addr: Addr,
    pub username: String,
    pub email: Option<String>,
    pub bio: String,
    pub interests: Vec<String>,
    pub joined_at: Timestamp,
    /// Groups the address is currently a member of
    pub joined_groups: Vec<u64>,
    pub groups_created: u32,
    pub tips_sent: Uint128,
    pub tips_sent_count: u32,
    pub proposals_voted: u32,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct UserStatsResponse {
    /// Groups the address is currently a member of
    pub groups_joined: u32,
    pub total_tips_received: Uint128,
    /// Best streak among current memberships
    pub best_streak: u32,
    pub total_check_ins: u32,
    pub achievements: Vec<Achievement>,
}
