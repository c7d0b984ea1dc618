use cosmwasm_std::{Decimal, StdError, Timestamp, Uint128};
use thiserror::Error;

use cw_controllers::AdminError;
use cw_utils::PaymentError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Field '{0}' must not be empty")]
    EmptyField(String),

    #[error("Field '{field}' is too long, at most {max} characters allowed")]
    TooLong { field: String, max: usize },

    #[error("Group name '{0}' is already taken")]
    NameTaken(String),

    #[error("Stake must be at least {min}, got {stake}")]
    StakeTooLow { min: Uint128, stake: Uint128 },

    #[error("Group must allow between {min} and {max} members, got {requested}")]
    InvalidMaxMembers { min: u32, max: u32, requested: u32 },

    #[error("Group must run between {min} and {max} days, got {requested}")]
    InvalidDuration { min: u32, max: u32, requested: u32 },

    #[error("Invalid voting quorum percentage, must be 0.01-1.0: {0}")]
    InvalidQuorum(Decimal),

    #[error("Invalid voting period, must be 1-365 days: {0}")]
    InvalidVotingPeriod(u32),

    #[error("Leave penalty must be at most 100%: {0}")]
    InvalidPenalty(Decimal),

    #[error("A treasury is required to collect a non-zero leave penalty")]
    MissingTreasury {},

    #[error("Group {0} not found")]
    GroupNotFound(u64),

    #[error("Group is not active")]
    GroupNotActive {},

    #[error("Group has already ended")]
    GroupEnded {},

    #[error("Group has not ended yet, rewards are locked until {0}")]
    GroupNotEnded(Timestamp),

    #[error("Group is full")]
    GroupFull {},

    #[error("Must stake exactly {expected}, sent {sent}")]
    StakeMismatch { expected: Uint128, sent: Uint128 },

    #[error("Already a member of this group")]
    AlreadyMember {},

    #[error("Not a member of this group")]
    NotMember {},

    #[error("Membership is no longer active")]
    MemberNotActive {},

    #[error("Already checked in today")]
    AlreadyCheckedIn {},

    #[error("Cannot tip yourself")]
    SelfTip {},

    #[error("Recipient is not an active member of this group")]
    InvalidRecipient {},

    #[error("Tip must be at least {min}, got {amount}")]
    TipTooSmall { min: Uint128, amount: Uint128 },

    #[error("Tip must be at most {max}, got {amount}")]
    TipTooLarge { max: Uint128, amount: Uint128 },

    #[error("Minimal tip {min} exceeds the maximal tip {max}")]
    InvalidTipLimits { min: Uint128, max: Uint128 },

    #[error("Proposal {0} not found")]
    ProposalNotFound(u64),

    #[error("Proposal is not pending")]
    ProposalNotPending {},

    #[error("Proposal voting period has ended")]
    VotingClosed {},

    #[error("Proposal must expire before you can close it")]
    VotingStillOpen {},

    #[error("Already voted on this proposal")]
    AlreadyVoted {},

    #[error("No rewards available")]
    NoRewards {},

    #[error("Too many interests, at most {0} allowed")]
    TooManyInterests(usize),
}
