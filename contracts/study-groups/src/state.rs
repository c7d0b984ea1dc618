use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Decimal, StdResult, Storage, Timestamp, Uint128};
use cw_controllers::Admin;
use cw_storage_plus::{Item, Map};
use study_price::PriceFeedContract;
use study_utils::{Duration, Expiration};

use crate::error::ContractError;

pub const MIN_MEMBERS: u32 = 2;
pub const MAX_MEMBERS: u32 = 50;
pub const MIN_DURATION_DAYS: u32 = 7;
pub const MAX_DURATION_DAYS: u32 = 365;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_SUBJECT_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Points for a single daily check-in
pub const CHECK_IN_POINTS: u64 = 10;
/// Extra points for every check-in made on a streak of `STREAK_ACHIEVEMENT` days or more
pub const STREAK_BONUS_POINTS: u64 = 20;
/// Streak length earning `Achievement::ConsistentLearner`
pub const STREAK_ACHIEVEMENT: u32 = 7;
/// Tips received in one group earning `Achievement::PopularChoice`
pub const POPULAR_TIPS: u32 = 50;

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Config {
    /// Native denom used for stakes, tips and payouts
    pub denom: String,
    /// Lowest stake a group may require
    pub min_stake: Uint128,
    /// Portion of the returned stake withheld when leaving a group
    pub leave_penalty: Decimal,
    /// Receives withheld leave penalties
    pub treasury: Option<Addr>,
    /// Source of the underlying asset price, recorded at join for profit/loss reporting
    pub price_feed: Option<PriceFeedContract>,
    /// Lower bound for a single tip, any non-zero amount if `None`
    pub min_tip: Option<Uint128>,
    /// Upper bound for a single tip, unbounded if `None`
    pub max_tip: Option<Uint128>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.denom.trim().is_empty() {
            return Err(ContractError::EmptyField("denom".to_owned()));
        }
        if self.leave_penalty > Decimal::one() {
            return Err(ContractError::InvalidPenalty(self.leave_penalty));
        }
        if !self.leave_penalty.is_zero() && self.treasury.is_none() {
            return Err(ContractError::MissingTreasury {});
        }
        if let (Some(min), Some(max)) = (self.min_tip, self.max_tip) {
            if min > max {
                return Err(ContractError::InvalidTipLimits { min, max });
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct GovernanceSettings {
    /// Length of voting period in days.
    pub voting_period: u32,
    /// Share of current members whose approval a proposal needs (0.0-1.0]
    pub quorum: Decimal,
    /// Participation score a member is expected to hold before proposing.
    /// Informational, not enforced.
    pub proposal_threshold: u64,
}

impl Default for GovernanceSettings {
    fn default() -> Self {
        GovernanceSettings {
            voting_period: 7,
            quorum: Decimal::percent(60),
            proposal_threshold: 10,
        }
    }
}

impl GovernanceSettings {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.quorum.is_zero() || self.quorum > Decimal::one() {
            return Err(ContractError::InvalidQuorum(self.quorum));
        }
        if self.voting_period == 0 || self.voting_period > 365 {
            return Err(ContractError::InvalidVotingPeriod(self.voting_period));
        }
        Ok(())
    }

    pub fn voting_period(&self) -> Duration {
        Duration::days(self.voting_period)
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub subject: String,
    pub description: String,
    pub creator: Addr,
    /// Exact amount every member stakes on join
    pub stake: Uint128,
    pub max_members: u32,
    pub current_members: u32,
    /// Stakes held for the group, less refunds and claimed rewards
    pub reward_pool: Uint128,
    pub created_at: Timestamp,
    pub duration_days: u32,
    pub is_active: bool,
    pub governance: GovernanceSettings,
}

impl Group {
    pub fn ends_at(&self) -> Expiration {
        Duration::days(self.duration_days).after_time(self.created_at)
    }

    pub fn is_full(&self) -> bool {
        self.current_members >= self.max_members
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TipCategory {
    Helpful,
    Knowledgeable,
    Motivational,
    Collaborative,
}

impl TipCategory {
    /// Participation points the recipient earns
    pub fn points(self) -> u64 {
        match self {
            TipCategory::Helpful => 15,
            TipCategory::Knowledgeable => 20,
            TipCategory::Motivational => 10,
            TipCategory::Collaborative => 12,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Joined a first study group
    FirstSteps,
    /// Reached a 7-day check-in streak
    ConsistentLearner,
    /// Received 50 tips in a group
    PopularChoice,
    /// Sent 10 tips
    Helper,
    /// Created a study group
    GroupLeader,
    /// Voted on 10 proposals
    DemocracyAdvocate,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Member {
    pub addr: Addr,
    /// Always the group's stake at the time of joining
    pub stake: Uint128,
    pub check_in_count: u32,
    pub current_streak: u32,
    pub tips_received: Uint128,
    pub tips_received_count: u32,
    pub participation_score: u64,
    pub joined_at: Timestamp,
    /// Cleared once the member claimed rewards
    pub is_active: bool,
    pub achievements: Vec<Achievement>,
    /// Day index (see `study_utils::day_index`) of the last check-in
    pub last_check_in: Option<u64>,
    /// Price of the staked asset when joining, if a feed is configured
    pub price_at_join: Option<Decimal>,
}

impl Member {
    pub fn new(
        addr: Addr,
        stake: Uint128,
        joined_at: Timestamp,
        price_at_join: Option<Decimal>,
    ) -> Self {
        Member {
            addr,
            stake,
            check_in_count: 0,
            current_streak: 0,
            tips_received: Uint128::zero(),
            tips_received_count: 0,
            participation_score: 0,
            joined_at,
            is_active: true,
            achievements: vec![],
            last_check_in: None,
            price_at_join,
        }
    }

    pub fn can_check_in(&self, today: u64) -> bool {
        self.is_active && self.last_check_in.map_or(true, |last| last < today)
    }

    /// Records a check-in on day `today` and returns the new streak.
    /// The streak only continues if the previous check-in was on the day before.
    pub fn check_in(&mut self, today: u64) -> Result<u32, ContractError> {
        if !self.is_active {
            return Err(ContractError::MemberNotActive {});
        }
        if !self.can_check_in(today) {
            return Err(ContractError::AlreadyCheckedIn {});
        }

        self.current_streak = match self.last_check_in {
            Some(last) if last + 1 == today => self.current_streak + 1,
            _ => 1,
        };
        self.check_in_count += 1;
        self.last_check_in = Some(today);
        self.participation_score += CHECK_IN_POINTS;

        if self.current_streak >= STREAK_ACHIEVEMENT {
            self.participation_score += STREAK_BONUS_POINTS;
            self.award(Achievement::ConsistentLearner);
        }
        Ok(self.current_streak)
    }

    pub fn receive_tip(&mut self, amount: Uint128, category: TipCategory) {
        self.tips_received += amount;
        self.tips_received_count += 1;
        self.participation_score += category.points();

        if self.tips_received_count >= POPULAR_TIPS {
            self.award(Achievement::PopularChoice);
        }
    }

    /// Adds the achievement unless already earned. Returns whether it was new.
    pub fn award(&mut self, achievement: Achievement) -> bool {
        if self.achievements.contains(&achievement) {
            return false;
        }
        self.achievements.push(achievement);
        true
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
pub struct Profile {
    pub username: String,
    pub email: Option<String>,
    pub bio: String,
    pub interests: Vec<String>,
    pub joined_at: Timestamp,
    /// Groups ever joined, including ones already left
    pub groups_joined_total: u32,
    pub groups_created: u32,
    pub tips_sent: Uint128,
    pub tips_sent_count: u32,
    pub proposals_voted: u32,
}

impl Profile {
    pub fn new(joined_at: Timestamp) -> Self {
        Profile {
            username: String::new(),
            email: None,
            bio: String::new(),
            interests: vec![],
            joined_at,
            groups_joined_total: 0,
            groups_created: 0,
            tips_sent: Uint128::zero(),
            tips_sent_count: 0,
            proposals_voted: 0,
        }
    }

    /// Achievements tracked on the profile rather than on a membership
    pub fn achievements(&self) -> Vec<Achievement> {
        let mut earned = vec![];
        if self.tips_sent_count >= 10 {
            earned.push(Achievement::Helper);
        }
        if self.groups_created > 0 {
            earned.push(Achievement::GroupLeader);
        }
        if self.proposals_voted >= 10 {
            earned.push(Achievement::DemocracyAdvocate);
        }
        earned
    }
}

pub const ADMIN: Admin = Admin::new("admin");
pub const CONFIG: Item<Config> = Item::new("config");

pub const GROUP_COUNT: Item<u64> = Item::new("group_count");
pub const GROUPS: Map<u64, Group> = Map::new("groups");
/// Lowercased group names, keeps names unique regardless of case
pub const GROUP_NAMES: Map<&str, u64> = Map::new("group_names");

pub const MEMBERS: Map<(u64, &Addr), Member> = Map::new("members");
/// Reverse index of `MEMBERS`: groups an address belongs to, with the join time
pub const MEMBER_GROUPS: Map<(&Addr, u64), Timestamp> = Map::new("member_groups");

pub const PROFILES: Map<&Addr, Profile> = Map::new("profiles");

pub fn load_group(store: &dyn Storage, group_id: u64) -> Result<Group, ContractError> {
    GROUPS
        .may_load(store, group_id)?
        .ok_or(ContractError::GroupNotFound(group_id))
}

pub fn next_group_id(store: &mut dyn Storage) -> StdResult<u64> {
    let id: u64 = GROUP_COUNT.may_load(store)?.unwrap_or_default() + 1;
    GROUP_COUNT.save(store, &id)?;
    Ok(id)
}

/// Applies `action` to the profile of `addr`, creating an empty one first if needed.
pub fn update_profile<F>(
    store: &mut dyn Storage,
    addr: &Addr,
    now: Timestamp,
    action: F,
) -> StdResult<Profile>
where
    F: FnOnce(&mut Profile),
{
    PROFILES.update(store, addr, |profile| -> StdResult<_> {
        let mut profile = profile.unwrap_or_else(|| Profile::new(now));
        action(&mut profile);
        Ok(profile)
    })
}
