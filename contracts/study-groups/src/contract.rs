#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coins, to_binary, Addr, BankMsg, Binary, Decimal, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdResult, Uint128,
};

use cw2::set_contract_version;
use cw_storage_plus::Bound;
use cw_utils::{maybe_addr, must_pay};
use study_price::PriceFeedContract;
use study_utils::{day_index, ensure_from_older_version};

use crate::error::ContractError;
use crate::governance::{
    execute_close_proposal, execute_create_proposal, execute_vote, list_proposals, list_votes,
    query_proposal, query_vote,
};
use crate::msg::{
    CanCheckInResponse, CreateGroupResponse, ExecuteMsg, GroupInfo, GroupListResponse,
    GroupResponse, InstantiateMsg, IsMemberResponse, MemberResponse, MigrateMsg, ProfileResponse,
    QueryMsg, RewardShareResponse, UserStatsResponse, Valuation,
};
use crate::rewards::{reward_share, settle_leave, total_active_score, value_at};
use crate::state::{
    load_group, next_group_id, update_profile, Achievement, Config, GovernanceSettings, Group,
    Member, TipCategory, ADMIN, CONFIG, GROUPS, GROUP_NAMES, MAX_DESCRIPTION_LEN,
    MAX_DURATION_DAYS, MAX_MEMBERS, MAX_NAME_LEN, MAX_SUBJECT_LEN, MEMBERS, MEMBER_GROUPS,
    MIN_DURATION_DAYS, MIN_MEMBERS, PROFILES,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:study-groups";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const MAX_USERNAME_LEN: usize = 32;
const MAX_BIO_LEN: usize = 500;
const MAX_INTERESTS: usize = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let api = deps.api;
    ADMIN.set(deps.branch(), maybe_addr(api, msg.admin)?)?;

    let config = Config {
        denom: msg.denom,
        min_stake: msg.min_stake,
        leave_penalty: msg.leave_penalty.unwrap_or_default(),
        treasury: maybe_addr(api, msg.treasury)?,
        price_feed: maybe_addr(api, msg.price_feed)?.map(PriceFeedContract::new),
        min_tip: msg.min_tip,
        max_tip: msg.max_tip,
    };
    config.validate()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    use ExecuteMsg::*;

    let api = deps.api;
    match msg {
        UpdateAdmin { admin } => Ok(ADMIN.execute_update_admin(
            deps,
            info,
            admin.map(|admin| api.addr_validate(&admin)).transpose()?,
        )?),
        UpdateConfig {
            min_stake,
            leave_penalty,
            treasury,
            price_feed,
            min_tip,
            max_tip,
        } => execute_update_config(
            deps,
            info,
            ConfigUpdate {
                min_stake,
                leave_penalty,
                treasury,
                price_feed,
                min_tip,
                max_tip,
            },
        ),
        CreateGroup {
            name,
            subject,
            description,
            stake,
            max_members,
            duration_days,
            governance,
        } => execute_create_group(
            deps,
            env,
            info,
            GroupParams {
                name,
                subject,
                description,
                stake,
                max_members,
                duration_days,
                governance: governance.unwrap_or_default(),
            },
        ),
        JoinGroup { group_id } => execute_join_group(deps, env, info, group_id),
        LeaveGroup { group_id } => execute_leave_group(deps, env, info, group_id),
        CheckIn { group_id } => execute_check_in(deps, env, info, group_id),
        Tip {
            group_id,
            recipient,
            category,
        } => execute_tip(deps, env, info, group_id, recipient, category),
        CreateProposal {
            group_id,
            kind,
            description,
        } => execute_create_proposal(deps, env, info, group_id, kind, description),
        Vote {
            proposal_id,
            approve,
        } => execute_vote(deps, env, info, proposal_id, approve),
        CloseProposal { proposal_id } => execute_close_proposal(deps, env, info, proposal_id),
        ClaimRewards { group_id } => execute_claim_rewards(deps, env, info, group_id),
        DeactivateGroup { group_id } => execute_deactivate_group(deps, info, group_id),
        UpdateProfile {
            username,
            email,
            bio,
            interests,
        } => execute_update_profile(deps, env, info, username, email, bio, interests),
    }
}

/// Changes requested by `ExecuteMsg::UpdateConfig`, `None` keeps the current value
pub struct ConfigUpdate {
    pub min_stake: Option<Uint128>,
    pub leave_penalty: Option<Decimal>,
    pub treasury: Option<String>,
    pub price_feed: Option<String>,
    pub min_tip: Option<Uint128>,
    pub max_tip: Option<Uint128>,
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    update: ConfigUpdate,
) -> Result<Response, ContractError> {
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;

    let api = deps.api;
    let mut config = CONFIG.load(deps.storage)?;
    if let Some(min_stake) = update.min_stake {
        config.min_stake = min_stake;
    }
    if let Some(leave_penalty) = update.leave_penalty {
        config.leave_penalty = leave_penalty;
    }
    if let Some(treasury) = maybe_addr(api, update.treasury)? {
        config.treasury = Some(treasury);
    }
    if let Some(price_feed) = maybe_addr(api, update.price_feed)? {
        config.price_feed = Some(PriceFeedContract::new(price_feed));
    }
    if let Some(min_tip) = update.min_tip {
        config.min_tip = Some(min_tip);
    }
    if let Some(max_tip) = update.max_tip {
        config.max_tip = Some(max_tip);
    }
    config.validate()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("sender", info.sender))
}

/// Trims `value` and checks it is non-empty and at most `max` characters long
fn validate_text(field: &str, value: &str, max: usize) -> Result<String, ContractError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContractError::EmptyField(field.to_owned()));
    }
    if value.chars().count() > max {
        return Err(ContractError::TooLong {
            field: field.to_owned(),
            max,
        });
    }
    Ok(value.to_owned())
}

pub struct GroupParams {
    pub name: String,
    pub subject: String,
    pub description: String,
    pub stake: Uint128,
    pub max_members: u32,
    pub duration_days: u32,
    pub governance: GovernanceSettings,
}

pub fn execute_create_group(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: GroupParams,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let name = validate_text("name", &params.name, MAX_NAME_LEN)?;
    let subject = validate_text("subject", &params.subject, MAX_SUBJECT_LEN)?;
    let description = validate_text("description", &params.description, MAX_DESCRIPTION_LEN)?;

    if params.stake.is_zero() || params.stake < config.min_stake {
        return Err(ContractError::StakeTooLow {
            min: config.min_stake,
            stake: params.stake,
        });
    }
    if !(MIN_MEMBERS..=MAX_MEMBERS).contains(&params.max_members) {
        return Err(ContractError::InvalidMaxMembers {
            min: MIN_MEMBERS,
            max: MAX_MEMBERS,
            requested: params.max_members,
        });
    }
    if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&params.duration_days) {
        return Err(ContractError::InvalidDuration {
            min: MIN_DURATION_DAYS,
            max: MAX_DURATION_DAYS,
            requested: params.duration_days,
        });
    }
    params.governance.validate()?;

    let name_key = name.to_lowercase();
    if GROUP_NAMES.has(deps.storage, &name_key) {
        return Err(ContractError::NameTaken(name));
    }

    let id = next_group_id(deps.storage)?;
    let group = Group {
        id,
        name,
        subject,
        description,
        creator: info.sender.clone(),
        stake: params.stake,
        max_members: params.max_members,
        current_members: 0,
        reward_pool: Uint128::zero(),
        created_at: env.block.time,
        duration_days: params.duration_days,
        is_active: true,
        governance: params.governance,
    };
    GROUPS.save(deps.storage, id, &group)?;
    GROUP_NAMES.save(deps.storage, &name_key, &id)?;

    update_profile(deps.storage, &info.sender, env.block.time, |profile| {
        profile.groups_created += 1
    })?;

    let resp = CreateGroupResponse { group_id: id };

    Ok(Response::new()
        .add_attribute("action", "create_group")
        .add_attribute("sender", info.sender)
        .add_attribute("group_id", id.to_string())
        .add_attribute("name", group.name)
        .add_attribute("stake", group.stake.to_string())
        .set_data(to_binary(&resp)?))
}

pub fn execute_join_group(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    group_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut group = load_group(deps.storage, group_id)?;

    if MEMBERS.has(deps.storage, (group_id, &info.sender)) {
        return Err(ContractError::AlreadyMember {});
    }
    if !group.is_active {
        return Err(ContractError::GroupNotActive {});
    }
    if group.ends_at().is_expired(&env.block) {
        return Err(ContractError::GroupEnded {});
    }
    if group.is_full() {
        return Err(ContractError::GroupFull {});
    }

    let sent = must_pay(&info, &config.denom)?;
    if sent != group.stake {
        return Err(ContractError::StakeMismatch {
            expected: group.stake,
            sent,
        });
    }

    // an unavailable price only disables valuation for this membership
    let price_at_join = config
        .price_feed
        .and_then(|feed| feed.price(&deps.querier).ok())
        .map(|resp| resp.price);

    let mut member = Member::new(info.sender.clone(), sent, env.block.time, price_at_join);
    let profile = update_profile(deps.storage, &info.sender, env.block.time, |profile| {
        profile.groups_joined_total += 1
    })?;
    if profile.groups_joined_total == 1 {
        member.award(Achievement::FirstSteps);
    }

    MEMBERS.save(deps.storage, (group_id, &info.sender), &member)?;
    MEMBER_GROUPS.save(deps.storage, (&info.sender, group_id), &env.block.time)?;

    group.current_members += 1;
    group.reward_pool += sent;
    GROUPS.save(deps.storage, group_id, &group)?;

    Ok(Response::new()
        .add_attribute("action", "join_group")
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("member", info.sender)
        .add_attribute("stake", sent.to_string())
        .add_attribute("reward_pool", group.reward_pool.to_string()))
}

pub fn execute_leave_group(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    group_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut group = load_group(deps.storage, group_id)?;
    let member = MEMBERS
        .may_load(deps.storage, (group_id, &info.sender))?
        .ok_or(ContractError::NotMember {})?;
    if !member.is_active {
        return Err(ContractError::MemberNotActive {});
    }
    // once the group has ended the stake is only paid out through claim_rewards
    if group.ends_at().is_expired(&env.block) {
        return Err(ContractError::GroupEnded {});
    }

    let settlement = settle_leave(group.reward_pool, member.stake, config.leave_penalty);
    group.reward_pool -= settlement.released;
    group.current_members -= 1;
    GROUPS.save(deps.storage, group_id, &group)?;

    MEMBERS.remove(deps.storage, (group_id, &info.sender));
    MEMBER_GROUPS.remove(deps.storage, (&info.sender, group_id));

    let mut res = Response::new()
        .add_attribute("action", "leave_group")
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("member", info.sender.as_str())
        .add_attribute("refund", settlement.refund.to_string())
        .add_attribute("penalty", settlement.penalty.to_string())
        .add_attribute("reward_pool", group.reward_pool.to_string());

    if !settlement.refund.is_zero() {
        res = res.add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(settlement.refund.u128(), &config.denom),
        });
    }
    if !settlement.penalty.is_zero() {
        let treasury = config.treasury.ok_or(ContractError::MissingTreasury {})?;
        res = res.add_message(BankMsg::Send {
            to_address: treasury.to_string(),
            amount: coins(settlement.penalty.u128(), &config.denom),
        });
    }
    Ok(res)
}

pub fn execute_check_in(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    group_id: u64,
) -> Result<Response, ContractError> {
    let group = load_group(deps.storage, group_id)?;
    let mut member = MEMBERS
        .may_load(deps.storage, (group_id, &info.sender))?
        .ok_or(ContractError::NotMember {})?;
    if group.ends_at().is_expired(&env.block) {
        return Err(ContractError::GroupEnded {});
    }

    let streak = member.check_in(day_index(env.block.time))?;
    MEMBERS.save(deps.storage, (group_id, &info.sender), &member)?;

    Ok(Response::new()
        .add_attribute("action", "check_in")
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("member", info.sender)
        .add_attribute("streak", streak.to_string())
        .add_attribute("score", member.participation_score.to_string()))
}

pub fn execute_tip(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    group_id: u64,
    recipient: String,
    category: TipCategory,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    load_group(deps.storage, group_id)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    if recipient == info.sender {
        return Err(ContractError::SelfTip {});
    }
    match MEMBERS.may_load(deps.storage, (group_id, &info.sender))? {
        Some(sender) if sender.is_active => {}
        Some(_) => return Err(ContractError::MemberNotActive {}),
        None => return Err(ContractError::NotMember {}),
    }

    let amount = must_pay(&info, &config.denom)?;
    if let Some(min) = config.min_tip {
        if amount < min {
            return Err(ContractError::TipTooSmall { min, amount });
        }
    }
    if let Some(max) = config.max_tip {
        if amount > max {
            return Err(ContractError::TipTooLarge { max, amount });
        }
    }

    let mut receiver = MEMBERS
        .may_load(deps.storage, (group_id, &recipient))?
        .filter(|member| member.is_active)
        .ok_or(ContractError::InvalidRecipient {})?;
    receiver.receive_tip(amount, category);
    MEMBERS.save(deps.storage, (group_id, &recipient), &receiver)?;

    update_profile(deps.storage, &info.sender, env.block.time, |profile| {
        profile.tips_sent += amount;
        profile.tips_sent_count += 1;
    })?;

    Ok(Response::new()
        .add_attribute("action", "tip")
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("sender", info.sender)
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("category", format!("{:?}", category))
        .add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: coins(amount.u128(), config.denom),
        }))
}

pub fn execute_claim_rewards(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    group_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut group = load_group(deps.storage, group_id)?;
    let mut member = MEMBERS
        .may_load(deps.storage, (group_id, &info.sender))?
        .ok_or(ContractError::NotMember {})?;
    if !member.is_active {
        return Err(ContractError::MemberNotActive {});
    }

    let ends_at = group.ends_at();
    if !ends_at.is_expired(&env.block) {
        return Err(ContractError::GroupNotEnded(ends_at.time()));
    }

    let total = total_active_score(deps.storage, group_id)?;
    let share = reward_share(group.reward_pool, member.participation_score, total);
    if share.is_zero() {
        return Err(ContractError::NoRewards {});
    }

    // the claimed score leaves the total together with the share, so the rest stays untouched
    group.reward_pool -= share;
    member.is_active = false;
    GROUPS.save(deps.storage, group_id, &group)?;
    MEMBERS.save(deps.storage, (group_id, &info.sender), &member)?;

    Ok(Response::new()
        .add_attribute("action", "claim_rewards")
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("member", info.sender.as_str())
        .add_attribute("amount", share.to_string())
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(share.u128(), config.denom),
        }))
}

pub fn execute_deactivate_group(
    deps: DepsMut,
    info: MessageInfo,
    group_id: u64,
) -> Result<Response, ContractError> {
    let mut group = load_group(deps.storage, group_id)?;
    if group.creator != info.sender && !ADMIN.is_admin(deps.as_ref(), &info.sender)? {
        return Err(ContractError::Unauthorized(
            "Only the group creator or the admin can deactivate a group".to_owned(),
        ));
    }
    if !group.is_active {
        return Err(ContractError::GroupNotActive {});
    }

    group.is_active = false;
    GROUPS.save(deps.storage, group_id, &group)?;

    Ok(Response::new()
        .add_attribute("action", "deactivate_group")
        .add_attribute("group_id", group_id.to_string())
        .add_attribute("sender", info.sender))
}

pub fn execute_update_profile(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    username: String,
    email: Option<String>,
    bio: String,
    interests: Vec<String>,
) -> Result<Response, ContractError> {
    let username = validate_text("username", &username, MAX_USERNAME_LEN)?;
    let bio = bio.trim().to_owned();
    if bio.chars().count() > MAX_BIO_LEN {
        return Err(ContractError::TooLong {
            field: "bio".to_owned(),
            max: MAX_BIO_LEN,
        });
    }
    let interests: Vec<String> = interests
        .iter()
        .map(|interest| interest.trim())
        .filter(|interest| !interest.is_empty())
        .map(str::to_owned)
        .collect();
    if interests.len() > MAX_INTERESTS {
        return Err(ContractError::TooManyInterests(MAX_INTERESTS));
    }
    let email = email
        .map(|email| email.trim().to_owned())
        .filter(|email| !email.is_empty());

    update_profile(deps.storage, &info.sender, env.block.time, |profile| {
        profile.username = username;
        profile.email = email;
        profile.bio = bio;
        profile.interests = interests;
    })?;

    Ok(Response::new()
        .add_attribute("action", "update_profile")
        .add_attribute("sender", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Admin {} => to_binary(&ADMIN.query_admin(deps)?),
        QueryMsg::Group { group_id } => to_binary(&query_group(deps, group_id)?),
        QueryMsg::ListGroups { start_after, limit } => {
            to_binary(&list_groups(deps, start_after, limit)?)
        }
        QueryMsg::ListMemberGroups {
            addr,
            start_after,
            limit,
        } => to_binary(&list_member_groups(deps, addr, start_after, limit)?),
        QueryMsg::Member { group_id, addr } => {
            to_binary(&query_member(deps, group_id, addr)?)
        }
        QueryMsg::IsMember { group_id, addr } => {
            to_binary(&query_is_member(deps, group_id, addr)?)
        }
        QueryMsg::CanCheckIn { group_id, addr } => {
            to_binary(&query_can_check_in(deps, env, group_id, addr)?)
        }
        QueryMsg::RewardShare { group_id, addr } => {
            to_binary(&query_reward_share(deps, env, group_id, addr)?)
        }
        QueryMsg::Proposal { proposal_id } => to_binary(&query_proposal(deps, proposal_id)?),
        QueryMsg::ListProposals {
            group_id,
            start_after,
            limit,
        } => to_binary(&list_proposals(
            deps,
            group_id,
            start_after,
            calc_limit(limit),
        )?),
        QueryMsg::Vote { proposal_id, voter } => {
            to_binary(&query_vote(deps, proposal_id, voter)?)
        }
        QueryMsg::ListVotes {
            proposal_id,
            start_after,
            limit,
        } => to_binary(&list_votes(
            deps,
            proposal_id,
            start_after,
            calc_limit(limit),
        )?),
        QueryMsg::Profile { addr } => to_binary(&query_profile(deps, addr)?),
        QueryMsg::UserStats { addr } => to_binary(&query_user_stats(deps, addr)?),
    }
}

// settings for pagination
const MAX_LIMIT: u32 = 30;
const DEFAULT_LIMIT: u32 = 10;

fn calc_limit(request: Option<u32>) -> usize {
    request.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

fn group_info(group: Group) -> GroupInfo {
    GroupInfo {
        ends_at: group.ends_at().time(),
        id: group.id,
        name: group.name,
        subject: group.subject,
        description: group.description,
        creator: group.creator,
        stake: group.stake,
        max_members: group.max_members,
        current_members: group.current_members,
        reward_pool: group.reward_pool,
        created_at: group.created_at,
        duration_days: group.duration_days,
        is_active: group.is_active,
        governance: group.governance,
    }
}

fn query_group(deps: Deps, group_id: u64) -> StdResult<GroupResponse> {
    let group = GROUPS.load(deps.storage, group_id)?;
    let members = MEMBERS
        .prefix(group_id)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, member)| member))
        .collect::<StdResult<_>>()?;

    Ok(GroupResponse {
        group: group_info(group),
        members,
    })
}

fn list_groups(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<GroupListResponse> {
    let start = start_after.map(Bound::exclusive);
    let groups = GROUPS
        .range(deps.storage, start, None, Order::Ascending)
        .take(calc_limit(limit))
        .map(|item| item.map(|(_, group)| group_info(group)))
        .collect::<StdResult<_>>()?;

    Ok(GroupListResponse { groups })
}

fn list_member_groups(
    deps: Deps,
    addr: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<GroupListResponse> {
    let addr = deps.api.addr_validate(&addr)?;
    let start = start_after.map(Bound::exclusive);
    let groups = MEMBER_GROUPS
        .prefix(&addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(calc_limit(limit))
        .map(|group_id| -> StdResult<_> {
            let group = GROUPS.load(deps.storage, group_id?)?;
            Ok(group_info(group))
        })
        .collect::<StdResult<_>>()?;

    Ok(GroupListResponse { groups })
}

fn query_member(deps: Deps, group_id: u64, addr: String) -> StdResult<MemberResponse> {
    let addr = deps.api.addr_validate(&addr)?;
    let member = MEMBERS.may_load(deps.storage, (group_id, &addr))?;
    Ok(MemberResponse { member })
}

fn query_is_member(deps: Deps, group_id: u64, addr: String) -> StdResult<IsMemberResponse> {
    let addr = deps.api.addr_validate(&addr)?;
    Ok(IsMemberResponse {
        is_member: MEMBERS.has(deps.storage, (group_id, &addr)),
    })
}

fn query_can_check_in(
    deps: Deps,
    env: Env,
    group_id: u64,
    addr: String,
) -> StdResult<CanCheckInResponse> {
    let addr = deps.api.addr_validate(&addr)?;
    let group = GROUPS.load(deps.storage, group_id)?;
    let can_check_in = match MEMBERS.may_load(deps.storage, (group_id, &addr))? {
        Some(member) => {
            !group.ends_at().is_expired(&env.block)
                && member.can_check_in(day_index(env.block.time))
        }
        None => false,
    };
    Ok(CanCheckInResponse { can_check_in })
}

fn query_reward_share(
    deps: Deps,
    env: Env,
    group_id: u64,
    addr: String,
) -> StdResult<RewardShareResponse> {
    let addr = deps.api.addr_validate(&addr)?;
    let config = CONFIG.load(deps.storage)?;
    let group = GROUPS.load(deps.storage, group_id)?;
    let member = MEMBERS.load(deps.storage, (group_id, &addr))?;

    let total_score = total_active_score(deps.storage, group_id)?;
    let share = if member.is_active {
        reward_share(group.reward_pool, member.participation_score, total_score)
    } else {
        Uint128::zero()
    };

    let current_price = config
        .price_feed
        .and_then(|feed| feed.price(&deps.querier).ok())
        .map(|resp| resp.price);
    let valuation = member
        .price_at_join
        .zip(current_price)
        .map(|(price_at_join, current_price)| Valuation {
            price_at_join,
            current_price,
            stake_value: value_at(member.stake, price_at_join),
            share_value: value_at(share, current_price),
        });

    Ok(RewardShareResponse {
        stake: member.stake,
        participation_score: member.participation_score,
        total_score,
        reward_pool: group.reward_pool,
        share,
        valuation,
        claimable: !share.is_zero() && group.ends_at().is_expired(&env.block),
    })
}

/// Memberships of `addr`, ordered by group id
fn memberships(deps: Deps, addr: &Addr) -> StdResult<Vec<Member>> {
    MEMBER_GROUPS
        .prefix(addr)
        .keys(deps.storage, None, None, Order::Ascending)
        .map(|group_id| -> StdResult<Member> {
            MEMBERS.load(deps.storage, (group_id?, addr))
        })
        .collect()
}

fn query_profile(deps: Deps, addr: String) -> StdResult<ProfileResponse> {
    let addr = deps.api.addr_validate(&addr)?;
    let profile = PROFILES.load(deps.storage, &addr)?;
    let joined_groups = MEMBER_GROUPS
        .prefix(&addr)
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;

    Ok(ProfileResponse {
        addr,
        username: profile.username,
        email: profile.email,
        bio: profile.bio,
        interests: profile.interests,
        joined_at: profile.joined_at,
        joined_groups,
        groups_created: profile.groups_created,
        tips_sent: profile.tips_sent,
        tips_sent_count: profile.tips_sent_count,
        proposals_voted: profile.proposals_voted,
    })
}

fn query_user_stats(deps: Deps, addr: String) -> StdResult<UserStatsResponse> {
    let addr = deps.api.addr_validate(&addr)?;
    let members = memberships(deps, &addr)?;

    let mut achievements: Vec<Achievement> = vec![];
    let earned = members
        .iter()
        .flat_map(|member| member.achievements.iter().copied())
        .chain(
            PROFILES
                .may_load(deps.storage, &addr)?
                .map(|profile| profile.achievements())
                .unwrap_or_default(),
        );
    for achievement in earned {
        if !achievements.contains(&achievement) {
            achievements.push(achievement);
        }
    }

    Ok(UserStatsResponse {
        groups_joined: members.len() as u32,
        total_tips_received: members.iter().map(|member| member.tips_received).sum(),
        best_streak: members
            .iter()
            .map(|member| member.current_streak)
            .max()
            .unwrap_or_default(),
        total_check_ins: members.iter().map(|member| member.check_in_count).sum(),
        achievements,
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new())
}
