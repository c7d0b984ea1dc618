use cosmwasm_std::{Decimal, Order, StdResult, Storage, Uint128};

use crate::state::MEMBERS;

/// Sum of participation scores of the group's active members
pub fn total_active_score(storage: &dyn Storage, group_id: u64) -> StdResult<u64> {
    MEMBERS
        .prefix(group_id)
        .range(storage, None, None, Order::Ascending)
        .try_fold(0u64, |total, item| -> StdResult<u64> {
            let (_, member) = item?;
            Ok(if member.is_active {
                total + member.participation_score
            } else {
                total
            })
        })
}

/// Number of members still active in the group, i.e. not yet paid out
pub fn active_member_count(storage: &dyn Storage, group_id: u64) -> StdResult<u32> {
    MEMBERS
        .prefix(group_id)
        .range(storage, None, None, Order::Ascending)
        .try_fold(0u32, |count, item| -> StdResult<u32> {
            let (_, member) = item?;
            Ok(if member.is_active { count + 1 } else { count })
        })
}

/// Share of `pool` earned by `score` out of `total`. Rounds down, so the shares of all members
/// never exceed the pool. Nothing is earned while nobody has participated.
pub fn reward_share(pool: Uint128, score: u64, total: u64) -> Uint128 {
    if total == 0 {
        return Uint128::zero();
    }
    pool.multiply_ratio(score, total)
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LeaveSettlement {
    /// Removed from the reward pool
    pub released: Uint128,
    /// Sent back to the leaving member
    pub refund: Uint128,
    /// Sent to the treasury
    pub penalty: Uint128,
}

/// Splits the stake of a leaving member. The pool never goes below zero, so at most
/// what is left in the pool is released.
pub fn settle_leave(pool: Uint128, stake: Uint128, penalty: Decimal) -> LeaveSettlement {
    let released = std::cmp::min(pool, stake);
    let penalty = released * penalty;
    LeaveSettlement {
        released,
        refund: released - penalty,
        penalty,
    }
}

/// `amount` valued at `price`
pub fn value_at(amount: Uint128, price: Decimal) -> Uint128 {
    amount * price
}
