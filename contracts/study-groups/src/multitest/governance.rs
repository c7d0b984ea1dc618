use cosmwasm_std::{Addr, Decimal};

use super::suite::{Suite, SuiteBuilder};
use crate::error::ContractError;
use crate::governance::{ProposalKind, ProposalStatus};
use crate::msg::VoteInfo;
use crate::state::{Achievement, GovernanceSettings};

const MEMBERS: [&str; 3] = ["alice", "bob", "carol"];

fn setup_with(governance: impl Into<Option<GovernanceSettings>>) -> (Suite, u64) {
    let mut builder = SuiteBuilder::new();
    for member in MEMBERS.iter().chain(&["dave"]) {
        builder = builder.with_funds(member, 1000);
    }
    let mut suite = builder.build();

    let group_id = suite
        .create_group_with_governance("alice", "Economics", 100, 10, 60, governance)
        .unwrap();
    for member in MEMBERS {
        suite.join_group(member, group_id, 100).unwrap();
    }
    (suite, group_id)
}

fn setup() -> (Suite, u64) {
    setup_with(None)
}

#[test]
fn create_proposal() {
    let (mut suite, group_id) = setup();

    let proposal_id = suite
        .create_proposal(
            "bob",
            group_id,
            ProposalKind::ChangeTopic,
            "  Move on to game theory  ",
        )
        .unwrap();
    assert_eq!(proposal_id, 1);

    let proposal = suite.proposal(proposal_id).unwrap();
    assert_eq!(proposal.group_id, group_id);
    assert_eq!(proposal.proposer, Addr::unchecked("bob"));
    assert_eq!(proposal.kind, ProposalKind::ChangeTopic);
    assert_eq!(proposal.description, "Move on to game theory");
    assert_eq!(proposal.votes_for, 0);
    assert_eq!(proposal.votes_against, 0);
    // 60% of 3 members, rounded up
    assert_eq!(proposal.required_threshold, 2);
    assert_eq!(proposal.status, ProposalStatus::Pending);

    let created_at = suite.app.block_info().time;
    assert_eq!(proposal.deadline, created_at.plus_seconds(7 * 86_400));
}

#[test]
fn proposal_rejected_from_outsiders() {
    let (mut suite, group_id) = setup();

    let err = suite
        .create_proposal("dave", group_id, ProposalKind::AddResource, "Add my blog")
        .unwrap_err();
    assert_eq!(ContractError::NotMember {}, err.downcast().unwrap());

    let err = suite
        .create_proposal("alice", group_id, ProposalKind::AddResource, "   ")
        .unwrap_err();
    assert_eq!(
        ContractError::EmptyField("description".to_owned()),
        err.downcast().unwrap()
    );

    let err = suite
        .create_proposal("alice", 5, ProposalKind::AddResource, "Add a textbook")
        .unwrap_err();
    assert_eq!(ContractError::GroupNotFound(5), err.downcast().unwrap());

    assert!(suite.list_proposals(group_id).unwrap().is_empty());
}

#[test]
fn majority_executes_proposal() {
    let (mut suite, group_id) = setup();
    let proposal_id = suite
        .create_proposal("alice", group_id, ProposalKind::UpdateSchedule, "Meet on Fridays")
        .unwrap();

    suite.vote("alice", proposal_id, true).unwrap();
    suite.vote("bob", proposal_id, true).unwrap();
    suite.vote("carol", proposal_id, false).unwrap();

    let proposal = suite.proposal(proposal_id).unwrap();
    assert_eq!(proposal.votes_for, 2);
    assert_eq!(proposal.votes_against, 1);

    let err = suite.close_proposal("dave", proposal_id).unwrap_err();
    assert_eq!(ContractError::VotingStillOpen {}, err.downcast().unwrap());

    // anybody may close it once voting is over
    suite.advance_days(7);
    suite.close_proposal("dave", proposal_id).unwrap();
    assert_eq!(
        suite.proposal(proposal_id).unwrap().status,
        ProposalStatus::Executed
    );

    let err = suite.close_proposal("dave", proposal_id).unwrap_err();
    assert_eq!(ContractError::ProposalNotPending {}, err.downcast().unwrap());
}

#[test]
fn threshold_not_reached() {
    let (mut suite, group_id) = setup();
    let proposal_id = suite
        .create_proposal("alice", group_id, ProposalKind::ModifyStake, "Double the stake")
        .unwrap();

    // a single approval is below 60% of the group
    suite.vote("alice", proposal_id, true).unwrap();

    suite.advance_days(7);
    suite.close_proposal("alice", proposal_id).unwrap();
    assert_eq!(
        suite.proposal(proposal_id).unwrap().status,
        ProposalStatus::Rejected
    );

    let err = suite.vote("bob", proposal_id, true).unwrap_err();
    assert_eq!(ContractError::ProposalNotPending {}, err.downcast().unwrap());
}

#[test]
fn voting_rules() {
    let (mut suite, group_id) = setup();
    let proposal_id = suite
        .create_proposal("alice", group_id, ProposalKind::AddResource, "Add the lecture notes")
        .unwrap();

    suite.vote("bob", proposal_id, true).unwrap();
    let err = suite.vote("bob", proposal_id, false).unwrap_err();
    assert_eq!(ContractError::AlreadyVoted {}, err.downcast().unwrap());

    let err = suite.vote("dave", proposal_id, true).unwrap_err();
    assert_eq!(ContractError::NotMember {}, err.downcast().unwrap());

    let err = suite.vote("bob", proposal_id + 1, true).unwrap_err();
    assert_eq!(
        ContractError::ProposalNotFound(proposal_id + 1),
        err.downcast().unwrap()
    );

    // the deadline itself is already past the voting period
    suite.advance_days(7);
    let err = suite.vote("carol", proposal_id, true).unwrap_err();
    assert_eq!(ContractError::VotingClosed {}, err.downcast().unwrap());

    let proposal = suite.proposal(proposal_id).unwrap();
    assert_eq!(proposal.votes_for, 1);
    assert_eq!(proposal.votes_against, 0);
}

#[test]
fn threshold_fixed_at_creation() {
    let (mut suite, group_id) = setup();
    let proposal_id = suite
        .create_proposal("alice", group_id, ProposalKind::ChangeTopic, "Switch to macro")
        .unwrap();

    // newcomers may vote, but the bar stays where it was
    suite.join_group("dave", group_id, 100).unwrap();
    suite.vote("dave", proposal_id, true).unwrap();
    assert_eq!(suite.proposal(proposal_id).unwrap().required_threshold, 2);

    let later = suite
        .create_proposal("alice", group_id, ProposalKind::ChangeTopic, "Switch back")
        .unwrap();
    // 60% of 4 members is 2.4
    assert_eq!(suite.proposal(later).unwrap().required_threshold, 3);
}

#[test]
fn custom_voting_period() {
    let governance = GovernanceSettings {
        voting_period: 2,
        quorum: Decimal::percent(50),
        proposal_threshold: 0,
    };
    let (mut suite, group_id) = setup_with(governance);
    let proposal_id = suite
        .create_proposal("carol", group_id, ProposalKind::UpdateSchedule, "Meet twice a week")
        .unwrap();
    assert_eq!(suite.proposal(proposal_id).unwrap().required_threshold, 2);

    suite.vote("alice", proposal_id, true).unwrap();
    suite.advance_days(1);
    suite.vote("bob", proposal_id, true).unwrap();
    suite.advance_days(1);

    let err = suite.vote("carol", proposal_id, true).unwrap_err();
    assert_eq!(ContractError::VotingClosed {}, err.downcast().unwrap());
    suite.close_proposal("carol", proposal_id).unwrap();
    assert_eq!(
        suite.proposal(proposal_id).unwrap().status,
        ProposalStatus::Executed
    );
}

#[test]
fn query_proposals_and_votes() {
    let (mut suite, group_id) = setup();
    let other_group = suite.create_group("bob", "Finance", 100, 10, 60).unwrap();
    suite.join_group("bob", other_group, 100).unwrap();

    let first = suite
        .create_proposal("alice", group_id, ProposalKind::AddResource, "Add a reader")
        .unwrap();
    let elsewhere = suite
        .create_proposal("bob", other_group, ProposalKind::AddResource, "Add a podcast")
        .unwrap();
    let second = suite
        .create_proposal("bob", group_id, ProposalKind::ChangeTopic, "Labour markets")
        .unwrap();

    let ids: Vec<_> = suite
        .list_proposals(group_id)
        .unwrap()
        .into_iter()
        .map(|proposal| proposal.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
    let ids: Vec<_> = suite
        .list_proposals(other_group)
        .unwrap()
        .into_iter()
        .map(|proposal| proposal.id)
        .collect();
    assert_eq!(ids, vec![elsewhere]);

    suite.vote("carol", first, false).unwrap();
    suite.vote("alice", first, true).unwrap();
    assert_eq!(suite.ballot(first, "alice").unwrap(), Some(true));
    assert_eq!(suite.ballot(first, "carol").unwrap(), Some(false));
    assert_eq!(suite.ballot(first, "bob").unwrap(), None);
    assert_eq!(suite.ballot(second, "alice").unwrap(), None);

    assert_eq!(
        suite.list_votes(first).unwrap(),
        vec![
            VoteInfo {
                voter: "alice".to_owned(),
                approve: true
            },
            VoteInfo {
                voter: "carol".to_owned(),
                approve: false
            },
        ]
    );
    assert!(suite.list_votes(second).unwrap().is_empty());
}

#[test]
fn frequent_voter_earns_achievement() {
    let (mut suite, group_id) = setup();

    for i in 0..10 {
        let proposal_id = suite
            .create_proposal(
                "alice",
                group_id,
                ProposalKind::AddResource,
                &format!("Add chapter {}", i + 1),
            )
            .unwrap();
        suite.vote("bob", proposal_id, true).unwrap();

        let stats = suite.user_stats("bob").unwrap();
        assert_eq!(
            stats.achievements.contains(&Achievement::DemocracyAdvocate),
            i == 9
        );
    }

    assert_eq!(suite.profile("bob").unwrap().proposals_voted, 10);
    assert_eq!(suite.profile("alice").unwrap().proposals_voted, 0);
}

#[test]
fn threshold_counts_only_active_members() {
    let mut builder = SuiteBuilder::new();
    for member in ["alice", "bob", "carol", "dave"] {
        builder = builder.with_funds(member, 1000);
    }
    let mut suite = builder.build();
    let group_id = suite.create_group("alice", "Ethics", 100, 10, 7).unwrap();
    for member in ["alice", "bob", "carol", "dave"] {
        suite.join_group(member, group_id, 100).unwrap();
    }
    suite.check_in("alice", group_id).unwrap();
    suite.check_in("bob", group_id).unwrap();

    suite.advance_days(7);
    suite.claim_rewards("alice", group_id).unwrap();
    suite.claim_rewards("bob", group_id).unwrap();
    assert_eq!(suite.group(group_id).unwrap().group.current_members, 4);

    // 60% of the two members left able to vote, not of all four
    let proposal_id = suite
        .create_proposal("carol", group_id, ProposalKind::ChangeTopic, "Start a new term")
        .unwrap();
    assert_eq!(suite.proposal(proposal_id).unwrap().required_threshold, 2);

    let err = suite.vote("alice", proposal_id, true).unwrap_err();
    assert_eq!(ContractError::MemberNotActive {}, err.downcast().unwrap());
    suite.vote("carol", proposal_id, true).unwrap();
    suite.vote("dave", proposal_id, true).unwrap();

    suite.advance_days(7);
    suite.close_proposal("carol", proposal_id).unwrap();
    assert_eq!(
        suite.proposal(proposal_id).unwrap().status,
        ProposalStatus::Executed
    );
}
