use cosmwasm_std::Uint128;

use super::suite::SuiteBuilder;
use crate::error::ContractError;
use crate::msg::ExecuteMsg;
use crate::state::{Achievement, TipCategory};

#[test]
fn update_profile() {
    let mut suite = SuiteBuilder::new().build();
    let joined_at = suite.app.block_info().time;

    suite
        .update_profile(
            "alice",
            "  alice  ",
            "Learning in public",
            &["rust", " ", "  category theory "],
        )
        .unwrap();

    let profile = suite.profile("alice").unwrap();
    assert_eq!(profile.addr, "alice");
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.email, None);
    assert_eq!(profile.bio, "Learning in public");
    assert_eq!(profile.interests, vec!["rust", "category theory"]);
    assert_eq!(profile.joined_at, joined_at);
    assert!(profile.joined_groups.is_empty());

    // updating keeps the registration time
    suite.advance_days(3);
    suite
        .execute(
            "alice",
            &ExecuteMsg::UpdateProfile {
                username: "alice_b".to_owned(),
                email: Some("alice@example.com".to_owned()),
                bio: String::new(),
                interests: vec![],
            },
            &[],
        )
        .unwrap();
    let profile = suite.profile("alice").unwrap();
    assert_eq!(profile.username, "alice_b");
    assert_eq!(profile.email, Some("alice@example.com".to_owned()));
    assert_eq!(profile.bio, "");
    assert!(profile.interests.is_empty());
    assert_eq!(profile.joined_at, joined_at);
}

#[test]
fn invalid_profiles_rejected() {
    let mut suite = SuiteBuilder::new().build();

    let err = suite.update_profile("alice", "   ", "", &[]).unwrap_err();
    assert_eq!(
        ContractError::EmptyField("username".to_owned()),
        err.downcast().unwrap()
    );

    let err = suite
        .update_profile("alice", &"a".repeat(33), "", &[])
        .unwrap_err();
    assert_eq!(
        ContractError::TooLong {
            field: "username".to_owned(),
            max: 32
        },
        err.downcast().unwrap()
    );

    let err = suite
        .update_profile("alice", "alice", &"b".repeat(501), &[])
        .unwrap_err();
    assert_eq!(
        ContractError::TooLong {
            field: "bio".to_owned(),
            max: 500
        },
        err.downcast().unwrap()
    );

    let interests = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"];
    let err = suite
        .update_profile("alice", "alice", "", &interests)
        .unwrap_err();
    assert_eq!(
        ContractError::TooManyInterests(10),
        err.downcast().unwrap()
    );

    // no profile was created along the way
    suite.profile("alice").unwrap_err();
}

#[test]
fn profile_created_on_first_activity() {
    let mut suite = SuiteBuilder::new().with_funds("alice", 1000).build();
    let group_id = suite.create_group("bob", "Music Theory", 100, 5, 30).unwrap();

    suite.profile("alice").unwrap_err();
    suite.join_group("alice", group_id, 100).unwrap();

    let profile = suite.profile("alice").unwrap();
    assert_eq!(profile.username, "");
    assert_eq!(profile.joined_groups, vec![group_id]);
    assert_eq!(profile.groups_created, 0);
    assert_eq!(suite.profile("bob").unwrap().groups_created, 1);
}

#[test]
fn stats_across_groups() {
    let mut suite = SuiteBuilder::new()
        .with_funds("alice", 1000)
        .with_funds("bob", 1000)
        .build();
    let first = suite.create_group("carol", "Harmony", 100, 5, 30).unwrap();
    let second = suite.create_group("carol", "Counterpoint", 100, 5, 30).unwrap();
    for group_id in [first, second] {
        suite.join_group("alice", group_id, 100).unwrap();
        suite.join_group("bob", group_id, 100).unwrap();
    }

    // three days in a row in the first group, a single day in the second one
    for _ in 0..3 {
        suite.check_in("alice", first).unwrap();
        suite.advance_days(1);
    }
    suite.check_in("alice", second).unwrap();

    suite
        .tip("bob", first, "alice", TipCategory::Helpful, 30)
        .unwrap();
    suite
        .tip("bob", second, "alice", TipCategory::Knowledgeable, 12)
        .unwrap();

    let stats = suite.user_stats("alice").unwrap();
    assert_eq!(stats.groups_joined, 2);
    assert_eq!(stats.total_tips_received, Uint128::new(42));
    assert_eq!(stats.best_streak, 3);
    assert_eq!(stats.total_check_ins, 4);
    // only the very first membership comes with an achievement
    assert_eq!(stats.achievements, vec![Achievement::FirstSteps]);

    let profile = suite.profile("alice").unwrap();
    assert_eq!(profile.joined_groups, vec![first, second]);
    let profile = suite.profile("bob").unwrap();
    assert_eq!(profile.tips_sent, Uint128::new(42));
    assert_eq!(profile.tips_sent_count, 2);

    // leaving drops the membership from the stats
    suite.leave_group("alice", second).unwrap();
    let stats = suite.user_stats("alice").unwrap();
    assert_eq!(stats.groups_joined, 1);
    assert_eq!(stats.total_check_ins, 3);
}

#[test]
fn stats_for_strangers() {
    let suite = SuiteBuilder::new().build();

    let stats = suite.user_stats("nobody").unwrap();
    assert_eq!(stats.groups_joined, 0);
    assert_eq!(stats.total_tips_received, Uint128::zero());
    assert_eq!(stats.best_streak, 0);
    assert_eq!(stats.total_check_ins, 0);
    assert!(stats.achievements.is_empty());
}
