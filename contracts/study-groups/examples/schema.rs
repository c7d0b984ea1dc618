use std::env::current_dir;
use std::fs::create_dir_all;

use cosmwasm_schema::{export_schema, export_schema_with_title, remove_schemas, schema_for};

use study_groups::msg::{
    CanCheckInResponse, CreateGroupResponse, CreateProposalResponse, ExecuteMsg, GroupListResponse,
    GroupResponse, InstantiateMsg, IsMemberResponse, MemberResponse, MigrateMsg, ProfileResponse,
    ProposalListResponse, ProposalResponse, QueryMsg, RewardShareResponse, UserStatsResponse,
    VoteListResponse, VoteResponse,
};
use study_groups::state::Config;

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema_with_title(&schema_for!(ExecuteMsg), &out_dir, "ExecuteMsg");
    export_schema_with_title(&schema_for!(QueryMsg), &out_dir, "QueryMsg");
    export_schema(&schema_for!(MigrateMsg), &out_dir);
    export_schema(&schema_for!(Config), &out_dir);

    export_schema(&schema_for!(CreateGroupResponse), &out_dir);
    export_schema(&schema_for!(CreateProposalResponse), &out_dir);
    export_schema(&schema_for!(GroupResponse), &out_dir);
    export_schema(&schema_for!(GroupListResponse), &out_dir);
    export_schema(&schema_for!(MemberResponse), &out_dir);
    export_schema(&schema_for!(IsMemberResponse), &out_dir);
    export_schema(&schema_for!(CanCheckInResponse), &out_dir);
    export_schema(&schema_for!(RewardShareResponse), &out_dir);
    export_schema(&schema_for!(ProposalResponse), &out_dir);
    export_schema(&schema_for!(ProposalListResponse), &out_dir);
    export_schema(&schema_for!(VoteResponse), &out_dir);
    export_schema(&schema_for!(VoteListResponse), &out_dir);
    export_schema(&schema_for!(ProfileResponse), &out_dir);
    export_schema(&schema_for!(UserStatsResponse), &out_dir);
}
