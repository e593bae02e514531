mod handler;
mod model;

pub use handler::{
    approve_request, cancel_request, close_group, create_group, get_group, list_created_groups,
    list_joined_groups, list_open_groups, reject_request, request_to_join,
};
pub use model::{
    CreateGroupRequest, CreateGroupResponse, CreatedQuery, GroupDetail, GroupListResponse,
    MembershipRequest, SuccessResponse,
};
