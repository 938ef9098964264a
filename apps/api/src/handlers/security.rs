use advancely_application::CreateRoleInput;
use advancely_core::{PermissionId, RoleId, UserId, UserIdentity};
use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::{
    CreateRoleRequest, PageQuery, PagedResponse, PermissionResponse, RoleAssignmentResponse,
    RoleResponse, UpdateRoleRequest, UserRoleCollectionResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod permissions;
mod roles;
mod user_roles;

pub use permissions::{
    assign_role_permission_handler, list_permissions_handler, remove_role_permission_handler,
};
pub use roles::{
    create_role_handler, delete_role_handler, get_role_handler, list_roles_handler,
    update_role_handler,
};
pub use user_roles::{
    assign_user_role_handler, current_user_roles_handler, list_role_assignments_handler,
    remove_user_role_handler,
};
