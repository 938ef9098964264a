use super::*;

pub async fn current_user_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UserRoleCollectionResponse>> {
    let roles = state.security_admin_service.current_user_roles(&user).await?;

    Ok(Json(UserRoleCollectionResponse::from(roles)))
}

pub async fn list_role_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let assignments = state
        .security_admin_service
        .role_assignments(&user)
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn assign_user_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((user_id, role_id)): Path<(Uuid, i32)>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .assign_role_to_user(&user, RoleId::new(role_id), UserId::from_uuid(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_user_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((user_id, role_id)): Path<(Uuid, i32)>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .remove_role_from_user(&user, RoleId::new(role_id), UserId::from_uuid(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
