use super::*;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .security_admin_service
        .permissions(&user)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn assign_role_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((role_id, permission_id)): Path<(i32, i32)>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .assign_permission(&user, RoleId::new(role_id), PermissionId::new(permission_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_role_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((role_id, permission_id)): Path<(i32, i32)>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .remove_permission(&user, RoleId::new(role_id), PermissionId::new(permission_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
