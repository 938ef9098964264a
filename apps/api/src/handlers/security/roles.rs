use super::*;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PagedResponse<RoleResponse>>> {
    let roles = state
        .security_admin_service
        .roles(&user)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(PagedResponse::paginate(roles, &query)))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_id): Path<i32>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .security_admin_service
        .role(&user, RoleId::new(role_id))
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .security_admin_service
        .create_role(
            &user,
            CreateRoleInput {
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_id): Path<i32>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .security_admin_service
        .update_role(
            &user,
            RoleId::new(role_id),
            payload.name,
            payload.description,
        )
        .await?;

    // Reload so the response carries the permission set.
    let role = state.security_admin_service.role(&user, role.id()).await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_id): Path<i32>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .delete_role(&user, RoleId::new(role_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
