use std::sync::Arc;

use advancely_core::{AppError, AppResult, PermissionId, RoleId, TenantId, UserId, UserIdentity};
use advancely_domain::{
    Permission, Role, RoleWithPermissions, SystemRole, UserRole, UserRoleCollection,
};
use async_trait::async_trait;

use crate::security_ports::{
    CreateRoleInput, PermissionCatalog, RoleAssignment, RoleRepository, RoleUpdate,
    UserRoleRepository,
};
use crate::{AuthorizationRepository, AuthorizationService, RoleStore};

use super::SecurityAdminService;

struct FixedAuthorizationRepository {
    permissions: Vec<String>,
}

#[async_trait]
impl AuthorizationRepository for FixedAuthorizationRepository {
    async fn user_roles(&self, user_id: UserId) -> AppResult<UserRoleCollection> {
        Ok(UserRoleCollection {
            user_id,
            roles: vec![UserRole {
                name: "Operator".to_owned(),
                is_system: false,
                permissions: self.permissions.clone(),
            }],
        })
    }
}

/// Store whose every call fails, so reaching it is observable.
struct UnreachableStore;

fn store_touched<T>() -> AppResult<T> {
    Err(AppError::Internal("store touched".to_owned()))
}

#[async_trait]
impl PermissionCatalog for UnreachableStore {
    async fn find_permission(&self, _permission_id: PermissionId) -> AppResult<Option<Permission>> {
        store_touched()
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        store_touched()
    }
}

#[async_trait]
impl RoleRepository for UnreachableStore {
    async fn find_role(
        &self,
        _role_id: RoleId,
        _tenant_id: Option<TenantId>,
    ) -> AppResult<Option<RoleWithPermissions>> {
        store_touched()
    }

    async fn find_system_role(&self, _role: SystemRole) -> AppResult<Option<Role>> {
        store_touched()
    }

    async fn list_roles(&self, _tenant_id: TenantId) -> AppResult<Vec<RoleWithPermissions>> {
        store_touched()
    }

    async fn create_role(&self, _tenant_id: TenantId, _input: CreateRoleInput) -> AppResult<Role> {
        store_touched()
    }

    async fn update_custom_role(&self, _update: RoleUpdate) -> AppResult<Option<Role>> {
        store_touched()
    }

    async fn delete_custom_role(&self, _tenant_id: TenantId, _role_id: RoleId) -> AppResult<bool> {
        store_touched()
    }

    async fn insert_role_permission(
        &self,
        _tenant_id: TenantId,
        _role_id: RoleId,
        _permission_id: PermissionId,
    ) -> AppResult<bool> {
        store_touched()
    }

    async fn delete_role_permission(
        &self,
        _tenant_id: TenantId,
        _role_id: RoleId,
        _permission_id: PermissionId,
    ) -> AppResult<()> {
        store_touched()
    }
}

#[async_trait]
impl UserRoleRepository for UnreachableStore {
    async fn insert_user_role(
        &self,
        _tenant_id: TenantId,
        _role_id: RoleId,
        _user_id: UserId,
    ) -> AppResult<bool> {
        store_touched()
    }

    async fn delete_user_role(
        &self,
        _tenant_id: TenantId,
        _role_id: RoleId,
        _user_id: UserId,
    ) -> AppResult<()> {
        store_touched()
    }

    async fn list_role_assignments(&self, _tenant_id: TenantId) -> AppResult<Vec<RoleAssignment>> {
        store_touched()
    }
}

fn service(permissions: &[&str]) -> SecurityAdminService {
    let store = Arc::new(UnreachableStore);
    SecurityAdminService::new(
        AuthorizationService::new(Arc::new(FixedAuthorizationRepository {
            permissions: permissions.iter().map(|value| (*value).to_owned()).collect(),
        })),
        RoleStore::new(store.clone(), store.clone(), store),
    )
}

fn actor() -> UserIdentity {
    UserIdentity::new(UserId::new(), Some("ops@acme.test".to_owned()), TenantId::new())
}

#[tokio::test]
async fn mutations_without_permission_are_forbidden_before_store_access() {
    let service = service(&[]);
    let actor = actor();
    let role_id = RoleId::new(7);
    let permission_id = PermissionId::new(2);

    let results = [
        service
            .create_role(
                &actor,
                CreateRoleInput {
                    name: "Support".to_owned(),
                    description: String::new(),
                },
            )
            .await
            .map(|_| ()),
        service
            .update_role(&actor, role_id, "Support".to_owned(), String::new())
            .await
            .map(|_| ()),
        service.delete_role(&actor, role_id).await,
        service
            .assign_permission(&actor, role_id, permission_id)
            .await,
        service
            .remove_permission(&actor, role_id, permission_id)
            .await,
        service
            .assign_role_to_user(&actor, role_id, UserId::new())
            .await,
        service
            .remove_role_from_user(&actor, role_id, UserId::new())
            .await,
        service.role_assignments(&actor).await.map(|_| ()),
    ];

    for result in results {
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}

#[tokio::test]
async fn each_operation_checks_its_own_permission() {
    let actor = actor();
    let role_id = RoleId::new(7);

    let delete_only = service(&["delete-role"]);
    assert!(matches!(
        delete_only.delete_role(&actor, role_id).await,
        Err(AppError::Internal(_))
    ));
    assert!(matches!(
        delete_only
            .update_role(&actor, role_id, "Support".to_owned(), String::new())
            .await,
        Err(AppError::Forbidden(_))
    ));

    let remover = service(&["remove-user-role"]);
    assert!(matches!(
        remover
            .remove_role_from_user(&actor, role_id, UserId::new())
            .await,
        Err(AppError::Internal(_))
    ));
    assert!(matches!(
        remover
            .assign_role_to_user(&actor, role_id, UserId::new())
            .await,
        Err(AppError::Forbidden(_))
    ));
}

#[tokio::test]
async fn reads_require_only_a_session() {
    let service = service(&[]);
    let actor = actor();

    assert!(matches!(
        service.roles(&actor).await,
        Err(AppError::Internal(_))
    ));
    assert!(matches!(
        service.permissions(&actor).await,
        Err(AppError::Internal(_))
    ));

    let current = service.current_user_roles(&actor).await;
    assert_eq!(
        current.map(|roles| roles.roles.len()).unwrap_or_default(),
        1
    );
}
