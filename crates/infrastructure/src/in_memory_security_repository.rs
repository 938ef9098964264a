use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use advancely_application::{
    AuthorizationRepository, Company, CompanyMember, CreateRoleInput, PermissionCatalog,
    RoleAssignment, RoleRepository, RoleUpdate, TenantRepository, UserRoleRepository,
};
use advancely_core::{AppError, AppResult, PermissionId, RoleId, TenantId, UserId};
use advancely_domain::{
    EmailDomain, Permission, PermissionGroup, PermissionGroupName, PermissionName, Role,
    RoleWithPermissions, SystemRole, UserRole, UserRoleCollection,
};

const PERMISSION_DESCRIPTIONS: &[(PermissionName, &str)] = &[
    (PermissionName::CreateUser, "Create users"),
    (PermissionName::EditUser, "Edit users"),
    (PermissionName::DeleteUser, "Delete users"),
    (PermissionName::CreateRole, "Create roles"),
    (PermissionName::EditRole, "Edit roles and their permissions"),
    (PermissionName::DeleteRole, "Delete roles"),
    (PermissionName::AssignUserRole, "Assign roles to users"),
    (PermissionName::RemoveUserRole, "Remove roles from users"),
    (
        PermissionName::EditOrganizationSettings,
        "Edit organization settings",
    ),
];

#[derive(Debug, Clone, Copy)]
struct Membership {
    tenant_id: TenantId,
    joined_at: DateTime<Utc>,
    sequence: u64,
}

#[derive(Debug, Default)]
struct SecurityState {
    permissions: BTreeMap<PermissionId, Permission>,
    roles: BTreeMap<RoleId, Role>,
    role_permissions: BTreeSet<(RoleId, PermissionId)>,
    user_roles: HashMap<(UserId, RoleId), DateTime<Utc>>,
    companies: HashMap<TenantId, Company>,
    members: HashMap<UserId, Membership>,
    allowed_domains: HashMap<TenantId, BTreeSet<String>>,
    next_role_id: i32,
}

impl SecurityState {
    fn seeded() -> Self {
        let mut state = Self {
            next_role_id: 1,
            ..Self::default()
        };

        for (position, (name, description)) in PERMISSION_DESCRIPTIONS.iter().enumerate() {
            let id = PermissionId::new(position as i32 + 1);
            state.permissions.insert(
                id,
                Permission {
                    id,
                    name: name.as_str().to_owned(),
                    description: (*description).to_owned(),
                    group: permission_group(name.group()),
                },
            );
        }

        for system_role in SystemRole::all() {
            let id = state.allocate_role_id();
            if let Ok(role) = Role::new(id, None, system_role.as_str(), "Full access", true) {
                state.roles.insert(id, role);
            }
        }

        state
    }

    fn allocate_role_id(&mut self) -> RoleId {
        let id = RoleId::new(self.next_role_id);
        self.next_role_id += 1;
        id
    }

    fn with_permissions(&self, role: &Role) -> RoleWithPermissions {
        RoleWithPermissions {
            role: role.clone(),
            permissions: self
                .role_permissions
                .iter()
                .filter(|(role_id, _)| *role_id == role.id())
                .filter_map(|(_, permission_id)| self.permissions.get(permission_id).cloned())
                .collect(),
        }
    }

    fn custom_role_of(&self, tenant_id: TenantId, role_id: RoleId) -> Option<&Role> {
        self.roles
            .get(&role_id)
            .filter(|role| !role.is_system() && role.tenant_id() == Some(tenant_id))
    }

    fn name_taken(&self, tenant_id: TenantId, name: &str, except: Option<RoleId>) -> bool {
        self.roles.values().any(|role| {
            Some(role.id()) != except
                && role.tenant_id() == Some(tenant_id)
                && role.name().eq_ignore_ascii_case(name)
        })
    }

    fn company_of(&self, user_id: UserId) -> Option<TenantId> {
        self.members.get(&user_id).map(|membership| membership.tenant_id)
    }

    /// Mirrors the SQL scope of user-role rows: owned custom roles, or system
    /// roles held by members of the tenant.
    fn assignment_in_tenant(&self, tenant_id: TenantId, user_id: UserId, role: &Role) -> bool {
        role.tenant_id() == Some(tenant_id)
            || (role.is_system() && self.company_of(user_id) == Some(tenant_id))
    }
}

fn permission_group(name: PermissionGroupName) -> PermissionGroup {
    let (id, description) = match name {
        PermissionGroupName::Users => (1, "Manage the users of the organization"),
        PermissionGroupName::UserManagement => (2, "Manage roles and role assignments"),
        PermissionGroupName::Organization => (3, "Manage organization settings"),
    };

    PermissionGroup {
        id,
        name: name.as_str().to_owned(),
        description: description.to_owned(),
    }
}

/// In-memory implementation of every security and tenant port.
///
/// Starts with the permission catalog and system roles already seeded.
#[derive(Debug)]
pub struct InMemorySecurityRepository {
    state: RwLock<SecurityState>,
}

impl InMemorySecurityRepository {
    /// Creates a repository holding only the seeded catalog and system roles.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SecurityState::seeded()),
        }
    }
}

impl Default for InMemorySecurityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PermissionCatalog for InMemorySecurityRepository {
    async fn find_permission(&self, permission_id: PermissionId) -> AppResult<Option<Permission>> {
        Ok(self.state.read().await.permissions.get(&permission_id).cloned())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let mut permissions: Vec<Permission> =
            self.state.read().await.permissions.values().cloned().collect();
        permissions.sort_by_key(|permission| (permission.group.id, permission.id));

        Ok(permissions)
    }
}

#[async_trait]
impl RoleRepository for InMemorySecurityRepository {
    async fn find_role(
        &self,
        role_id: RoleId,
        tenant_id: Option<TenantId>,
    ) -> AppResult<Option<RoleWithPermissions>> {
        let state = self.state.read().await;

        Ok(state
            .roles
            .get(&role_id)
            .filter(|role| role.is_visible_to(tenant_id))
            .map(|role| state.with_permissions(role)))
    }

    async fn find_system_role(&self, role: SystemRole) -> AppResult<Option<Role>> {
        Ok(self
            .state
            .read()
            .await
            .roles
            .values()
            .find(|stored| stored.is_system() && stored.name() == role.as_str())
            .cloned())
    }

    async fn list_roles(&self, tenant_id: TenantId) -> AppResult<Vec<RoleWithPermissions>> {
        let state = self.state.read().await;

        Ok(state
            .roles
            .values()
            .filter(|role| role.is_visible_to(Some(tenant_id)))
            .map(|role| state.with_permissions(role))
            .collect())
    }

    async fn create_role(&self, tenant_id: TenantId, input: CreateRoleInput) -> AppResult<Role> {
        let mut state = self.state.write().await;

        if state.name_taken(tenant_id, &input.name, None) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                input.name
            )));
        }

        let id = state.allocate_role_id();
        let role = Role::new(id, Some(tenant_id), input.name, input.description, false)?;
        state.roles.insert(id, role.clone());

        Ok(role)
    }

    async fn update_custom_role(&self, update: RoleUpdate) -> AppResult<Option<Role>> {
        let mut state = self.state.write().await;

        let Some(role) = state.custom_role_of(update.tenant_id, update.role_id) else {
            return Ok(None);
        };
        if state.name_taken(update.tenant_id, &update.name, Some(update.role_id)) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                update.name
            )));
        }

        let updated = role.with_details(update.name, update.description);
        state.roles.insert(update.role_id, updated.clone());

        Ok(Some(updated))
    }

    async fn delete_custom_role(&self, tenant_id: TenantId, role_id: RoleId) -> AppResult<bool> {
        let mut state = self.state.write().await;

        if state.custom_role_of(tenant_id, role_id).is_none() {
            return Ok(false);
        }

        state.roles.remove(&role_id);
        state
            .role_permissions
            .retain(|(stored_role_id, _)| *stored_role_id != role_id);
        state
            .user_roles
            .retain(|(_, stored_role_id), _| *stored_role_id != role_id);

        Ok(true)
    }

    async fn insert_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;

        if state.custom_role_of(tenant_id, role_id).is_none() {
            return Ok(false);
        }
        if !state.permissions.contains_key(&permission_id) {
            return Err(AppError::PermissionNotFound(permission_id));
        }
        if !state.role_permissions.insert((role_id, permission_id)) {
            return Err(AppError::Conflict(format!(
                "permission {permission_id} is already assigned to role {role_id}"
            )));
        }

        Ok(true)
    }

    async fn delete_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;

        if state.custom_role_of(tenant_id, role_id).is_some() {
            state.role_permissions.remove(&(role_id, permission_id));
        }

        Ok(())
    }
}

#[async_trait]
impl UserRoleRepository for InMemorySecurityRepository {
    async fn insert_user_role(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;

        let visible = state
            .roles
            .get(&role_id)
            .is_some_and(|role| role.is_visible_to(Some(tenant_id)));
        if !visible || state.company_of(user_id) != Some(tenant_id) {
            return Ok(false);
        }
        if state.user_roles.contains_key(&(user_id, role_id)) {
            return Err(AppError::Conflict(format!(
                "role {role_id} is already assigned to user '{user_id}'"
            )));
        }

        state.user_roles.insert((user_id, role_id), Utc::now());
        Ok(true)
    }

    async fn delete_user_role(
        &self,
        tenant_id: TenantId,
        role_id: RoleId,
        user_id: UserId,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;

        let in_tenant = state
            .roles
            .get(&role_id)
            .is_some_and(|role| state.assignment_in_tenant(tenant_id, user_id, role));
        if in_tenant {
            state.user_roles.remove(&(user_id, role_id));
        }

        Ok(())
    }

    async fn list_role_assignments(&self, tenant_id: TenantId) -> AppResult<Vec<RoleAssignment>> {
        let state = self.state.read().await;

        let mut assignments: Vec<RoleAssignment> = state
            .user_roles
            .iter()
            .filter_map(|((user_id, role_id), assigned_at)| {
                let role = state.roles.get(role_id)?;
                state
                    .assignment_in_tenant(tenant_id, *user_id, role)
                    .then(|| RoleAssignment {
                        user_id: *user_id,
                        role_id: *role_id,
                        role_name: role.name().to_owned(),
                        is_system: role.is_system(),
                        assigned_at: *assigned_at,
                    })
            })
            .collect();
        assignments.sort_by_key(|assignment| (assignment.assigned_at, assignment.role_id));

        Ok(assignments)
    }
}

#[async_trait]
impl AuthorizationRepository for InMemorySecurityRepository {
    async fn user_roles(&self, user_id: UserId) -> AppResult<UserRoleCollection> {
        let state = self.state.read().await;
        let Some(tenant_id) = state.company_of(user_id) else {
            return Ok(UserRoleCollection::empty(user_id));
        };

        let mut role_ids: Vec<RoleId> = state
            .user_roles
            .keys()
            .filter(|(stored_user_id, _)| *stored_user_id == user_id)
            .map(|(_, role_id)| *role_id)
            .collect();
        role_ids.sort();

        let roles = role_ids
            .into_iter()
            .filter_map(|role_id| state.roles.get(&role_id))
            .filter(|role| role.is_visible_to(Some(tenant_id)))
            .map(|role| {
                let with_permissions = state.with_permissions(role);
                UserRole {
                    name: role.name().to_owned(),
                    is_system: role.is_system(),
                    permissions: with_permissions
                        .permissions
                        .into_iter()
                        .map(|permission| permission.name)
                        .collect(),
                }
            })
            .collect();

        Ok(UserRoleCollection { user_id, roles })
    }
}

#[async_trait]
impl TenantRepository for InMemorySecurityRepository {
    async fn find_company(&self, tenant_id: TenantId) -> AppResult<Option<Company>> {
        Ok(self.state.read().await.companies.get(&tenant_id).cloned())
    }

    async fn find_company_by_creator(&self, creator_id: UserId) -> AppResult<Option<Company>> {
        Ok(self
            .state
            .read()
            .await
            .companies
            .values()
            .find(|company| company.creator_id == creator_id)
            .cloned())
    }

    async fn create_company(&self, creator_id: UserId, name: &str) -> AppResult<Company> {
        let mut state = self.state.write().await;

        if state
            .companies
            .values()
            .any(|company| company.creator_id == creator_id)
        {
            return Err(AppError::Conflict(format!(
                "user '{creator_id}' already created a company"
            )));
        }

        let company = Company {
            id: TenantId::new(),
            name: name.to_owned(),
            creator_id,
            created_at: Utc::now(),
        };
        state.companies.insert(company.id, company.clone());

        Ok(company)
    }

    async fn find_tenant_for_user(&self, user_id: UserId) -> AppResult<Option<TenantId>> {
        Ok(self.state.read().await.company_of(user_id))
    }

    async fn create_membership(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<()> {
        let mut state = self.state.write().await;

        if state.members.contains_key(&user_id) {
            return Err(AppError::Conflict(format!(
                "user '{user_id}' already belongs to a company"
            )));
        }

        let sequence = state.members.len() as u64;
        state.members.insert(
            user_id,
            Membership {
                tenant_id,
                joined_at: Utc::now(),
                sequence,
            },
        );
        Ok(())
    }

    async fn list_members(&self, tenant_id: TenantId) -> AppResult<Vec<CompanyMember>> {
        let state = self.state.read().await;

        let mut members: Vec<(&UserId, &Membership)> = state
            .members
            .iter()
            .filter(|(_, membership)| membership.tenant_id == tenant_id)
            .collect();
        members.sort_by_key(|(_, membership)| membership.sequence);

        Ok(members
            .into_iter()
            .map(|(user_id, membership)| CompanyMember {
                user_id: *user_id,
                joined_at: membership.joined_at,
            })
            .collect())
    }

    async fn add_allowed_email_domain(
        &self,
        tenant_id: TenantId,
        domain: &EmailDomain,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;

        if !state
            .allowed_domains
            .entry(tenant_id)
            .or_default()
            .insert(domain.as_str().to_owned())
        {
            return Err(AppError::Conflict(format!(
                "domain '{}' is already allowed",
                domain.as_str()
            )));
        }

        Ok(())
    }

    async fn list_allowed_email_domains(&self, tenant_id: TenantId) -> AppResult<Vec<EmailDomain>> {
        self.state
            .read()
            .await
            .allowed_domains
            .get(&tenant_id)
            .into_iter()
            .flatten()
            .map(|domain| EmailDomain::new(domain.as_str()))
            .collect()
    }
}
