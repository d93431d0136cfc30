use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;

/// Named boolean capability. Declaration order is the matrix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewLeads,
    AddLead,
    EditLead,
    DeleteLead,
    AssignLead,
    ViewUsers,
    AddUser,
    EditUser,
    DeleteUser,
    ViewKyc,
    EditKyc,
    Approval,
    Reports,
    ExportData,
    ManageDepartments,
    ManageBranches,
    ManageEmailTemplates,
    ManagePermissions,
    Attendance,
}

impl Permission {
    pub const ALL: [Permission; 20] = [
        Permission::ViewDashboard,
        Permission::ViewLeads,
        Permission::AddLead,
        Permission::EditLead,
        Permission::DeleteLead,
        Permission::AssignLead,
        Permission::ViewUsers,
        Permission::AddUser,
        Permission::EditUser,
        Permission::DeleteUser,
        Permission::ViewKyc,
        Permission::EditKyc,
        Permission::Approval,
        Permission::Reports,
        Permission::ExportData,
        Permission::ManageDepartments,
        Permission::ManageBranches,
        Permission::ManageEmailTemplates,
        Permission::ManagePermissions,
        Permission::Attendance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewLeads => "view_leads",
            Permission::AddLead => "add_lead",
            Permission::EditLead => "edit_lead",
            Permission::DeleteLead => "delete_lead",
            Permission::AssignLead => "assign_lead",
            Permission::ViewUsers => "view_users",
            Permission::AddUser => "add_user",
            Permission::EditUser => "edit_user",
            Permission::DeleteUser => "delete_user",
            Permission::ViewKyc => "view_kyc",
            Permission::EditKyc => "edit_kyc",
            Permission::Approval => "approval",
            Permission::Reports => "reports",
            Permission::ExportData => "export_data",
            Permission::ManageDepartments => "manage_departments",
            Permission::ManageBranches => "manage_branches",
            Permission::ManageEmailTemplates => "manage_email_templates",
            Permission::ManagePermissions => "manage_permissions",
            Permission::Attendance => "attendance",
        }
    }

    pub fn parse(value: &str) -> Option<Permission> {
        Permission::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::parse(s).ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// One role's row: an explicit value for every permission, in matrix order.
pub type PermissionRow = BTreeMap<Permission, bool>;

/// Default role -> permission matrix. Built once, never mutated.
#[derive(Debug)]
pub struct PermissionMatrix {
    rows: BTreeMap<Role, PermissionRow>,
}

impl PermissionMatrix {
    /// The process-wide default matrix.
    pub fn defaults() -> &'static PermissionMatrix {
        static MATRIX: OnceLock<PermissionMatrix> = OnceLock::new();
        MATRIX.get_or_init(|| {
            let rows = Role::ALL
                .into_iter()
                .map(|role| {
                    let granted = default_grants(role);
                    let row = Permission::ALL
                        .into_iter()
                        .map(|p| (p, granted.contains(&p)))
                        .collect();
                    (role, row)
                })
                .collect();
            PermissionMatrix { rows }
        })
    }

    pub fn row(&self, role: Role) -> Option<&PermissionRow> {
        self.rows.get(&role)
    }

    pub fn is_granted(&self, role: Role, permission: Permission) -> bool {
        self.row(role)
            .and_then(|row| row.get(&permission).copied())
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = (Role, &PermissionRow)> {
        self.rows.iter().map(|(role, row)| (*role, row))
    }
}

fn default_grants(role: Role) -> &'static [Permission] {
    use Permission::*;

    match role {
        Role::SuperAdmin => &Permission::ALL,
        Role::BranchManager => &[
            ViewDashboard,
            ViewLeads,
            AddLead,
            EditLead,
            DeleteLead,
            AssignLead,
            ViewUsers,
            AddUser,
            EditUser,
            DeleteUser,
            ViewKyc,
            EditKyc,
            Approval,
            Reports,
            ExportData,
            ManageDepartments,
            ManageEmailTemplates,
            Attendance,
        ],
        Role::SalesManager => &[
            ViewDashboard,
            ViewLeads,
            AddLead,
            EditLead,
            AssignLead,
            ViewUsers,
            AddUser,
            EditUser,
            ViewKyc,
            Approval,
            Reports,
            ExportData,
        ],
        Role::Hr => &[
            ViewDashboard,
            ViewUsers,
            AddUser,
            EditUser,
            DeleteUser,
            ViewKyc,
            EditKyc,
            ManageDepartments,
            Attendance,
        ],
        Role::TeamLeader => &[
            ViewDashboard,
            ViewLeads,
            AddLead,
            EditLead,
            AssignLead,
            ViewUsers,
            AddUser,
            ViewKyc,
            Reports,
        ],
        Role::SeniorBusinessAssociate => &[ViewDashboard, ViewLeads, AddLead, EditLead, ViewKyc],
        Role::BusinessAssociate => &[ViewDashboard, ViewLeads, AddLead, EditLead],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_every_permission_key() {
        let matrix = PermissionMatrix::defaults();
        for role in Role::ALL {
            let row = matrix.row(role).expect("row for every role");
            assert_eq!(row.len(), Permission::ALL.len(), "{role} row incomplete");
        }
    }

    #[test]
    fn test_row_iterates_in_declaration_order() {
        let row = PermissionMatrix::defaults().row(Role::BusinessAssociate).unwrap();
        let keys: Vec<Permission> = row.keys().copied().collect();
        assert_eq!(keys, Permission::ALL.to_vec());
    }

    #[test]
    fn test_superadmin_holds_everything() {
        let matrix = PermissionMatrix::defaults();
        assert!(Permission::ALL.iter().all(|p| matrix.is_granted(Role::SuperAdmin, *p)));
    }

    #[test]
    fn test_permission_wire_names_round_trip_through_parse() {
        for p in Permission::ALL {
            assert_eq!(Permission::parse(p.as_str()), Some(p));
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
        }
        assert_eq!(Permission::parse("fly"), None);
        assert_eq!(Permission::parse(" view_leads"), None);
    }
}
