use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Level reported for any role string that is not in the registry.
pub const UNKNOWN_ROLE_LEVEL: u32 = 999;

/// Authority tier assigned to a CRM user.
///
/// Wire names are the upper-case identifiers the backend API emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(rename = "SUPERADMIN")]
    SuperAdmin,
    #[serde(rename = "BRANCH_MANAGER")]
    BranchManager,
    #[serde(rename = "SALES_MANAGER")]
    SalesManager,
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "TL")]
    TeamLeader,
    #[serde(rename = "SBA")]
    SeniorBusinessAssociate,
    #[serde(rename = "BA")]
    BusinessAssociate,
}

impl Role {
    /// Registry insertion order.
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::BranchManager,
        Role::SalesManager,
        Role::Hr,
        Role::TeamLeader,
        Role::SeniorBusinessAssociate,
        Role::BusinessAssociate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPERADMIN",
            Role::BranchManager => "BRANCH_MANAGER",
            Role::SalesManager => "SALES_MANAGER",
            Role::Hr => "HR",
            Role::TeamLeader => "TL",
            Role::SeniorBusinessAssociate => "SBA",
            Role::BusinessAssociate => "BA",
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == value)
    }

    pub fn definition(&self) -> &'static RoleDefinition {
        // ROLE_DEFINITIONS is laid out in `Role::ALL` order
        &ROLE_DEFINITIONS[*self as usize]
    }

    pub fn hierarchy_level(&self) -> u32 {
        self.definition().hierarchy_level
    }

    pub fn can_manage_roles(&self) -> &'static [Role] {
        self.definition().can_manage_roles
    }

    pub fn reports_to(&self) -> Option<Role> {
        self.definition().reports_to
    }

    pub fn requirements(&self) -> RoleRequirements {
        self.definition().requirements
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Which relational fields a user record of a role must carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleRequirements {
    pub branch_required: bool,
    pub manager_required: bool,
    pub tl_required: bool,
}

impl RoleRequirements {
    const fn new(branch_required: bool, manager_required: bool, tl_required: bool) -> Self {
        Self {
            branch_required,
            manager_required,
            tl_required,
        }
    }
}

/// Cosmetic metadata used by the admin UI when rendering a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDisplay {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    /// Lower means more authority.
    pub hierarchy_level: u32,
    pub can_manage_roles: &'static [Role],
    pub reports_to: Option<Role>,
    pub requirements: RoleRequirements,
    pub display: RoleDisplay,
}

pub static ROLE_DEFINITIONS: [RoleDefinition; 7] = [
    RoleDefinition {
        role: Role::SuperAdmin,
        hierarchy_level: 1,
        can_manage_roles: &[
            Role::BranchManager,
            Role::SalesManager,
            Role::Hr,
            Role::TeamLeader,
            Role::SeniorBusinessAssociate,
            Role::BusinessAssociate,
        ],
        reports_to: None,
        requirements: RoleRequirements::new(false, false, false),
        display: RoleDisplay {
            name: "Super Admin",
            description: "Full system access across every branch",
            color: "#7c3aed",
            icon: "crown",
        },
    },
    RoleDefinition {
        role: Role::BranchManager,
        hierarchy_level: 2,
        can_manage_roles: &[
            Role::SalesManager,
            Role::Hr,
            Role::TeamLeader,
            Role::SeniorBusinessAssociate,
            Role::BusinessAssociate,
        ],
        reports_to: Some(Role::SuperAdmin),
        requirements: RoleRequirements::new(true, false, false),
        display: RoleDisplay {
            name: "Branch Manager",
            description: "Runs a single branch and its staff",
            color: "#2563eb",
            icon: "building",
        },
    },
    RoleDefinition {
        role: Role::SalesManager,
        hierarchy_level: 3,
        can_manage_roles: &[
            Role::TeamLeader,
            Role::SeniorBusinessAssociate,
            Role::BusinessAssociate,
        ],
        reports_to: Some(Role::BranchManager),
        requirements: RoleRequirements::new(true, false, false),
        display: RoleDisplay {
            name: "Sales Manager",
            description: "Owns the sales pipeline and its team leaders",
            color: "#0891b2",
            icon: "trending-up",
        },
    },
    RoleDefinition {
        role: Role::Hr,
        hierarchy_level: 3,
        can_manage_roles: &[
            Role::TeamLeader,
            Role::SeniorBusinessAssociate,
            Role::BusinessAssociate,
        ],
        reports_to: Some(Role::BranchManager),
        requirements: RoleRequirements::new(true, false, false),
        display: RoleDisplay {
            name: "HR",
            description: "Onboards staff and tracks attendance",
            color: "#db2777",
            icon: "users",
        },
    },
    RoleDefinition {
        role: Role::TeamLeader,
        hierarchy_level: 4,
        can_manage_roles: &[Role::SeniorBusinessAssociate, Role::BusinessAssociate],
        reports_to: Some(Role::SalesManager),
        requirements: RoleRequirements::new(true, true, false),
        display: RoleDisplay {
            name: "Team Leader",
            description: "Leads a team of business associates",
            color: "#16a34a",
            icon: "flag",
        },
    },
    RoleDefinition {
        role: Role::SeniorBusinessAssociate,
        hierarchy_level: 5,
        can_manage_roles: &[],
        reports_to: Some(Role::TeamLeader),
        requirements: RoleRequirements::new(true, true, true),
        display: RoleDisplay {
            name: "Senior Business Associate",
            description: "Experienced associate working assigned leads",
            color: "#ca8a04",
            icon: "briefcase",
        },
    },
    RoleDefinition {
        role: Role::BusinessAssociate,
        hierarchy_level: 6,
        can_manage_roles: &[],
        reports_to: Some(Role::TeamLeader),
        requirements: RoleRequirements::new(true, true, true),
        display: RoleDisplay {
            name: "Business Associate",
            description: "Works assigned leads",
            color: "#64748b",
            icon: "user",
        },
    },
];

/// Owned view of a role definition for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleSummary {
    pub role: Role,
    #[schema(example = "Team Leader")]
    pub name: String,
    pub description: String,
    #[schema(example = "#16a34a")]
    pub color: String,
    pub icon: String,
    #[schema(example = 4)]
    pub hierarchy_level: u32,
    pub can_manage_roles: Vec<Role>,
    pub reports_to: Option<Role>,
    pub requirements: RoleRequirements,
}

impl From<&RoleDefinition> for RoleSummary {
    fn from(def: &RoleDefinition) -> Self {
        RoleSummary {
            role: def.role,
            name: def.display.name.to_string(),
            description: def.display.description.to_string(),
            color: def.display.color.to_string(),
            icon: def.display.icon.to_string(),
            hierarchy_level: def.hierarchy_level,
            can_manage_roles: def.can_manage_roles.to_vec(),
            reports_to: def.reports_to,
            requirements: def.requirements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_follow_role_order() {
        for (index, role) in Role::ALL.iter().enumerate() {
            assert_eq!(ROLE_DEFINITIONS[index].role, *role);
            assert_eq!(role.definition().role, *role);
        }
    }

    #[test]
    fn test_parse_accepts_wire_names_only() {
        assert_eq!(Role::parse("TL"), Some(Role::TeamLeader));
        assert_eq!(Role::parse(" SUPERADMIN "), None);
        assert_eq!(Role::parse("SUPERADMIN\n"), None);
        assert_eq!(Role::parse("tl"), None);
        assert_eq!(Role::parse(""), None);
        assert!("MANAGER".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::BranchManager).unwrap();
        assert_eq!(json, "\"BRANCH_MANAGER\"");

        let role: Role = serde_json::from_str("\"SBA\"").unwrap();
        assert_eq!(role, Role::SeniorBusinessAssociate);
    }

    #[test]
    fn test_only_top_role_has_no_manager() {
        for role in Role::ALL {
            match role {
                Role::SuperAdmin => assert!(role.reports_to().is_none()),
                _ => assert!(role.reports_to().is_some(), "{role} must report to someone"),
            }
        }
    }

    #[test]
    fn test_manager_role_has_lower_level() {
        for role in Role::ALL {
            if let Some(manager) = role.reports_to() {
                assert!(manager.hierarchy_level() < role.hierarchy_level());
            }
        }
    }
}
