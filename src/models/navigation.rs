use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sidebar/menu entry of the admin front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NavItem {
    #[schema(example = "leads")]
    pub key: String,
    #[schema(example = "Leads")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "/leads")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Permission names; the item is shown when the role holds any of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            path: None,
            icon: None,
            required_permissions: None,
            children: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn requires<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_permissions = Some(permissions.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        self
    }
}

/// Route path -> permission names, any one of which opens the route.
pub type RoutePermissions = BTreeMap<String, Vec<String>>;

/// The admin console's sidebar.
pub fn default_navigation() -> Vec<NavItem> {
    vec![
        NavItem::new("dashboard", "Dashboard")
            .with_path("/dashboard")
            .with_icon("layout-dashboard"),
        NavItem::new("leads", "Leads")
            .with_icon("contact")
            .requires(["view_leads"])
            .with_children(vec![
                NavItem::new("leads-all", "All Leads").with_path("/leads"),
                NavItem::new("leads-new", "Add Lead")
                    .with_path("/leads/new")
                    .requires(["add_lead"]),
                NavItem::new("leads-assign", "Assign Leads")
                    .with_path("/leads/assign")
                    .requires(["assign_lead"]),
            ]),
        NavItem::new("users", "Users")
            .with_icon("users")
            .requires(["view_users", "add_user"])
            .with_children(vec![
                NavItem::new("users-all", "All Users")
                    .with_path("/users")
                    .requires(["view_users"]),
                NavItem::new("users-new", "Add User")
                    .with_path("/users/new")
                    .requires(["add_user"]),
            ]),
        NavItem::new("departments", "Departments")
            .with_path("/departments")
            .with_icon("network")
            .requires(["manage_departments"]),
        NavItem::new("kyc", "KYC Approvals")
            .with_path("/kyc")
            .with_icon("badge-check")
            .requires(["view_kyc", "approval"]),
        NavItem::new("permissions", "Permissions")
            .with_path("/permissions")
            .with_icon("shield")
            .requires(["manage_permissions"]),
        NavItem::new("email-templates", "Email Templates")
            .with_path("/email-templates")
            .with_icon("mail")
            .requires(["manage_email_templates"]),
        NavItem::new("reports", "Reports")
            .with_path("/reports")
            .with_icon("bar-chart")
            .requires(["reports", "export_data"]),
        NavItem::new("attendance", "Attendance")
            .with_path("/attendance")
            .with_icon("calendar-check")
            .requires(["attendance"]),
    ]
}

/// Route guard table of the admin console. Routes not listed are open.
pub fn default_route_permissions() -> RoutePermissions {
    let entries: [(&str, &[&str]); 12] = [
        ("/leads", &["view_leads"]),
        ("/leads/new", &["add_lead"]),
        ("/leads/assign", &["assign_lead"]),
        ("/users", &["view_users"]),
        ("/users/new", &["add_user"]),
        ("/users/edit", &["edit_user"]),
        ("/departments", &["manage_departments"]),
        ("/kyc", &["view_kyc", "approval"]),
        ("/permissions", &["manage_permissions"]),
        ("/email-templates", &["manage_email_templates"]),
        ("/reports", &["reports", "export_data"]),
        ("/attendance", &["attendance"]),
    ];

    entries
        .into_iter()
        .map(|(route, perms)| {
            (
                route.to_string(),
                perms.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::permission::Permission;

    fn collect_permissions(items: &[NavItem], out: &mut Vec<String>) {
        for item in items {
            out.extend(item.required_permissions.iter().flatten().cloned());
            collect_permissions(&item.children, out);
        }
    }

    #[test]
    fn test_default_tables_name_known_permissions() {
        let mut names = Vec::new();
        collect_permissions(&default_navigation(), &mut names);
        names.extend(default_route_permissions().into_values().flatten());

        for name in names {
            assert!(Permission::parse(&name).is_some(), "unknown permission {name}");
        }
    }

    #[test]
    fn test_nav_item_omits_empty_fields_on_the_wire() {
        let json = serde_json::to_value(NavItem::new("a", "A")).unwrap();
        assert_eq!(json, serde_json::json!({"key": "a", "label": "A"}));
    }
}
