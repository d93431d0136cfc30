use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crm_rbac::authz;
use crm_rbac::catalog;
use crm_rbac::config::{load_env, load_json, AppConfig};
use crm_rbac::models::navigation::NavItem;
use crm_rbac::models::user::CandidateUser;

#[derive(Parser, Debug)]
#[command(author, version, about = "crm-rbac role and permission inspector", long_about = None)]
struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List roles in hierarchy order
    Roles,
    /// Show the permission row of a role
    Permissions { role: String },
    /// Check permissions for a role (any by default)
    Check {
        role: String,
        #[arg(required = true)]
        permissions: Vec<String>,
        /// Require every permission instead of any
        #[arg(long)]
        all: bool,
    },
    /// Level comparison: does MANAGER rank strictly above USER
    CanManage { manager: String, user: String },
    /// Declared check: may CREATOR create a user with role TARGET
    CanCreate { creator: String, target: String },
    /// Validate a user record against a role's required fields
    Validate {
        role: String,
        /// JSON file holding the user record
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        branch_id: Option<String>,
        #[arg(long)]
        sales_manager_id: Option<String>,
        #[arg(long)]
        tl_id: Option<String>,
    },
    /// Show the menu visible to a role
    Navigation {
        role: String,
        /// JSON file with menu items; defaults to the configured menu
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Check whether a role may open a route of the configured route map
    Route { role: String, route: String },
    /// Print the catalog fingerprint
    Fingerprint,
}

fn main() -> ExitCode {
    load_env();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Ok(false) means the answer was "no" (denied or invalid).
fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Roles => {
            let roles = authz::get_all_roles_by_hierarchy();
            if cli.json {
                let defs: Vec<_> = roles.iter().map(|r| r.definition()).collect();
                println!("{}", serde_json::to_string_pretty(&defs)?);
            } else {
                println!("{:<16} {:<6} {:<16} {}", "Role", "Level", "Reports to", "Manages");
                for role in roles {
                    let reports_to = role.reports_to().map(|r| r.as_str()).unwrap_or("-");
                    let manages: Vec<&str> = role.can_manage_roles().iter().map(|r| r.as_str()).collect();
                    println!(
                        "{:<16} {:<6} {:<16} {}",
                        role.as_str(),
                        role.hierarchy_level(),
                        reports_to,
                        manages.join(", ")
                    );
                }
            }
            Ok(true)
        }
        Commands::Permissions { role } => {
            let row = authz::get_role_permissions(&role);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&row)?);
            } else {
                for (permission, granted) in &row {
                    println!("{:<24} {}", permission.as_str(), if *granted { "yes" } else { "no" });
                }
            }
            Ok(!row.is_empty())
        }
        Commands::Check { role, permissions, all } => {
            let allowed = if all {
                authz::has_all_permissions(&role, &permissions)
            } else {
                authz::has_any_permission(&role, &permissions)
            };
            print_decision(cli.json, allowed)?;
            Ok(allowed)
        }
        Commands::CanManage { manager, user } => {
            let allowed = authz::can_manage(&manager, &user);
            print_decision(cli.json, allowed)?;
            Ok(allowed)
        }
        Commands::CanCreate { creator, target } => {
            let allowed = authz::can_create_role(&creator, &target);
            print_decision(cli.json, allowed)?;
            Ok(allowed)
        }
        Commands::Validate {
            role,
            file,
            branch_id,
            sales_manager_id,
            tl_id,
        } => {
            let mut user = match file {
                Some(path) => load_json::<CandidateUser>(&path)?,
                None => CandidateUser::new(role.clone()),
            };
            if let Some(id) = branch_id {
                user = user.with_branch(id);
            }
            if let Some(id) = sales_manager_id {
                user = user.with_sales_manager(id);
            }
            if let Some(id) = tl_id {
                user = user.with_tl(id);
            }

            let result = authz::validate_role_requirements(&role, &user);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if result.valid {
                println!("valid");
            } else {
                for error in &result.errors {
                    println!("{error}");
                }
            }
            Ok(result.valid)
        }
        Commands::Navigation { role, file } => {
            let items: Vec<NavItem> = match file {
                Some(path) => load_json(&path)?,
                None => AppConfig::from_env().context("invalid configuration")?.navigation,
            };
            let visible = authz::filter_navigation_by_role(&items, &role);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print_menu(&visible, 0);
            }
            Ok(true)
        }
        Commands::Route { role, route } => {
            let config = AppConfig::from_env().context("invalid configuration")?;
            let allowed = authz::can_access_route(&route, &role, &config.route_permissions);
            print_decision(cli.json, allowed)?;
            Ok(allowed)
        }
        Commands::Fingerprint => {
            println!("{}", catalog::fingerprint());
            Ok(true)
        }
    }
}

fn print_decision(json: bool, allowed: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&serde_json::json!({ "allowed": allowed }))?);
    } else {
        println!("{}", if allowed { "allowed" } else { "denied" });
    }
    Ok(())
}

fn print_menu(items: &[NavItem], depth: usize) {
    for item in items {
        let path = item.path.as_deref().unwrap_or("");
        println!("{:indent$}{} {}", "", item.label, path, indent = depth * 2);
        print_menu(&item.children, depth + 1);
    }
}
