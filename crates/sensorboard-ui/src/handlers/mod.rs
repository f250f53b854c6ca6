//! HTTP handlers for the dashboard pages

pub mod dashboard;
pub mod forms;
pub mod login;
pub mod static_files;
pub mod tables;

use sensorboard_core::{Resource, Session};

/// Entry in the side navigation
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Data shared by every page rendered through `base.html`
#[derive(Debug, Clone)]
pub struct Layout {
    pub admin_name: String,
    pub nav: Vec<NavLink>,
}

const NAV: [(&str, &str); 5] = [
    ("/", "Dashboard"),
    ("/data-sensors", "Data Sensor"),
    ("/income", "Income"),
    ("/expenses", "Expense"),
    ("/reports", "Reports"),
];

impl Layout {
    /// Layout for a signed-in page; `active` is the route of the current section
    pub fn new(session: &Session, active: &str) -> Self {
        Self {
            admin_name: session.admin_name.clone(),
            nav: nav(active),
        }
    }

    pub fn for_resource(session: &Session, resource: Resource) -> Self {
        Self::new(session, resource.route())
    }

    /// Layout without a signed-in admin
    pub fn anonymous() -> Self {
        Self {
            admin_name: String::new(),
            nav: Vec::new(),
        }
    }

    pub fn signed_in(&self) -> bool {
        !self.admin_name.is_empty()
    }
}

fn nav(active: &str) -> Vec<NavLink> {
    NAV.iter()
        .map(|&(href, label)| NavLink {
            href,
            label,
            active: href == active,
        })
        .collect()
}
