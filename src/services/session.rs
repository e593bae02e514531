//! Per-request session: who the caller is and what navigation they get.

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::database::Store;
use crate::database::models::{GroupIndex, NewUser, User};
use crate::error::ServiceError;
use crate::utils::{Claims, now_millis};

/// Sidebar entry. Every link is `#` until the target pages exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub title: &'static str,
    pub url: &'static str,
}

const DEFAULT_MENU: [MenuItem; 5] = [
    MenuItem {
        title: "Home",
        url: "#",
    },
    MenuItem {
        title: "Join Hackathon",
        url: "#",
    },
    MenuItem {
        title: "Find RoomMate",
        url: "#",
    },
    MenuItem {
        title: "Collage Event Update",
        url: "#",
    },
    MenuItem {
        title: "Event Update",
        url: "#",
    },
];

const ADMIN_MENU_ITEM: MenuItem = MenuItem {
    title: "Admin-Event",
    url: "#",
};

/// Navigation for a role, computed fresh for every session.
pub fn navigation_for(role: Option<&str>, admin_role: &str) -> Vec<MenuItem> {
    let mut menu = DEFAULT_MENU.to_vec();
    if role == Some(admin_role) {
        menu.push(ADMIN_MENU_ITEM);
    }
    menu
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: User,
    pub role: Option<String>,
    pub is_admin: bool,
    pub menu: Vec<MenuItem>,
    /// ids of the groups the caller is a member of
    pub groups: Vec<String>,
}

pub struct SessionService {
    store: Arc<dyn Store>,
    admin_role: String,
}

impl SessionService {
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Self {
        Self {
            store,
            admin_role: config.admin_role.clone(),
        }
    }

    /// Records the caller's profile and resolves their session.
    pub async fn resolve(&self, claims: &Claims) -> Result<Session, ServiceError> {
        let name = claims
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| claims.sub.clone());

        let user = self
            .store
            .upsert_user(NewUser {
                id: claims.sub.clone(),
                name,
                email: claims.email.clone(),
                profile_picture: None,
                created_at: now_millis(),
            })
            .await?;

        let groups = self
            .store
            .scan_groups(GroupIndex::ByMember(&claims.sub))
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();

        let role = claims.role.clone();
        let is_admin = role.as_deref() == Some(self.admin_role.as_str());

        Ok(Session {
            menu: navigation_for(role.as_deref(), &self.admin_role),
            user,
            role,
            is_admin,
            groups,
        })
    }
}
