use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Profile of a signed-in student. `id` is the identity provider's subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: String,
    pub profile_picture: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub created_at: i64,
}

impl NewUser {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            phone_number: None,
            status: "active".to_string(),
            profile_picture: self.profile_picture,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: String,
    pub profile_picture: Option<String>,
    pub created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            status: row.status,
            profile_picture: row.profile_picture,
            created_at: row.created_at,
        }
    }
}
