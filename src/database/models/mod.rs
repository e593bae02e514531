pub mod group;
pub mod post;
pub mod user;

pub use group::{Group, GroupIndex, GroupRow, GroupStatus, NewGroup};
pub use post::{NewPost, Post, PostRow};
pub use user::{NewUser, User, UserRow};
