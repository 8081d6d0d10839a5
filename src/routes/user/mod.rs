mod handler;
mod model;

pub use handler::{create_user, get_user};
pub use model::{CreateUserRequest, User};
