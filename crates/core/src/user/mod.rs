pub mod model;
pub mod password;
pub mod service;
pub mod store;

pub use model::{LoginRequest, SignupRequest, User};
pub use password::PasswordMode;
pub use service::UserService;
pub use store::UserStore;
