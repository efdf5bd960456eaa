pub mod jwt;
pub mod middleware;

pub use jwt::{issue_token, verify_token, Claims};
pub use middleware::AdminContext;
