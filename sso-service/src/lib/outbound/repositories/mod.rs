pub mod app;
pub mod user;

pub use app::PostgresAppRepository;
pub use user::PostgresUserRepository;
