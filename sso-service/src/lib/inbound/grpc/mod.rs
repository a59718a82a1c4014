pub mod errors;
pub mod grpc_auth_server;
pub mod handlers;
pub mod server;
pub mod validation;

pub use grpc_auth_server::AuthGrpcService;
pub use validation::RequestValidator;
