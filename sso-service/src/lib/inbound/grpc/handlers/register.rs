use tonic::Status;

use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::grpc::validation::RequestValidator;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    validator: &RequestValidator,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    validator.register(&request)?;

    let user_id = service
        .register_new_user(&request.email, &request.password)
        .await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}
