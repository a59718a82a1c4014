use tonic::Status;

use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::grpc::validation::RequestValidator;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    validator: &RequestValidator,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    validator.login(&request)?;

    let token = service
        .login(&request.email, &request.password, AppId(request.app_id))
        .await?;

    Ok(LoginResponse { token })
}
