use tonic::Status;

use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::grpc::validation::RequestValidator;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: &S,
    validator: &RequestValidator,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    validator.is_admin(&request)?;

    let is_admin = service.is_admin(UserId(request.user_id)).await?;

    Ok(IsAdminResponse { is_admin })
}
