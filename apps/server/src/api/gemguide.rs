use crate::error::{ApiError, ApiResult};

#[utoipa::path(get, path = "/api/gemguide", responses((status = 501, description = "Not implemented")))]
pub async fn gemguide_stub() -> ApiResult<()> {
    Err(ApiError::NotImplemented(
        "This endpoint will soon connect to the GemGuide API.".to_string(),
    ))
}
