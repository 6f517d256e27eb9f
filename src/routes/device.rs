use crate::common::{ApiError, ApiResult};
use crate::models::DeviceId;
use crate::models::dtos::device::{
    DeviceBodyDto, DevicePatchBodyDto, DeviceResponseDto, SearchQueryDto,
};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// 创建设备
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<DeviceBodyDto>,
) -> ApiResult<impl IntoResponse> {
    let device = state.device_service.create(body).await?;
    Ok((StatusCode::CREATED, Json(DeviceResponseDto::from(device))))
}

/// 获取单个设备
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DeviceId>,
) -> ApiResult<impl IntoResponse> {
    let device = state
        .device_service
        .get_by_id(id)
        .await?
        .ok_or(ApiError::DeviceNotFound(id))?;
    Ok(Json(DeviceResponseDto::from(device)))
}

/// 列出所有设备
pub async fn list(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let devices = state.device_service.list().await?;
    Ok(Json(
        devices
            .into_iter()
            .map(DeviceResponseDto::from)
            .collect::<Vec<_>>(),
    ))
}

/// 整体更新
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DeviceId>,
    Json(body): Json<DeviceBodyDto>,
) -> ApiResult<impl IntoResponse> {
    let device = state.device_service.update(id, body).await?;
    Ok(Json(DeviceResponseDto::from(device)))
}

/// 部分更新，未知字段忽略
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<DeviceId>,
    Json(body): Json<DevicePatchBodyDto>,
) -> ApiResult<impl IntoResponse> {
    let device = state.device_service.partial_update(id, body).await?;
    Ok(Json(DeviceResponseDto::from(device)))
}

/// 删除设备
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DeviceId>,
) -> ApiResult<impl IntoResponse> {
    state.device_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 按品牌搜索
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQueryDto>,
) -> ApiResult<impl IntoResponse> {
    let devices = state.device_service.search_by_brand(&query.brand).await?;
    Ok(Json(
        devices
            .into_iter()
            .map(DeviceResponseDto::from)
            .collect::<Vec<_>>(),
    ))
}
