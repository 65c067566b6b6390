//! Employee handlers under `/api/employees`.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use mealsched_api_models::EmployeeDto;
use tracing::info;

use crate::http::auth::AuthContext;
use crate::http::constants::ROUTE_EMPLOYEES;
use crate::http::errors::ApiError;
use crate::http::schedules::store_failure;
use crate::state::ApiState;

pub(crate) async fn list_employees(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<EmployeeDto>>, ApiError> {
    let employees = state
        .store
        .list_employees()
        .await
        .map_err(|err| store_failure(&err))?;
    Ok(Json(employees))
}

pub(crate) async fn get_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeDto>, ApiError> {
    state
        .store
        .get_employee(id)
        .await
        .map_err(|err| store_failure(&err))?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

pub(crate) async fn create_employee(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
    Json(employee): Json<EmployeeDto>,
) -> Result<Response, ApiError> {
    if let Some(message) = employee.validation_error() {
        return Err(ApiError::bad_request(message));
    }
    let created = state
        .store
        .create_employee(employee)
        .await
        .map_err(|err| store_failure(&err))?;
    info!(employee = created.id, user = auth.subject(), "employee created");

    let mut response = (StatusCode::CREATED, Json(created.clone())).into_response();
    if let Ok(value) = HeaderValue::from_str(&format!("{ROUTE_EMPLOYEES}/{}", created.id)) {
        response.headers_mut().insert(LOCATION, value);
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::test_state;
    use axum::body::to_bytes;
    use mealsched_auth::ClaimSet;

    fn auth() -> Extension<AuthContext> {
        Extension(AuthContext {
            claims: ClaimSet::new().with("name", "admin"),
        })
    }

    fn employee(name: &str, code: Option<&str>) -> EmployeeDto {
        EmployeeDto {
            id: 0,
            employee_id: String::new(),
            employee_name: name.to_string(),
            employee_code: code.map(str::to_string),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_then_fetch_employee() -> anyhow::Result<()> {
        let state = test_state();
        let response = create_employee(
            State(Arc::clone(&state)),
            auth(),
            Json(employee("Grace", Some("K-7"))),
        )
        .await
        .map_err(|err| anyhow::anyhow!("create failed with {}", err.status))?;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let created: EmployeeDto = serde_json::from_slice(&body)?;
        assert_eq!(created.id, 1);
        assert!(!created.employee_id.is_empty());

        let Json(fetched) = get_employee(State(Arc::clone(&state)), Path(1))
            .await
            .map_err(|err| anyhow::anyhow!("get failed with {}", err.status))?;
        assert_eq!(fetched, created);

        let Json(all) = list_employees(State(state))
            .await
            .map_err(|err| anyhow::anyhow!("list failed with {}", err.status))?;
        assert_eq!(all.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_employees_are_rejected() {
        let state = test_state();
        for candidate in [
            employee("   ", None),
            employee(&"x".repeat(101), None),
            employee("Ada", Some(&"c".repeat(51))),
        ] {
            let result = create_employee(State(Arc::clone(&state)), auth(), Json(candidate)).await;
            assert!(matches!(result, Err(ref err) if err.status == StatusCode::BAD_REQUEST));
        }
        let missing = get_employee(State(state), Path(9)).await;
        assert!(matches!(missing, Err(ref err) if err.status == StatusCode::NOT_FOUND));
    }
}
