//! Meal schedule handlers under `/api/mealschedules`.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use mealsched_api_models::MealScheduleDto;
use tracing::{error, info};

use crate::http::auth::AuthContext;
use crate::http::constants::{ROUTE_SCHEDULES, STORE_FAILURE_MESSAGE};
use crate::http::errors::ApiError;
use crate::state::ApiState;
use crate::store::StoreError;

const NO_SCHEDULES: &str = "No meal schedules provided";
const ID_MISMATCH: &str = "ID in the URL does not match the ID in the request body.";

pub(crate) fn store_failure(err: &StoreError) -> ApiError {
    error!(error = %err, "schedule store operation failed");
    ApiError::internal(STORE_FAILURE_MESSAGE, err.to_string())
}

fn validate(schedule: &MealScheduleDto) -> Result<(), ApiError> {
    schedule
        .validation_error()
        .map_or(Ok(()), |message| Err(ApiError::bad_request(message)))
}

pub(crate) async fn list_schedules(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<MealScheduleDto>>, ApiError> {
    let schedules = state
        .store
        .list_schedules()
        .await
        .map_err(|err| store_failure(&err))?;
    Ok(Json(schedules))
}

pub(crate) async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i32>,
) -> Result<Json<MealScheduleDto>, ApiError> {
    state
        .store
        .get_schedule(id)
        .await
        .map_err(|err| store_failure(&err))?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

pub(crate) async fn schedules_for_employee(
    State(state): State<Arc<ApiState>>,
    Path(employee_id): Path<i32>,
) -> Result<Json<Vec<MealScheduleDto>>, ApiError> {
    let schedules = state
        .store
        .schedules_for_employee(employee_id)
        .await
        .map_err(|err| store_failure(&err))?;
    Ok(Json(schedules))
}

pub(crate) async fn schedules_on_date(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<MealScheduleDto>>, ApiError> {
    let schedules = state
        .store
        .schedules_on(date)
        .await
        .map_err(|err| store_failure(&err))?;
    Ok(Json(schedules))
}

pub(crate) async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
    Json(schedule): Json<MealScheduleDto>,
) -> Result<Response, ApiError> {
    validate(&schedule)?;
    let created = state
        .store
        .create_schedule(schedule)
        .await
        .map_err(|err| store_failure(&err))?;
    info!(
        schedule_id = created.schedule_id,
        user = auth.subject(),
        "meal schedule created"
    );

    let location = format!("{ROUTE_SCHEDULES}/{}", created.schedule_id);
    let mut response = (StatusCode::CREATED, Json(created)).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(LOCATION, value);
    }
    Ok(response)
}

pub(crate) async fn replace_schedules_for_date(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
    Json(schedules): Json<Vec<MealScheduleDto>>,
) -> Result<StatusCode, ApiError> {
    let Some(first) = schedules.first() else {
        return Err(ApiError::bad_request(NO_SCHEDULES));
    };
    let Some(date) = first.meal_date else {
        return Err(ApiError::bad_request("Meal date is required"));
    };
    for schedule in &schedules {
        validate(schedule)?;
    }

    let count = schedules.len();
    state
        .store
        .replace_schedules_on(date, schedules)
        .await
        .map_err(|err| store_failure(&err))?;
    info!(%date, count, user = auth.subject(), "meal schedules replaced");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i32>,
    Json(schedule): Json<MealScheduleDto>,
) -> Result<StatusCode, ApiError> {
    if schedule.schedule_id != id {
        return Err(ApiError::bad_request(ID_MISMATCH));
    }
    validate(&schedule)?;
    let updated = state
        .store
        .update_schedule(schedule)
        .await
        .map_err(|err| store_failure(&err))?;
    if !updated {
        return Err(ApiError::not_found());
    }
    info!(schedule_id = id, user = auth.subject(), "meal schedule updated");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .store
        .delete_schedule(id)
        .await
        .map_err(|err| store_failure(&err))?;
    if !removed {
        return Err(ApiError::not_found());
    }
    info!(schedule_id = id, user = auth.subject(), "meal schedule deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::test_state;
    use mealsched_api_models::MAX_NOTES_LEN;
    use mealsched_auth::ClaimSet;

    fn auth() -> Extension<AuthContext> {
        Extension(AuthContext {
            claims: ClaimSet::new().with("name", "admin"),
        })
    }

    fn schedule(employee_id: i32, meal_date: Option<NaiveDate>) -> MealScheduleDto {
        MealScheduleDto {
            schedule_id: 0,
            employee_id,
            employee_name: None,
            meal_date,
            notes: None,
            is_active: true,
        }
    }

    fn day(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, day)
    }

    fn status_of(result: Result<StatusCode, ApiError>) -> StatusCode {
        result.unwrap_or_else(|err| err.status)
    }

    #[tokio::test]
    async fn create_returns_location_and_body() -> anyhow::Result<()> {
        let state = test_state();
        let response = create_schedule(
            State(Arc::clone(&state)),
            auth(),
            Json(schedule(3, day(1))),
        )
        .await
        .map_err(|err| anyhow::anyhow!("create failed with {}", err.status))?;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(LOCATION),
            Some(&HeaderValue::from_static("/api/mealschedules/1"))
        );
        let Json(fetched) = get_schedule(State(state), Path(1))
            .await
            .map_err(|err| anyhow::anyhow!("get failed with {}", err.status))?;
        assert_eq!(fetched.employee_id, 3);
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_date_and_notes() {
        let state = test_state();
        let missing_date =
            create_schedule(State(Arc::clone(&state)), auth(), Json(schedule(1, None))).await;
        assert!(matches!(missing_date, Err(ref err) if err.status == StatusCode::BAD_REQUEST));

        let mut long_notes = schedule(1, day(1));
        long_notes.notes = Some("n".repeat(MAX_NOTES_LEN + 1));
        let too_long = create_schedule(State(state), auth(), Json(long_notes)).await;
        assert!(matches!(too_long, Err(ref err) if err.status == StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn get_unknown_schedule_is_not_found() {
        let result = get_schedule(State(test_state()), Path(404)).await;
        assert!(matches!(result, Err(ref err) if err.status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn batch_replaces_the_first_entrys_day() -> anyhow::Result<()> {
        let state = test_state();
        state.store.create_schedule(schedule(1, day(2))).await?;
        state.store.create_schedule(schedule(2, day(3))).await?;

        let status = status_of(
            replace_schedules_for_date(
                State(Arc::clone(&state)),
                auth(),
                Json(vec![schedule(5, day(2)), schedule(6, day(2))]),
            )
            .await,
        );
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(on_day) = schedules_on_date(State(Arc::clone(&state)), Path(day(2).unwrap_or_default()))
            .await
            .map_err(|err| anyhow::anyhow!("by date failed with {}", err.status))?;
        let employees: Vec<i32> = on_day.iter().map(|s| s.employee_id).collect();
        assert_eq!(employees, vec![5, 6]);

        let Json(for_employee) = schedules_for_employee(State(state), Path(2))
            .await
            .map_err(|err| anyhow::anyhow!("by employee failed with {}", err.status))?;
        assert_eq!(for_employee.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn batch_rejects_empty_and_undated_input() {
        let state = test_state();
        let empty = replace_schedules_for_date(State(Arc::clone(&state)), auth(), Json(vec![])).await;
        assert_eq!(status_of(empty), StatusCode::BAD_REQUEST);

        let undated = replace_schedules_for_date(
            State(state),
            auth(),
            Json(vec![schedule(1, None)]),
        )
        .await;
        assert_eq!(status_of(undated), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_checks_id_and_existence() -> anyhow::Result<()> {
        let state = test_state();
        let created = state.store.create_schedule(schedule(1, day(1))).await?;

        let mut body = created.clone();
        body.notes = Some("late shift".to_string());
        let mismatch = update_schedule(
            State(Arc::clone(&state)),
            auth(),
            Path(created.schedule_id + 1),
            Json(body.clone()),
        )
        .await;
        assert_eq!(status_of(mismatch), StatusCode::BAD_REQUEST);

        let ok = update_schedule(
            State(Arc::clone(&state)),
            auth(),
            Path(created.schedule_id),
            Json(body),
        )
        .await;
        assert_eq!(status_of(ok), StatusCode::NO_CONTENT);

        let mut unknown = schedule(1, day(1));
        unknown.schedule_id = 77;
        let missing = update_schedule(State(state), auth(), Path(77), Json(unknown)).await;
        assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_missing_schedules() -> anyhow::Result<()> {
        let state = test_state();
        let created = state.store.create_schedule(schedule(1, day(1))).await?;
        let first = delete_schedule(State(Arc::clone(&state)), auth(), Path(created.schedule_id)).await;
        assert_eq!(status_of(first), StatusCode::NO_CONTENT);
        let second = delete_schedule(State(state), auth(), Path(created.schedule_id)).await;
        assert_eq!(status_of(second), StatusCode::NOT_FOUND);
        Ok(())
    }
}
