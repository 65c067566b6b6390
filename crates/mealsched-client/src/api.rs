//! Typed REST client for the Mealsched API.
//!
//! # Design
//! - Generic over [`HttpTransport`] so the same client runs on `fetch` in the browser
//!   and on a recording transport in tests.
//! - A 401 from the login endpoint is an expected outcome, not an error.

use chrono::NaiveDate;
use http::{Method, StatusCode, header::CONTENT_TYPE};
use mealsched_api_models::{EmployeeDto, LoginRequest, LoginResponse, MealScheduleDto};
use serde::{Serialize, de::DeserializeOwned};

use crate::core::transport::HttpTransport;
use crate::error::{ClientError, ClientResult};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Result of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted.
    Authenticated(LoginResponse),
    /// Credentials rejected by the server.
    Rejected,
}

/// JSON client bound to one API base URL.
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Client sending requests for `base_url` through `transport`.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    /// Underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /api/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or any status other than 200/401.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginOutcome> {
        let body = LoginRequest::new(username, password);
        let response = self.send(Method::POST, "/api/login", Some(&body)).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(LoginOutcome::Rejected);
        }
        decode(success(response)?).map(LoginOutcome::Authenticated)
    }

    /// `GET /api/mealschedules`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status, or malformed body.
    pub async fn list_schedules(&self) -> ClientResult<Vec<MealScheduleDto>> {
        self.get_json("/api/mealschedules").await
    }

    /// `GET /api/mealschedules/{id}`; `None` on 404.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, other error statuses, or malformed body.
    pub async fn get_schedule(&self, id: i32) -> ClientResult<Option<MealScheduleDto>> {
        let response = self
            .send::<()>(Method::GET, &format!("/api/mealschedules/{id}"), None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(success(response)?).map(Some)
    }

    /// `GET /api/mealschedules/employee/{employee_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status, or malformed body.
    pub async fn schedules_for_employee(
        &self,
        employee_id: i32,
    ) -> ClientResult<Vec<MealScheduleDto>> {
        self.get_json(&format!("/api/mealschedules/employee/{employee_id}"))
            .await
    }

    /// `GET /api/mealschedules/date/{date}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status, or malformed body.
    pub async fn schedules_on(&self, date: NaiveDate) -> ClientResult<Vec<MealScheduleDto>> {
        self.get_json(&format!("/api/mealschedules/date/{}", date.format("%Y-%m-%d")))
            .await
    }

    /// `POST /api/mealschedules`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status, or malformed body.
    pub async fn create_schedule(&self, schedule: &MealScheduleDto) -> ClientResult<MealScheduleDto> {
        let response = self
            .send(Method::POST, "/api/mealschedules", Some(schedule))
            .await?;
        decode(success(response)?)
    }

    /// `PUT /api/mealschedules/{id}` using the schedule's own id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or error status.
    pub async fn update_schedule(&self, schedule: &MealScheduleDto) -> ClientResult<()> {
        let path = format!("/api/mealschedules/{}", schedule.schedule_id);
        let response = self.send(Method::PUT, &path, Some(schedule)).await?;
        success(response).map(drop)
    }

    /// `DELETE /api/mealschedules/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or error status.
    pub async fn delete_schedule(&self, id: i32) -> ClientResult<()> {
        let response = self
            .send::<()>(Method::DELETE, &format!("/api/mealschedules/{id}"), None)
            .await?;
        success(response).map(drop)
    }

    /// `POST /api/mealschedules/batch`: replace every schedule on the first entry's day.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or error status.
    pub async fn replace_schedules(&self, schedules: &[MealScheduleDto]) -> ClientResult<()> {
        let response = self
            .send(Method::POST, "/api/mealschedules/batch", Some(&schedules))
            .await?;
        success(response).map(drop)
    }

    /// `GET /api/employees`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status, or malformed body.
    pub async fn list_employees(&self) -> ClientResult<Vec<EmployeeDto>> {
        self.get_json("/api/employees").await
    }

    /// `POST /api/employees`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, error status, or malformed body.
    pub async fn create_employee(&self, employee: &EmployeeDto) -> ClientResult<EmployeeDto> {
        let response = self
            .send(Method::POST, "/api/employees", Some(employee))
            .await?;
        decode(success(response)?)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        decode(success(response)?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<http::Response<String>> {
        let mut builder = http::Request::builder()
            .method(method)
            .uri(format!("{}{path}", self.base_url));
        let payload = match body {
            Some(body) => {
                builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE);
                serde_json::to_string(body).map_err(|source| ClientError::Encode { source })?
            }
            None => String::new(),
        };
        let request = builder
            .body(payload)
            .map_err(|source| ClientError::Request { source })?;
        self.transport
            .send(request)
            .await
            .map_err(|source| ClientError::Transport { source })
    }
}

fn success(response: http::Response<String>) -> ClientResult<http::Response<String>> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            status: response.status().as_u16(),
        })
    }
}

fn decode<R: DeserializeOwned>(response: http::Response<String>) -> ClientResult<R> {
    serde_json::from_str(response.body()).map_err(|source| ClientError::Decode { source })
}
