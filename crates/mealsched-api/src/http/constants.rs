//! Shared HTTP constants (headers, routes, fixed messages).

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
pub(crate) const BEARER_SCHEME: &str = "Bearer";

pub(crate) const ROUTE_SCHEDULES: &str = "/api/mealschedules";
pub(crate) const ROUTE_EMPLOYEES: &str = "/api/employees";

pub(crate) const LOGIN_FAILURE_MESSAGE: &str = "An error occurred during login";
pub(crate) const AUTH_FAILURE_MESSAGE: &str = "An error occurred during authentication";
pub(crate) const STORE_FAILURE_MESSAGE: &str = "An error occurred while accessing schedules";

/// Role granted to every user who logs in.
pub(crate) const DEFAULT_ROLE: &str = "User";
