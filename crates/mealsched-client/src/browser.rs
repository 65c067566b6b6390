//! `wasm32` adapters over browser `LocalStorage` and `fetch`.

use async_trait::async_trait;
use gloo::storage::{LocalStorage, Storage, errors::StorageError as GlooStorageError};
use gloo_net::http::{Method as FetchMethod, Request};
use http::Method;

use crate::core::storage::{AUTH_TOKEN_KEY, CredentialStore, StorageError};
use crate::core::transport::{HttpTransport, TransportError};

/// [`CredentialStore`] backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageCredentialStore;

#[async_trait(?Send)]
impl CredentialStore for LocalStorageCredentialStore {
    async fn get(&self) -> Result<Option<String>, StorageError> {
        match LocalStorage::get::<String>(AUTH_TOKEN_KEY) {
            Ok(token) => Ok(Some(token)),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(unavailable("get", &err)),
        }
    }

    async fn set(&self, token: &str) -> Result<(), StorageError> {
        LocalStorage::set(AUTH_TOKEN_KEY, token).map_err(|err| unavailable("set", &err))
    }

    async fn remove(&self) -> Result<(), StorageError> {
        LocalStorage::delete(AUTH_TOKEN_KEY);
        Ok(())
    }
}

fn unavailable(operation: &'static str, err: &GlooStorageError) -> StorageError {
    StorageError::Unavailable {
        operation,
        detail: err.to_string(),
    }
}

/// [`HttpTransport`] using the browser `fetch` API.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(
        &self,
        request: http::Request<String>,
    ) -> Result<http::Response<String>, TransportError> {
        let (parts, body) = request.into_parts();
        let mut outbound = Request::new(&parts.uri.to_string()).method(fetch_method(&parts.method));
        for (name, value) in &parts.headers {
            if let Ok(value) = value.to_str() {
                outbound = outbound.header(name.as_str(), value);
            }
        }
        if !body.is_empty() {
            outbound = outbound.body(body);
        }

        let response = outbound.send().await.map_err(network)?;
        let status = response.status();
        let text = response.text().await.map_err(network)?;

        let mut reply = http::Response::new(text);
        *reply.status_mut() = http::StatusCode::from_u16(status).map_err(|err| TransportError::Network {
            detail: err.to_string(),
        })?;
        Ok(reply)
    }
}

fn fetch_method(method: &Method) -> FetchMethod {
    match *method {
        Method::POST => FetchMethod::POST,
        Method::PUT => FetchMethod::PUT,
        Method::DELETE => FetchMethod::DELETE,
        Method::PATCH => FetchMethod::PATCH,
        Method::HEAD => FetchMethod::HEAD,
        Method::OPTIONS => FetchMethod::OPTIONS,
        _ => FetchMethod::GET,
    }
}

fn network(err: gloo_net::Error) -> TransportError {
    TransportError::Network {
        detail: err.to_string(),
    }
}
