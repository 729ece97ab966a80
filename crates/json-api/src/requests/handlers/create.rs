//! Create Request Handler

use std::sync::Arc;

use garde::Validate;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use shareit_app::domain::requests::data::NewRequest;

use crate::{
    extensions::*,
    requests::{errors::into_status_error, models::RequestResponse},
    state::State,
    validation,
};

/// Create Request Request
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct CreateRequestRequest {
    /// What the requestor is looking for
    #[garde(custom(validation::not_blank))]
    pub description: String,
}

impl TryFrom<CreateRequestRequest> for NewRequest {
    type Error = StatusError;

    fn try_from(request: CreateRequestRequest) -> Result<Self, Self::Error> {
        validation::validate(&request)?;

        Ok(NewRequest {
            description: request.description,
        })
    }
}

/// Create Request Handler
#[endpoint(
    tags("requests"),
    summary = "Create Request",
    security(("sharer_user_id" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Request created"),
        (status_code = StatusCode::NOT_FOUND, description = "Requestor not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "requests.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateRequestRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RequestResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requestor = depot.actor_or_401()?;
    let request = NewRequest::try_from(json.into_inner())?;

    let request = state
        .app
        .requests
        .create_request(requestor, request)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/requests/{}", request.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(request_id = %request.id, requestor_id = %requestor, "created request");

    Ok(Json(request.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shareit_app::domain::requests::{
        MockRequestsService, RequestsServiceError, records::RequestId,
    };

    use crate::test_helpers::{TEST_ACTOR, make_request, requests_service};

    use super::*;

    fn make_service(requests: MockRequestsService) -> Service {
        requests_service(requests, Router::with_path("requests").post(handler))
    }

    #[tokio::test]
    async fn test_create_request_success() -> TestResult {
        let request = make_request(RequestId::from_i64(2), TEST_ACTOR);

        let mut requests = MockRequestsService::new();

        requests
            .expect_create_request()
            .once()
            .withf(|requestor, new| {
                *requestor == TEST_ACTOR && new.description == "Need a ladder"
            })
            .return_once(move |_, _| Ok(request));

        requests.expect_list_own_requests().never();
        requests.expect_list_other_requests().never();
        requests.expect_get_request().never();

        let mut res = TestClient::post("http://example.com/requests")
            .json(&json!({ "description": "Need a ladder" }))
            .send(&make_service(requests))
            .await;

        let body: RequestResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/requests/2"));
        assert!(body.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_request_blank_description_returns_400() -> TestResult {
        let mut requests = MockRequestsService::new();

        requests.expect_create_request().never();

        let res = TestClient::post("http://example.com/requests")
            .json(&json!({ "description": "" }))
            .send(&make_service(requests))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_request_unknown_requestor_returns_404() -> TestResult {
        let mut requests = MockRequestsService::new();

        requests
            .expect_create_request()
            .once()
            .return_once(|_, _| Err(RequestsServiceError::UserNotFound));

        requests.expect_list_own_requests().never();
        requests.expect_list_other_requests().never();
        requests.expect_get_request().never();

        let res = TestClient::post("http://example.com/requests")
            .json(&json!({ "description": "Need a ladder" }))
            .send(&make_service(requests))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
