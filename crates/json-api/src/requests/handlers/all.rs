//! Other Users' Requests Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    requests::{errors::into_status_error, models::RequestsResponse},
    state::State,
    validation::Page,
};

/// Other Users' Requests Handler
///
/// Returns everyone else's requests, newest first.
#[endpoint(
    tags("requests"),
    summary = "List Other Users' Requests",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(
    from: QueryParam<i64, false>,
    size: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<RequestsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.actor_or_401()?;
    let page = Page::new(from.into_inner(), size.into_inner())?;

    let requests = state
        .app
        .requests
        .list_other_requests(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RequestsResponse {
        requests: page.apply(requests).into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shareit_app::domain::requests::{
        MockRequestsService, RequestsServiceError, records::RequestId,
    };

    use crate::test_helpers::{OTHER_USER, TEST_ACTOR, make_request, requests_service};

    use super::*;

    fn make_service(requests: MockRequestsService) -> Service {
        requests_service(requests, Router::with_path("requests/all").get(handler))
    }

    #[tokio::test]
    async fn test_all_lists_other_users_requests_paged() -> TestResult {
        let listed = vec![
            make_request(RequestId::from_i64(3), OTHER_USER),
            make_request(RequestId::from_i64(2), OTHER_USER),
            make_request(RequestId::from_i64(1), OTHER_USER),
        ];

        let mut requests = MockRequestsService::new();

        requests
            .expect_list_other_requests()
            .once()
            .withf(|user| *user == TEST_ACTOR)
            .return_once(move |_| Ok(listed));

        requests.expect_create_request().never();
        requests.expect_list_own_requests().never();
        requests.expect_get_request().never();

        let mut res = TestClient::get("http://example.com/requests/all?size=2")
            .send(&make_service(requests))
            .await;

        let body: RequestsResponse = res.take_json().await?;
        let ids: Vec<i64> = body.requests.iter().map(|request| request.id).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(ids, vec![3, 2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_all_unknown_user_returns_404() -> TestResult {
        let mut requests = MockRequestsService::new();

        requests
            .expect_list_other_requests()
            .once()
            .return_once(|_| Err(RequestsServiceError::UserNotFound));

        requests.expect_create_request().never();
        requests.expect_list_own_requests().never();
        requests.expect_get_request().never();

        let res = TestClient::get("http://example.com/requests/all")
            .send(&make_service(requests))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
