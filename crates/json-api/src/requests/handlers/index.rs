//! Request Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    requests::{errors::into_status_error, models::RequestsResponse},
    state::State,
};

/// Request Index Handler
///
/// Returns the acting user's own requests, newest first.
#[endpoint(
    tags("requests"),
    summary = "List Own Requests",
    security(("sharer_user_id" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RequestsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requestor = depot.actor_or_401()?;

    let requests = state
        .app
        .requests
        .list_own_requests(requestor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(RequestsResponse {
        requests: requests.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shareit_app::domain::requests::{MockRequestsService, records::RequestId};

    use crate::test_helpers::{TEST_ACTOR, make_request, requests_service};

    use super::*;

    fn make_service(requests: MockRequestsService) -> Service {
        requests_service(requests, Router::with_path("requests").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_own_requests() -> TestResult {
        let newer = make_request(RequestId::from_i64(2), TEST_ACTOR);
        let older = make_request(RequestId::from_i64(1), TEST_ACTOR);

        let mut requests = MockRequestsService::new();

        requests
            .expect_list_own_requests()
            .once()
            .withf(|requestor| *requestor == TEST_ACTOR)
            .return_once(move |_| Ok(vec![newer, older]));

        requests.expect_create_request().never();
        requests.expect_list_other_requests().never();
        requests.expect_get_request().never();

        let mut res = TestClient::get("http://example.com/requests")
            .send(&make_service(requests))
            .await;

        let body: RequestsResponse = res.take_json().await?;
        let ids: Vec<i64> = body.requests.iter().map(|request| request.id).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(ids, vec![2, 1]);

        Ok(())
    }
}
