//! Request Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shareit_app::domain::requests::records::RequestRecord;

use crate::items::models::ItemResponse;

/// A posted ask for an item, with the items listed in answer to it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RequestResponse {
    pub id: i64,
    pub requestor_id: i64,
    pub description: String,
    pub created_at: String,

    /// Items listed in answer to this request
    pub items: Vec<ItemResponse>,
}

impl From<RequestRecord> for RequestResponse {
    fn from(request: RequestRecord) -> Self {
        RequestResponse {
            id: request.id.into_i64(),
            requestor_id: request.requestor_id.into_i64(),
            description: request.description,
            created_at: request.created_at.to_string(),
            items: request.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RequestsResponse {
    /// Requests, newest first
    pub requests: Vec<RequestResponse>,
}
