use std::collections::BTreeMap;

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{Json, TopicSummary};

/// GET /api/topics
pub async fn list_topics(State(state): State<AppState>) -> Json<BTreeMap<String, TopicSummary>> {
    Json(
        state
            .curriculum()
            .topics()
            .map(|(id, topic)| (id.to_string(), TopicSummary::from(topic)))
            .collect(),
    )
}
