use chrono::Utc;
use tracing::info;

use crate::auth::Actor;
use crate::database::models::{NewPublication, Publication};
use crate::error::ApiError;
use crate::schema::{CreatePublicationInput, PublicationStatus};
use crate::state::AppState;

/// `published_at` is stamped only when the publication is created PUBLISHED.
pub async fn create_publication(
    state: AppState,
    input: CreatePublicationInput,
    author: Actor,
) -> Result<Publication, ApiError> {
    let now = Utc::now();
    let published_at = (input.status == PublicationStatus::Published).then_some(now);

    let publication = state
        .repos
        .publications
        .create_publication(NewPublication {
            title: input.title,
            content: input.content,
            kind: input.kind,
            status: input.status,
            featured: input.featured,
            author_id: author.id,
            published_at,
            created_at: now,
        })
        .await?;

    info!(publication_id = publication.id, author_id = publication.author_id, status = %publication.status, "Publication created");
    Ok(publication)
}

pub async fn get_publications(state: AppState) -> Result<Vec<Publication>, ApiError> {
    Ok(state.repos.publications.list_publications().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support;
    use crate::schema::FromPayload;
    use serde_json::json;

    fn town_hall(status: &str) -> CreatePublicationInput {
        CreatePublicationInput::from_payload(&json!({
            "title": "Town Hall Meeting",
            "content": "Meeting scheduled for next week",
            "type": "EVENT",
            "status": status,
            "featured": false
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn published_at_follows_initial_status() {
        let state = test_support::state();

        let published = create_publication(state.clone(), town_hall("PUBLISHED"), test_support::actor(7))
            .await
            .unwrap();
        assert!(published.published_at.is_some());
        assert_eq!(published.author_id, 7);

        let draft = create_publication(state, town_hall("DRAFT"), test_support::actor(7)).await.unwrap();
        assert_eq!(draft.published_at, None);

        let wire = serde_json::to_value(&draft).unwrap();
        assert_eq!(wire["type"], "EVENT");
        assert!(wire["published_at"].is_null());
    }
}
