use axum::Json;
use geoprompt_intent::list_canned;

use crate::dto::CatalogEntry;

pub async fn list_catalog() -> Json<Vec<CatalogEntry>> {
    let entries = list_canned()
        .iter()
        .map(|canned| CatalogEntry {
            keyword: canned.keyword,
            dataset: canned.data_type,
            description: canned.description,
            query: canned.query,
        })
        .collect();
    Json(entries)
}
