//! Service index: a small self-describing document for clients probing
//! the API root.

use axum::Json;
use serde_json::json;

use crate::classify::ALLOWED_DISEASES;

pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Lusog triage API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "diseases": ALLOWED_DISEASES,
        "languages": ["en", "tl"],
        "endpoints": {
            "new": "POST /diagnosis/new",
            "follow_up": "POST /diagnosis/follow-up",
        },
    }))
}
