//! Diagnosis session endpoints.
//!
//! `new_case` opens a session with a fully gated classification;
//! `follow_up` advances one turn from caller-echoed state. Classification
//! runs the model `MC_PASSES` times, so both hand the work to a blocking
//! thread instead of stalling the async runtime.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{
    ApiContext, DataEnvelope, DiagnosisBody, FollowUpBody, FollowUpRequest, NewCaseRequest,
};
use crate::classify::filter::is_allowed;
use crate::service::Diagnosis;
use crate::triage::language::detect_language;
use crate::triage::{Language, SelectionMode, SessionDecision, SessionState};

pub async fn new_case(
    State(ctx): State<ApiContext>,
    Json(req): Json<NewCaseRequest>,
) -> Result<(StatusCode, Json<DataEnvelope<DiagnosisBody>>), ApiError> {
    let symptoms = req.symptoms.trim().to_string();
    if symptoms.is_empty() {
        return Err(ApiError::EmptyInput);
    }

    let service = ctx.service.clone();
    let diagnosis = tokio::task::spawn_blocking(move || service.diagnose(&symptoms))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope {
            data: DiagnosisBody::from_diagnosis(&diagnosis),
        }),
    ))
}

pub async fn follow_up(
    State(ctx): State<ApiContext>,
    Json(req): Json<FollowUpRequest>,
) -> Result<Json<DataEnvelope<FollowUpBody>>, ApiError> {
    if !is_allowed(&req.disease) {
        return Err(ApiError::UnknownDisease(req.disease));
    }

    if let Some(id) = &req.last_question_id {
        tracing::debug!(
            question = %id,
            answer = req.last_answer.as_deref().unwrap_or(""),
            "follow-up answer recorded"
        );
    }

    let symptoms = req.symptoms.trim().to_string();

    // Reclassify the cumulative narrative when there is one; the echoed
    // state stands in when a client sends a bare state update.
    let reassessed: Option<Diagnosis> = if symptoms.is_empty() {
        None
    } else {
        let service = ctx.service.clone();
        let text = symptoms.clone();
        Some(
            tokio::task::spawn_blocking(move || service.reassess(&text))
                .await
                .map_err(|e| ApiError::Internal(e.to_string()))??,
        )
    };

    let (disease, confidence, uncertainty, top_diseases, diagnosis) = match &reassessed {
        Some(d) => (
            d.pred.clone(),
            d.confidence,
            d.uncertainty,
            d.top_diseases.clone(),
            DiagnosisBody::from_diagnosis(d),
        ),
        None => {
            let language = detect_language(&symptoms).unwrap_or(Language::English);
            let model = ctx.service.model_name(language).to_string();
            (
                req.disease.clone(),
                req.confidence,
                req.uncertainty,
                req.top_diseases.clone(),
                DiagnosisBody::echo(&req, model),
            )
        }
    };

    let state = SessionState {
        symptoms: &symptoms,
        disease: &disease,
        confidence,
        uncertainty,
        asked_questions: &req.asked_questions,
        top_diseases: &top_diseases,
        mode: SelectionMode::from_str(&req.mode),
        force: req.force,
    };

    let body = match ctx.service.next_question(&symptoms, &state) {
        SessionDecision::Stop(reason) => FollowUpBody {
            should_stop: true,
            reason: Some(reason.code()),
            question: None,
            diagnosis,
        },
        SessionDecision::Continue(question) => FollowUpBody {
            should_stop: false,
            reason: None,
            question: Some(question.into()),
            diagnosis,
        },
    };

    Ok(Json(DataEnvelope { data: body }))
}
