use actix_web::{get, http::header, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    cache::Dimension,
    errors::AppError,
    models::{
        domain::ScoreResult,
        dto::response::{AverageScoreResponse, ScoreResultResponse},
    },
};

fn to_response(results: Vec<ScoreResult>) -> Vec<ScoreResultResponse> {
    results.into_iter().map(ScoreResultResponse::from).collect()
}

#[get("/results/average/{dimension}/{value}")]
async fn average_score(
    state: web::Data<AppState>,
    path: web::Path<(String, i64)>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (dimension, value) = path.into_inner();
    let dimension: Dimension = dimension.parse()?;

    let average_score = state
        .aggregation
        .average_score(dimension, value, state.deadline())
        .await?;

    Ok(HttpResponse::Ok().json(AverageScoreResponse {
        dimension,
        value,
        average_score,
    }))
}

#[get("/results/me")]
async fn my_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state
        .results_service
        .my_results(auth.user_id, state.deadline())
        .await?;
    Ok(HttpResponse::Ok().json(to_response(results)))
}

#[get("/companies/{company_id}/results")]
async fn company_results(
    state: web::Data<AppState>,
    company_id: web::Path<i64>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state
        .results_service
        .company_results(company_id.into_inner(), state.deadline())
        .await?;
    Ok(HttpResponse::Ok().json(to_response(results)))
}

#[get("/companies/{company_id}/users/{user_id}/results")]
async fn company_user_results(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, user_id) = path.into_inner();
    let results = state
        .results_service
        .company_user_results(company_id, user_id, state.deadline())
        .await?;
    Ok(HttpResponse::Ok().json(to_response(results)))
}

#[get("/companies/{company_id}/quizzes/{quiz_id}/results")]
async fn company_quiz_results(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, quiz_id) = path.into_inner();
    let results = state
        .results_service
        .company_quiz_results(company_id, quiz_id, state.deadline())
        .await?;
    Ok(HttpResponse::Ok().json(to_response(results)))
}

#[get("/companies/{company_id}/quizzes/{quiz_id}/results.csv")]
async fn export_company_quiz_csv(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, quiz_id) = path.into_inner();
    let csv = state
        .results_service
        .export_company_quiz_csv(company_id, quiz_id, state.deadline())
        .await?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"company_{}_quiz_{}_results.csv\"",
                company_id, quiz_id
            ),
        ))
        .body(csv))
}
