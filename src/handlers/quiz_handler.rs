use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{request::AttemptSubmission, response::ScoreResultResponse},
};

#[get("/companies/{company_id}/quizzes/{quiz_id}")]
async fn get_quiz_for_solve(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (company_id, quiz_id) = path.into_inner();
    let quiz = state
        .attempt_service
        .get_quiz_for_solve(company_id, quiz_id, state.deadline())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/companies/{company_id}/quiz-attempts")]
async fn submit_attempt(
    state: web::Data<AppState>,
    company_id: web::Path<i64>,
    request: web::Json<AttemptSubmission>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let submission = request.into_inner();
    submission.validate()?;

    let result = state
        .attempt_service
        .submit_attempt(
            auth.user_id,
            company_id.into_inner(),
            submission,
            state.deadline(),
        )
        .await?;
    Ok(HttpResponse::Created().json(ScoreResultResponse::from(result)))
}
