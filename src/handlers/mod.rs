pub mod health_handler;
pub mod quiz_handler;
pub mod results_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{get_quiz_for_solve, submit_attempt};
pub use results_handler::{
    average_score, company_quiz_results, company_results, company_user_results,
    export_company_quiz_csv, my_results,
};

/// Registers every route. Health probes are public; everything under `/api`
/// requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .service(health_check)
    .service(health_check_ready)
    .service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(get_quiz_for_solve)
            .service(submit_attempt)
            .service(average_score)
            .service(my_results)
            .service(company_results)
            .service(company_user_results)
            .service(company_quiz_results)
            .service(export_company_quiz_csv),
    );
}
