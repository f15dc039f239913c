// src/handlers/student.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        personality::Trait,
        student::{
            AnswerSet, InitiateRequest, MatchResult, Student, StudentEnvelope,
            SubmitAnswersRequest, normalize_name,
        },
    },
    scoring,
    state::AppState,
};

/// Runs the scoring pipeline and attaches book recommendations.
///
/// A failing book source only costs the recommendations, never the result.
async fn match_result(
    state: &AppState,
    student: &Student,
    answers: &AnswerSet,
) -> Result<MatchResult, AppError> {
    let eval = scoring::evaluate(&state.catalog.archetypes, &student.questions, answers)?;

    let books = match state.books.books_for(eval.genre).await {
        Ok(books) => books,
        Err(e) => {
            tracing::warn!(genre = %eval.genre, "Failed to fetch books: {}", e);
            Vec::new()
        }
    };

    tracing::info!(name = %student.name, genre = %eval.genre, "Matched student with genre");

    Ok(MatchResult {
        genre: eval.genre,
        traits: Trait::ALL.to_vec(),
        student_vector: eval.student_vector.to_vec(),
        genre_vector: eval.genre_vector.to_vec(),
        books,
    })
}

/// Response for a student that already existed, with the result once answered.
async fn found(state: &AppState, student: &Student) -> Result<StudentEnvelope, AppError> {
    let result = match &student.answers {
        Some(answers) => Some(match_result(state, student, answers).await?),
        None => None,
    };

    Ok(StudentEnvelope {
        message: "Student found.".to_string(),
        student: student.into(),
        result,
    })
}

/// Starts or resumes a quiz.
///
/// * Unknown name: samples a fresh question set and creates the student (201).
/// * Known name without answers: returns the stored questions.
/// * Known name with answers: also returns the matched genre.
#[utoipa::path(
    post,
    path = "/student",
    request_body = InitiateRequest,
    responses(
        (status = 201, description = "Student created", body = StudentEnvelope),
        (status = 200, description = "Student found", body = StudentEnvelope),
        (status = 400, description = "Invalid student name")
    )
)]
pub async fn initiate(
    State(state): State<AppState>,
    payload: Result<Json<InitiateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let req = InitiateRequest {
        name: normalize_name(&req.name),
    };
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if let Some(student) = state.store.find(&req.name).await? {
        return Ok((StatusCode::OK, Json(found(&state, &student).await?)));
    }

    let questions = {
        let mut rng = state
            .rng
            .lock()
            .map_err(|_| AppError::InternalServerError("question sampler lock poisoned".to_string()))?;
        scoring::sample(&state.catalog.bank, state.config.question_count, &mut *rng)?
    };

    let (student, inserted) = state.store.create(&req.name, questions).await?;
    if !inserted {
        // Another request created this student after our lookup.
        return Ok((StatusCode::OK, Json(found(&state, &student).await?)));
    }
    tracing::info!(
        name = %student.name,
        questions = student.questions.len(),
        "Created student"
    );

    Ok((
        StatusCode::CREATED,
        Json(StudentEnvelope {
            message: "Student created successfully.".to_string(),
            student: (&student).into(),
            result: None,
        }),
    ))
}

/// Replaces a student's answers and returns the matched genre.
///
/// * Answers must line up with the student's questions; any problem rejects
///   the whole submission and nothing is stored.
#[utoipa::path(
    put,
    path = "/student",
    request_body = SubmitAnswersRequest,
    responses(
        (status = 200, description = "Answers updated", body = StudentEnvelope),
        (status = 400, description = "Invalid name or answers"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn submit_answers(
    State(state): State<AppState>,
    payload: Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let req = SubmitAnswersRequest {
        name: normalize_name(&req.name),
        answers: req.answers,
    };
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let student = state
        .store
        .find(&req.name)
        .await?
        .ok_or(AppError::NotFound("Student not found.".to_string()))?;

    let answers = AnswerSet::validate(&req.answers, &student.questions).map_err(|e| {
        tracing::warn!(name = %student.name, "Rejected answers: {}", e);
        AppError::from(e)
    })?;

    let student = state
        .store
        .replace_answers(&student.name, &answers)
        .await?
        .ok_or(AppError::NotFound("Student not found.".to_string()))?;

    let result = match_result(&state, &student, &answers).await?;

    Ok(Json(StudentEnvelope {
        message: "Answers updated successfully.".to_string(),
        student: (&student).into(),
        result: Some(result),
    }))
}
