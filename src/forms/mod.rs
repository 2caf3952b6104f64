//! Form validation and submission, independent of any widget tree.
//!
//! Validation stops at the first invalid field so the form can focus it.
//! Nothing here navigates; callers decide what a result means for the UI.

use crate::api::{ApiError, ApiOutcome, Backend};
use crate::errors::{flatten_errors, Failure};
use crate::models::{CreateNoteParams, LoginParams, Note, Token, Ttl};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub login: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Login,
    Password,
}

pub fn validate_login(input: &LoginInput) -> Result<LoginParams, LoginField> {
    if input.login.is_empty() {
        return Err(LoginField::Login);
    }
    if input.password.is_empty() {
        return Err(LoginField::Password);
    }
    Ok(LoginParams {
        login: input.login.clone(),
        password: input.password.clone(),
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub ttl: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Content,
    Ttl,
}

pub fn validate_note(input: &NoteInput) -> Result<CreateNoteParams, NoteField> {
    if input.title.is_empty() {
        return Err(NoteField::Title);
    }
    if input.content.is_empty() {
        return Err(NoteField::Content);
    }
    let ttl = match input.ttl.trim() {
        "" => None,
        raw => Some(Ttl::parse(raw).map_err(|_| NoteField::Ttl)?),
    };
    Ok(CreateNoteParams {
        title: input.title.clone(),
        content: input.content.clone(),
        ttl,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoginAttempt {
    /// Rejected locally; the backend was not called.
    Invalid(LoginField),
    Accepted(Token),
    /// Credentials refused; carries the flattened backend message.
    Rejected(String),
    Failed(ApiError),
}

pub async fn attempt_login(backend: &dyn Backend, input: &LoginInput) -> LoginAttempt {
    let params = match validate_login(input) {
        Ok(params) => params,
        Err(field) => return LoginAttempt::Invalid(field),
    };

    match backend.login(&params).await {
        ApiOutcome::Data(token) => {
            tracing::info!(login = %params.login, "credentials accepted");
            LoginAttempt::Accepted(token)
        }
        ApiOutcome::Domain(errors) => {
            tracing::warn!(login = %params.login, "credentials rejected");
            LoginAttempt::Rejected(flatten_errors(&errors))
        }
        ApiOutcome::Transport(e) => LoginAttempt::Failed(e),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CreateAttempt {
    Invalid(NoteField),
    Created(Note),
    Failed(Failure),
}

pub async fn attempt_create(backend: &dyn Backend, input: &NoteInput) -> CreateAttempt {
    let params = match validate_note(input) {
        Ok(params) => params,
        Err(field) => return CreateAttempt::Invalid(field),
    };

    match backend.create_note(&params).await.into_result() {
        Ok(note) => {
            tracing::info!(note = %note.note_id, "note created");
            CreateAttempt::Created(note)
        }
        Err(failure) => CreateAttempt::Failed(failure),
    }
}
