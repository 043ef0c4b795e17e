use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{FormError, FormResult};
use crate::form::{FormState, FormTemplate};
use crate::language::Language;

/// Lifecycle of a stored application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
}

/// Stored application for one scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: Uuid,
    pub scheme_id: String,
    /// Form state serialized as a JSON object of field name to value
    pub form_data: String,
    pub language: Language,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when a submission is first stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubmission {
    pub scheme_id: String,
    pub form_data: String,
    pub language: Language,
    pub status: SubmissionStatus,
}

impl FormSubmission {
    fn from_new(new: NewSubmission) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            scheme_id: new.scheme_id,
            form_data: new.form_data,
            language: new.language,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Decode the stored form data.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Serialization`] when `form_data` is not a flat JSON object.
    pub fn form_state(&self) -> FormResult<FormState> {
        Ok(FormState::from_json(&self.form_data)?)
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SubmissionStatus::Submitted
    }
}

/// Persistence for form submissions
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Store a new submission and return its id.
    async fn create(&self, submission: NewSubmission) -> FormResult<Uuid>;

    /// Replace the form data and status of an existing submission.
    ///
    /// # Errors
    ///
    /// [`FormError::SubmissionNotFound`] when no submission has that id.
    async fn update(&self, id: Uuid, form_data: String, status: SubmissionStatus) -> FormResult<()>;

    async fn get(&self, id: Uuid) -> FormResult<Option<FormSubmission>>;
}

/// Process-local store, used by the console tool and tests
#[derive(Debug, Default)]
pub struct InMemoryFormStore {
    submissions: Mutex<HashMap<Uuid, FormSubmission>>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.submissions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.lock().is_empty()
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn create(&self, submission: NewSubmission) -> FormResult<Uuid> {
        let submission = FormSubmission::from_new(submission);
        let id = submission.id;
        self.submissions.lock().insert(id, submission);
        Ok(id)
    }

    async fn update(&self, id: Uuid, form_data: String, status: SubmissionStatus) -> FormResult<()> {
        let mut submissions = self.submissions.lock();
        let existing = submissions.get_mut(&id).ok_or(FormError::SubmissionNotFound(id))?;
        existing.form_data = form_data;
        existing.status = status;
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn get(&self, id: Uuid) -> FormResult<Option<FormSubmission>> {
        Ok(self.submissions.lock().get(&id).cloned())
    }
}

/// One citizen's application for a scheme, saved as a draft and later submitted
pub struct FormSession {
    scheme_id: String,
    language: Language,
    template: FormTemplate,
    store: Arc<dyn FormStore>,
    submission_id: Option<Uuid>,
}

impl FormSession {
    pub fn new(
        scheme_id: impl Into<String>,
        language: Language,
        template: FormTemplate,
        store: Arc<dyn FormStore>,
    ) -> Self {
        Self {
            scheme_id: scheme_id.into(),
            language,
            template,
            store,
            submission_id: None,
        }
    }

    pub fn scheme_id(&self) -> &str {
        &self.scheme_id
    }

    pub fn submission_id(&self) -> Option<Uuid> {
        self.submission_id
    }

    /// Store the current values as a draft, creating the record on first save.
    ///
    /// Required fields are not checked.
    pub async fn save_draft(&mut self, state: &FormState) -> FormResult<FormSubmission> {
        let saved = self.persist(state, SubmissionStatus::Draft).await?;
        info!(submission_id = %saved.id, scheme_id = %self.scheme_id, "Draft saved");
        Ok(saved)
    }

    /// Submit the application.
    ///
    /// # Errors
    ///
    /// [`FormError::MissingRequired`] listing every required field without a
    /// value; nothing is stored in that case.
    pub async fn submit(&mut self, state: &FormState) -> FormResult<FormSubmission> {
        let missing = self.template.missing_required(state);
        if !missing.is_empty() {
            return Err(FormError::MissingRequired(missing));
        }

        let saved = self.persist(state, SubmissionStatus::Submitted).await?;
        info!(submission_id = %saved.id, scheme_id = %self.scheme_id, "Application submitted");
        Ok(saved)
    }

    async fn persist(&mut self, state: &FormState, status: SubmissionStatus) -> FormResult<FormSubmission> {
        let form_data = state.to_json()?;

        let id = match self.submission_id {
            Some(id) => {
                self.store.update(id, form_data, status).await?;
                id
            }
            None => {
                let id = self
                    .store
                    .create(NewSubmission {
                        scheme_id: self.scheme_id.clone(),
                        form_data,
                        language: self.language,
                        status,
                    })
                    .await?;
                self.submission_id = Some(id);
                id
            }
        };

        self.store.get(id).await?.ok_or(FormError::SubmissionNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (FormSession, Arc<InMemoryFormStore>) {
        let store = Arc::new(InMemoryFormStore::new());
        let session = FormSession::new(
            "pm-kisan",
            Language::Hindi,
            FormTemplate::standard_application(),
            store.clone(),
        );
        (session, store)
    }

    #[tokio::test]
    async fn test_draft_is_created_then_updated() {
        let (mut session, store) = session();
        let mut state = FormState::new();
        state.set("fullName", "Sita Devi");

        let first = session.save_draft(&state).await.unwrap();
        assert_eq!(first.status, SubmissionStatus::Draft);
        assert_eq!(first.language, Language::Hindi);

        state.set("pincode", "110001");
        let second = session.save_draft(&state).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.len(), 1);
        let stored = store.get(first.id).await.unwrap().unwrap();
        assert_eq!(stored.form_state().unwrap().get("pincode"), Some("110001"));
        assert!(stored.updated_at >= stored.created_at);
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_required() {
        let (mut session, store) = session();
        let mut state = FormState::new();
        state.set("fullName", "Sita Devi");
        state.set("state", "   ");

        match session.submit(&state).await {
            Err(FormError::MissingRequired(missing)) => {
                assert!(missing.contains(&"state".to_string()));
                assert!(missing.contains(&"mobileNumber".to_string()));
                assert!(!missing.contains(&"fullName".to_string()));
                assert!(!missing.contains(&"email".to_string()));
            }
            other => panic!("expected MissingRequired, got {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_submission() {
        let store = InMemoryFormStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.update(id, "{}".to_string(), SubmissionStatus::Draft).await,
            Err(FormError::SubmissionNotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_draft_then_submit_keeps_record() {
        let (mut session, store) = session();
        let mut state = FormState::new();
        state.set("fullName", "Sita Devi");
        let draft = session.save_draft(&state).await.unwrap();

        for name in ["fatherName", "mobileNumber", "dob", "annualIncome", "address", "state", "district", "pincode"] {
            state.set(name, "x");
        }
        let submitted = session.submit(&state).await.unwrap();

        assert_eq!(submitted.id, draft.id);
        assert!(submitted.is_submitted());
        assert_eq!(submitted.created_at, draft.created_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&SubmissionStatus::Submitted).unwrap(), "\"submitted\"");
    }
}
