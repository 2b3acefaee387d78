//! Application state and core logic

use crate::api::{ApiError, LoanApiClient, LoanApiTrait};
use crate::config::WizardConfig;
use crate::platform;
use crate::state::{
    guard, normalize, normalize_field, validate, validate_all, Approval, ApplicationRecord, CategoryOption,
    Form, FormAction, FormField, GuardOutcome, NavMode, RemoteState, Step, StepForm, WizardState,
    ROOT_PATH,
};
use crate::storage::DraftStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Message shown when a background task dies without a usable error
pub const GENERIC_ERROR: &str = "Произошла ошибка! Попробуйте позже.";

/// Result of a background request, delivered to the UI loop
#[derive(Debug)]
pub enum BackgroundEvent {
    Categories(Result<Vec<CategoryOption>, String>),
    Submission {
        applicant: String,
        amount: i64,
        term_days: i64,
        result: Result<ApplicationRecord, String>,
    },
    /// A task panicked or was cancelled
    Crashed,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: WizardState,
    api: Arc<dyn LoanApiTrait>,
    store: DraftStore,
    events_tx: mpsc::UnboundedSender<BackgroundEvent>,
    events_rx: mpsc::UnboundedReceiver<BackgroundEvent>,
    /// Whether the app should quit
    quit: bool,
    /// Transient hint shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create the app from configuration and start loading categories
    pub fn new(config: &WizardConfig) -> Result<Self> {
        let client = LoanApiClient::new(config.api_base_url(), config.retry_policy())?;
        if !client.is_configured() {
            tracing::warn!("API base URL is not configured; remote calls will fail");
        }

        let store = match config.data_dir() {
            Some(dir) => DraftStore::in_dir(dir),
            None => {
                tracing::warn!("No data directory available, draft will not survive a restart");
                DraftStore::in_memory()
            }
        };

        let mut app = Self::with_parts(Arc::new(client), store);
        app.open_path(ROOT_PATH);
        app.ensure_categories();
        Ok(app)
    }

    /// Assemble an app from its collaborators, restoring any saved draft
    pub fn with_parts(api: Arc<dyn LoanApiTrait>, store: DraftStore) -> Self {
        let draft = store.load().unwrap_or_default();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: WizardState::new(draft),
            api,
            store,
            events_tx,
            events_rx,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Open a location such as `/step/loan`; unknown paths land on the first step
    pub fn open_path(&mut self, path: &str) {
        self.navigate(Step::from_path(path), NavMode::Replace);
    }

    /// Show `target`, or the earliest step whose data is still invalid
    pub fn navigate(&mut self, target: Step, mode: NavMode) {
        self.state.history.apply(target, mode);

        let redirect = match guard(target, &self.state.draft) {
            GuardOutcome::Allowed => None,
            GuardOutcome::Redirect { to, report } => {
                tracing::info!(
                    "Redirecting from {} to {}: previous step incomplete",
                    target.path(),
                    to.path()
                );
                self.state.history.replace(to);
                self.state.apply_report(&report);
                report.invalid_fields().next()
            }
        };

        let step = self.state.current_step();
        self.state.form = StepForm::new(step);
        if let Some(field) = redirect {
            self.state.form.focus_field(field);
            self.status_message = Some("Заполните обязательные поля".to_string());
        }
        tracing::info!("Showing {}", step.path());

        if step == Step::Address {
            self.ensure_categories();
        }
    }

    /// Validate the current group and move forward when it passes
    pub fn go_next(&mut self) {
        let step = self.state.current_step();
        if !self.check_group(step) {
            return;
        }
        if let Some(next) = step.next() {
            self.navigate(next, NavMode::Push);
        }
    }

    /// Return to the preceding step without validating
    pub fn go_back(&mut self) {
        let Some(prev) = self.state.current_step().prev() else {
            return;
        };
        // Unwind when we came from that step instead of stacking another entry
        let entries = self.state.history.entries();
        if entries.len() > 1 && entries[entries.len() - 2] == prev {
            self.state.history.back();
            self.navigate(prev, NavMode::Replace);
        } else {
            self.navigate(prev, NavMode::Push);
        }
    }

    /// Validate the loan group and send the application in the background
    pub fn submit(&mut self) {
        if self.state.is_submitting() {
            return;
        }
        if !self.check_group(Step::Loan) {
            return;
        }

        // Earlier groups may have changed since their step was left
        let full = validate_all(&self.state.draft);
        if let Some(field) = full.invalid_fields().next() {
            tracing::warn!(
                "Not submitting, {} is invalid: {}",
                field.name(),
                full.message(field).unwrap_or_default()
            );
            self.navigate(field.step(), NavMode::Push);
            self.state.apply_report(&full);
            self.state.form.focus_field(field);
            self.status_message = Some("Исправьте ошибки в форме".to_string());
            return;
        }

        let draft = &self.state.draft;
        let title = draft.display_name();
        let (amount, term_days) = (draft.amount, draft.term_days);
        tracing::info!("Submitting application: {amount} for {term_days} days");

        self.state.submission = RemoteState::Loading;
        let api = Arc::clone(&self.api);
        let applicant = title.clone();
        self.spawn_request(
            async move { api.submit_application(&title).await },
            move |result| BackgroundEvent::Submission {
                applicant,
                amount,
                term_days,
                result,
            },
        );
    }

    /// Start the category fetch unless it is running or already succeeded
    pub fn ensure_categories(&mut self) {
        if self.state.categories.is_loading() || self.state.categories.is_loaded() {
            return;
        }
        self.state.categories = RemoteState::Loading;
        let api = Arc::clone(&self.api);
        self.spawn_request(
            async move { api.fetch_categories().await },
            BackgroundEvent::Categories,
        );
    }

    /// Normalize and validate one group, showing its inline errors
    fn check_group(&mut self, step: Step) -> bool {
        let fields = step.fields();
        normalize(&mut self.state.draft, fields);
        self.persist_draft();

        let report = validate(&self.state.draft, fields);
        self.state.apply_report(&report);
        if let Some(field) = report.invalid_fields().next() {
            self.state.form.focus_field(field);
            self.status_message = Some("Исправьте ошибки в форме".to_string());
            return false;
        }
        true
    }

    fn spawn_request<T, Fut, W>(&self, request: Fut, wrap: W)
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
        W: FnOnce(Result<T, String>) -> BackgroundEvent + Send + 'static,
    {
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let (result, crashed) = match tokio::spawn(request).await {
                Ok(Ok(value)) => (Ok(value), false),
                Ok(Err(err)) => {
                    if let Some(attempts) = err.attempts() {
                        tracing::debug!("Request gave up after {attempts} attempt(s)");
                    }
                    (Err(err.user_message()), false)
                }
                Err(err) => {
                    tracing::error!("Background request failed: {err}");
                    (Err(GENERIC_ERROR.to_string()), true)
                }
            };
            if tx.send(wrap(result)).is_err() {
                tracing::debug!("UI loop gone, dropping background result");
            }
            if crashed {
                let _ = tx.send(BackgroundEvent::Crashed);
            }
        });
    }

    /// Apply finished background work; call once per UI tick
    pub fn poll_background(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_background(event);
        }
    }

    fn apply_background(&mut self, event: BackgroundEvent) {
        match event {
            BackgroundEvent::Categories(Ok(categories)) => {
                tracing::info!("Loaded {} categories", categories.len());
                self.state.categories = RemoteState::Loaded(categories);
            }
            BackgroundEvent::Categories(Err(message)) => {
                tracing::warn!("Categories unavailable: {message}");
                self.state.categories = RemoteState::Failed(message);
            }
            BackgroundEvent::Submission {
                applicant,
                amount,
                term_days,
                result: Ok(record),
            } => {
                tracing::info!("Application approved as record {}", record.id);
                self.state.submission = RemoteState::Loaded(record.clone());
                self.state.approval = Some(Approval {
                    applicant,
                    amount,
                    term_days,
                    record,
                });
            }
            BackgroundEvent::Submission {
                result: Err(message),
                ..
            } => {
                tracing::warn!("Submission failed: {message}");
                self.state.submission = RemoteState::Failed(message);
            }
            BackgroundEvent::Crashed => self.state.push_error(GENERIC_ERROR.to_string()),
        }
    }

    fn persist_draft(&self) {
        if let Err(err) = self.store.save(&self.state.draft) {
            tracing::warn!("Failed to save draft: {err:#}");
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if platform::is_quit_shortcut(&key) {
            self.quit = true;
            return;
        }

        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        if self.state.approval.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.approval = None;
            }
            return;
        }

        self.status_message = None;

        if platform::is_continue_shortcut(&key) {
            self.trigger(self.state.form.primary_action());
            return;
        }

        let on_buttons = self.state.form.is_buttons_row_active();
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Left if on_buttons => self.state.form.prev_button(),
            KeyCode::Right if on_buttons => self.state.form.next_button(),
            KeyCode::Left => self.step_active(false),
            KeyCode::Right => self.step_active(true),
            KeyCode::Enter => {
                let action = self
                    .state
                    .form
                    .selected_action()
                    .unwrap_or_else(|| self.state.form.primary_action());
                self.trigger(action);
            }
            KeyCode::Esc => self.go_back(),
            KeyCode::Backspace if !on_buttons => {
                self.edit_active(|field, draft| field.pop_char(draft))
            }
            KeyCode::Char(c)
                if !on_buttons
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit_active(|field, draft| field.push_char(draft, c))
            }
            _ => {}
        }
    }

    fn trigger(&mut self, action: FormAction) {
        match action {
            FormAction::Back => self.go_back(),
            FormAction::Next => self.go_next(),
            FormAction::Submit => self.submit(),
        }
    }

    /// Move focus, normalizing and validating the field being left
    fn move_focus(&mut self, forward: bool) {
        if let Some(form_field) = self.state.form.active_form_field() {
            let field = form_field.field;
            let before = self.state.draft.clone();
            normalize_field(&mut self.state.draft, field);
            if self.state.draft != before {
                self.persist_draft();
            }
            let report = validate(&self.state.draft, &[field]);
            self.state.apply_report(&report);
        }

        if forward {
            self.state.form.next_field();
        } else {
            self.state.form.prev_field();
        }
    }

    fn edit_active<F>(&mut self, edit: F)
    where
        F: FnOnce(FormField, &mut crate::state::ApplicationDraft) -> bool,
    {
        let Some(form_field) = self.state.form.active_form_field() else {
            return;
        };
        if !edit(form_field, &mut self.state.draft) {
            return;
        }
        let field = form_field.field;
        tracing::debug!("Edited {}", field.name());
        if self.state.field_error(field).is_some() {
            let report = validate(&self.state.draft, &[field]);
            self.state.apply_report(&report);
        }
        self.persist_draft();
    }

    /// Adjust the active choice or slider
    fn step_active(&mut self, forward: bool) {
        let Some(form_field) = self.state.form.active_form_field() else {
            return;
        };
        let categories = self
            .state
            .categories
            .data()
            .map_or(&[][..], Vec::as_slice);
        if !form_field.step_value(&mut self.state.draft, forward, categories) {
            return;
        }
        let field = form_field.field;
        tracing::debug!("Changed {}", field.name());
        let report = validate(&self.state.draft, &[field]);
        self.state.apply_report(&report);
        self.persist_draft();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLoanApiTrait;
    use crate::state::{ApplicationDraft, Field, Gender};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn canonical_draft() -> ApplicationDraft {
        ApplicationDraft {
            phone: "0123 456 789".to_string(),
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            gender: Gender::Male,
            work_place: "IT".to_string(),
            address: "Москва, ул. Тестовая, д. 1".to_string(),
            amount: 500,
            term_days: 15,
        }
    }

    fn mock_api() -> MockLoanApiTrait {
        let mut api = MockLoanApiTrait::new();
        api.expect_fetch_categories()
            .returning(|| Ok(vec![CategoryOption::new("IT", "IT")]));
        api
    }

    fn record(title: &str) -> ApplicationRecord {
        serde_json::from_value(json!({ "id": 101, "title": title })).unwrap()
    }

    fn app_with(api: MockLoanApiTrait, draft: ApplicationDraft) -> App {
        let store = DraftStore::in_memory();
        store.save(&draft).unwrap();
        App::with_parts(Arc::new(api), store)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    async fn drain_one(app: &mut App) {
        let event = app.events_rx.recv().await.unwrap();
        app.apply_background(event);
    }

    #[tokio::test]
    async fn test_restores_saved_draft() {
        let app = app_with(mock_api(), canonical_draft());
        assert_eq!(app.state.draft, canonical_draft());
        assert_eq!(app.state.current_step(), Step::Personal);
    }

    #[tokio::test]
    async fn test_direct_loan_path_with_empty_draft_redirects_to_personal() {
        let mut app = App::with_parts(Arc::new(mock_api()), DraftStore::in_memory());
        app.open_path("/step/loan");

        assert_eq!(app.state.current_step(), Step::Personal);
        assert_eq!(app.state.history.entries(), &[Step::Personal]);
        assert_eq!(app.state.field_error(Field::Phone), Some("Телефон обязателен"));
        assert_eq!(
            app.state.form.active_form_field().map(|f| f.field),
            Some(Field::Phone)
        );
    }

    #[tokio::test]
    async fn test_direct_loan_path_with_valid_draft_is_allowed() {
        let mut app = app_with(mock_api(), canonical_draft());
        app.open_path("/step/loan");
        assert_eq!(app.state.current_step(), Step::Loan);
    }

    #[tokio::test]
    async fn test_unknown_path_lands_on_personal() {
        let mut app = app_with(mock_api(), canonical_draft());
        app.open_path("/nowhere");
        assert_eq!(app.state.current_step(), Step::Personal);
    }

    #[tokio::test]
    async fn test_next_with_blank_fields_stays_and_shows_errors() {
        let mut app = App::with_parts(Arc::new(mock_api()), DraftStore::in_memory());
        app.go_next();

        assert_eq!(app.state.current_step(), Step::Personal);
        assert!(app.state.field_error(Field::Phone).is_some());
        assert!(app.state.field_error(Field::FirstName).is_some());
        assert!(app.state.field_error(Field::LastName).is_some());
        assert!(app.state.field_error(Field::Gender).is_none());
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_back_preserves_values() {
        let mut app = app_with(mock_api(), canonical_draft());
        app.go_next();
        assert_eq!(app.state.current_step(), Step::Address);

        app.state.draft.address = "Казань".to_string();
        app.go_back();
        assert_eq!(app.state.current_step(), Step::Personal);
        assert_eq!(app.state.draft.address, "Казань");
        assert_eq!(app.state.draft.first_name, "Иван");

        app.go_next();
        assert_eq!(app.state.current_step(), Step::Address);
        assert_eq!(app.state.draft.address, "Казань");
        assert_eq!(app.state.history.entries(), &[Step::Personal, Step::Address]);
    }

    #[tokio::test]
    async fn test_back_after_deep_link_pushes_previous_step() {
        let mut app = app_with(mock_api(), canonical_draft());
        app.open_path("/step/loan");
        app.go_back();
        assert_eq!(app.state.current_step(), Step::Address);
        assert_eq!(app.state.history.entries(), &[Step::Loan, Step::Address]);
    }

    #[tokio::test]
    async fn test_categories_load_on_address_entry() {
        let mut app = app_with(mock_api(), canonical_draft());
        app.go_next();
        assert!(app.state.categories.is_loading());

        drain_one(&mut app).await;
        assert_eq!(
            app.state.category_options(),
            &[CategoryOption::new("IT", "IT")]
        );

        // Cached for the rest of the session
        app.go_back();
        app.go_next();
        assert!(app.state.categories.is_loaded());
    }

    #[tokio::test]
    async fn test_failed_categories_are_retried_on_next_entry() {
        let mut api = MockLoanApiTrait::new();
        let mut seq = mockall::Sequence::new();
        api.expect_fetch_categories()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Err(ApiError::CategoriesUnavailable {
                    attempts: 3,
                    last: Box::new(ApiError::Http { status: 503 }),
                })
            });
        api.expect_fetch_categories()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![CategoryOption::new("IT", "IT")]));

        let mut app = app_with(api, canonical_draft());
        app.go_next();
        drain_one(&mut app).await;
        assert!(app
            .state
            .categories
            .error()
            .is_some_and(|e| e.contains("после 3 попыток")));

        app.go_back();
        app.go_next();
        drain_one(&mut app).await;
        assert!(app.state.categories.is_loaded());
    }

    #[tokio::test]
    async fn test_crashed_request_shows_generic_error() {
        let mut api = MockLoanApiTrait::new();
        api.expect_fetch_categories()
            .returning(|| panic!("category handler crashed"));

        let mut app = app_with(api, canonical_draft());
        app.ensure_categories();
        drain_one(&mut app).await;
        drain_one(&mut app).await;

        assert_eq!(app.state.categories.error(), Some(GENERIC_ERROR));
        assert_eq!(app.state.current_error(), Some(GENERIC_ERROR));

        // Error dialog swallows keys until dismissed
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.state.draft, canonical_draft());
        press(&mut app, KeyCode::Enter);
        assert!(!app.state.has_errors());
    }

    #[tokio::test]
    async fn test_end_to_end_submission_by_keyboard() {
        let mut api = mock_api();
        api.expect_submit_application()
            .withf(|title| title == "Иванов Иван")
            .times(1)
            .returning(|title| Ok(record(title)));
        let mut app = App::with_parts(Arc::new(api), DraftStore::in_memory());

        // Personal
        type_text(&mut app, "0123456789");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Иван");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, " Иванов ");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.draft.phone, "0123 456 789");
        assert_eq!(app.state.draft.last_name, "Иванов");
        assert_eq!(app.state.current_step(), Step::Address);

        // Address
        drain_one(&mut app).await;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.draft.work_place, "IT");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Москва, ул. Тестовая, д. 1");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_step(), Step::Loan);

        // Loan
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(app.state.is_submitting());

        drain_one(&mut app).await;
        let approval = app.state.approval.clone().unwrap();
        assert_eq!(approval.record.title, "Иванов Иван");
        assert_eq!(approval.applicant, "Иванов Иван");
        assert_eq!(approval.amount, 400);
        assert_eq!(approval.term_days, 10);

        press(&mut app, KeyCode::Enter);
        assert!(app.state.approval.is_none());
        // Draft is kept after a successful submission
        assert_eq!(app.store.load().map(|d| d.amount), Some(400));
    }

    #[tokio::test]
    async fn test_submit_is_ignored_while_pending() {
        let mut api = mock_api();
        api.expect_submit_application()
            .times(1)
            .returning(|title| Ok(record(title)));
        let mut app = app_with(api, canonical_draft());
        app.open_path("/step/loan");

        app.submit();
        app.submit();
        assert!(app.state.is_submitting());

        drain_one(&mut app).await;
        assert!(app.state.submission.is_loaded());
        assert!(app.events_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_invalid_loan_values_block_submission() {
        let mut api = mock_api();
        api.expect_submit_application().never();
        let mut app = app_with(api, canonical_draft());
        app.open_path("/step/loan");
        app.state.draft.amount = 1500;

        app.submit();
        assert!(!app.state.is_submitting());
        assert_eq!(
            app.state.field_error(Field::Amount),
            Some("Максимальная сумма: $1000")
        );
    }

    #[tokio::test]
    async fn test_submit_returns_to_earlier_step_with_invalid_field() {
        let mut api = mock_api();
        api.expect_submit_application().never();
        let mut app = app_with(api, canonical_draft());
        app.open_path("/step/loan");
        app.state.draft.address = "Мск".to_string();

        app.submit();
        assert!(!app.state.is_submitting());
        assert_eq!(app.state.current_step(), Step::Address);
        assert_eq!(
            app.state.field_error(Field::Address),
            Some("Адрес должен содержать минимум 5 символов")
        );
        assert_eq!(
            app.state.form.active_form_field().map(|f| f.field),
            Some(Field::Address)
        );
    }

    #[tokio::test]
    async fn test_failed_submission_is_reported_inline() {
        let mut api = mock_api();
        api.expect_submit_application().returning(|_| {
            Err(ApiError::SubmissionFailed {
                attempts: 3,
                last: Box::new(ApiError::Http { status: 500 }),
            })
        });
        let mut app = app_with(api, canonical_draft());
        app.open_path("/step/loan");
        app.submit();
        drain_one(&mut app).await;

        assert!(app.state.approval.is_none());
        let message = app.state.submission.error().unwrap();
        assert!(message.starts_with("Ошибка при отправке заявки после 3 попыток"));
    }

    #[tokio::test]
    async fn test_edits_are_saved_immediately() {
        let mut app = App::with_parts(Arc::new(mock_api()), DraftStore::in_memory());
        type_text(&mut app, "8912");
        assert_eq!(app.store.load().map(|d| d.phone), Some("8912".to_string()));
    }

    #[tokio::test]
    async fn test_blur_trims_and_validates_left_field() {
        let mut app = App::with_parts(Arc::new(mock_api()), DraftStore::in_memory());
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "  Анна ");
        press(&mut app, KeyCode::Tab);

        assert_eq!(app.state.draft.first_name, "Анна");
        assert!(app.state.field_error(Field::FirstName).is_none());

        // Leaving an empty field flags it
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.field_error(Field::LastName), Some("Фамилия обязательна"));
    }

    #[tokio::test]
    async fn test_existing_error_clears_while_typing() {
        let mut app = App::with_parts(Arc::new(mock_api()), DraftStore::in_memory());
        app.go_next();
        assert!(app.state.field_error(Field::Phone).is_some());

        type_text(&mut app, "0123456789");
        assert!(app.state.field_error(Field::Phone).is_none());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_even_with_dialog_open() {
        let mut app = app_with(mock_api(), canonical_draft());
        app.state.push_error("boom".to_string());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_esc_on_first_step_does_nothing() {
        let mut app = app_with(mock_api(), canonical_draft());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.current_step(), Step::Personal);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn test_buttons_row_back_action() {
        let mut app = app_with(mock_api(), canonical_draft());
        app.go_next();
        // Address: work place, address, buttons
        press(&mut app, KeyCode::BackTab);
        assert!(app.state.form.is_buttons_row_active());
        press(&mut app, KeyCode::Left);
        assert_eq!(app.state.form.selected_action(), Some(FormAction::Back));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_step(), Step::Personal);
    }
}
