//! Multi-step signup state machine. States are step indices; `advance` only
//! moves forward when every field owned by the current step validates, and
//! `retreat` moves back without validating. A pending submission freezes all
//! transitions until it resolves.

use crate::features::{
    auth::types::{Registration, VerificationPrompt},
    signup::validation::{
        Field, FieldErrors, check_confirm_password, check_email, check_first_name,
        check_last_name, check_password,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// First, last and optional display name.
    Identity,
    /// Email, password and confirmation.
    Credentials,
    /// Read-only summary before submitting.
    Review,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Identity, Step::Credentials, Step::Review];

    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::Identity => &[Field::FirstName, Field::LastName, Field::DisplayName],
            Step::Credentials => &[Field::Email, Field::Password, Field::ConfirmPassword],
            Step::Review => &[],
        }
    }
}

/// Presentational hint for the step transition animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupDraft {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::DisplayName => &self.display_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::DisplayName => &mut self.display_name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value;
    }

    /// Validation rule for one field; the display name has none.
    pub fn check(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::FirstName => check_first_name(&self.first_name),
            Field::LastName => check_last_name(&self.last_name),
            Field::DisplayName => None,
            Field::Email => check_email(&self.email),
            Field::Password => check_password(&self.password),
            Field::ConfirmPassword => check_confirm_password(&self.password, &self.confirm_password),
        }
    }

    pub fn validate(&self, fields: &[Field]) -> FieldErrors {
        fields
            .iter()
            .filter_map(|field| self.check(*field).map(|message| (*field, message)))
            .collect()
    }

    /// `first last`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// The provided display name, else the full name, else nothing.
    pub fn effective_display_name(&self) -> Option<String> {
        let provided = self.display_name.trim();
        if !provided.is_empty() {
            return Some(provided.to_string());
        }
        let full_name = self.full_name();
        (!full_name.is_empty()).then_some(full_name)
    }

    pub fn registration(&self) -> Registration {
        Registration {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            display_name: self.effective_display_name(),
        }
    }

    pub fn verification_prompt(&self) -> VerificationPrompt {
        VerificationPrompt {
            email: self.email.trim().to_string(),
            display_name: self
                .effective_display_name()
                .unwrap_or_else(|| self.first_name.trim().to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupWizard {
    step_index: usize,
    direction: Direction,
    draft: SignupDraft,
    field_errors: FieldErrors,
    form_error: Option<String>,
    pending: bool,
}

impl Default for SignupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupWizard {
    pub fn new() -> Self {
        Self {
            step_index: 0,
            direction: Direction::Forward,
            draft: SignupDraft::default(),
            field_errors: FieldErrors::new(),
            form_error: None,
            pending: false,
        }
    }

    pub const fn total_steps() -> usize {
        Step::ALL.len()
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn step(&self) -> Step {
        Step::ALL[self.step_index]
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index == Self::total_steps() - 1
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn draft(&self) -> &SignupDraft {
        &self.draft
    }

    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.get(&field).copied()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Updates one draft field and clears the stale error shown for it.
    pub fn set_field(&mut self, field: Field, value: String) {
        self.draft.set(field, value);
        self.field_errors.remove(&field);
    }

    /// Validates the current step and moves forward on success.
    /// Returns whether the step index changed.
    pub fn advance(&mut self) -> bool {
        if self.pending {
            return false;
        }
        let errors = self.draft.validate(self.step().fields());
        if !errors.is_empty() {
            self.field_errors = errors;
            return false;
        }
        self.field_errors.clear();
        let next = (self.step_index + 1).min(Self::total_steps() - 1);
        let moved = next != self.step_index;
        self.step_index = next;
        self.direction = Direction::Forward;
        moved
    }

    /// Moves back one step without validating. Returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        if self.pending {
            return false;
        }
        let previous = self.step_index.saturating_sub(1);
        let moved = previous != self.step_index;
        self.step_index = previous;
        self.direction = Direction::Backward;
        moved
    }

    /// Starts the final submission. Only possible on the last step with no
    /// other request in flight; marks the wizard pending.
    pub fn begin_submit(&mut self) -> Option<Registration> {
        if self.pending || !self.is_last_step() {
            return None;
        }
        self.pending = true;
        self.form_error = None;
        Some(self.draft.registration())
    }

    /// Starts a federated signup from any step.
    pub fn begin_federated(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.form_error = None;
        true
    }

    /// Resolves the in-flight request. Failures keep the step and the draft so
    /// the user can correct and resubmit.
    pub fn finish(&mut self, result: Result<(), String>) {
        self.pending = false;
        if let Err(message) = result {
            self.form_error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_identity(wizard: &mut SignupWizard) {
        wizard.set_field(Field::FirstName, "Ada".to_string());
        wizard.set_field(Field::LastName, "Lovelace".to_string());
    }

    fn fill_credentials(wizard: &mut SignupWizard) {
        wizard.set_field(Field::Email, "ada@example.com".to_string());
        wizard.set_field(Field::Password, "abcdef".to_string());
        wizard.set_field(Field::ConfirmPassword, "abcdef".to_string());
    }

    fn at_review() -> SignupWizard {
        let mut wizard = SignupWizard::new();
        fill_identity(&mut wizard);
        assert!(wizard.advance());
        fill_credentials(&mut wizard);
        assert!(wizard.advance());
        wizard
    }

    #[test]
    fn advance_from_identity_requires_both_names() {
        let mut wizard = SignupWizard::new();

        assert!(!wizard.advance());

        assert_eq!(wizard.step_index(), 0);
        assert_eq!(
            wizard.field_error(Field::FirstName),
            Some("First name is required")
        );
        assert_eq!(
            wizard.field_error(Field::LastName),
            Some("Last name is required")
        );
        assert_eq!(wizard.field_error(Field::DisplayName), None);
    }

    #[test]
    fn advance_only_validates_the_current_step() {
        let mut wizard = SignupWizard::new();
        fill_identity(&mut wizard);

        assert!(wizard.advance());

        assert_eq!(wizard.step(), Step::Credentials);
        assert_eq!(wizard.direction(), Direction::Forward);
        assert!(wizard.field_errors().is_empty());
    }

    #[test]
    fn every_failing_field_of_a_step_gets_a_message() {
        let mut wizard = SignupWizard::new();
        fill_identity(&mut wizard);
        wizard.advance();
        wizard.set_field(Field::Email, "not-an-email".to_string());
        wizard.set_field(Field::Password, "abc".to_string());
        wizard.set_field(Field::ConfirmPassword, "abd".to_string());

        assert!(!wizard.advance());

        assert_eq!(wizard.step(), Step::Credentials);
        for field in Step::Credentials.fields() {
            let message = wizard.field_error(*field).expect("field should fail");
            assert!(!message.is_empty());
        }
    }

    #[test]
    fn mismatched_confirmation_blocks_advance() {
        let mut wizard = SignupWizard::new();
        fill_identity(&mut wizard);
        wizard.advance();
        wizard.set_field(Field::Email, "ada@example.com".to_string());
        wizard.set_field(Field::Password, "abcdef".to_string());
        wizard.set_field(Field::ConfirmPassword, "abcxyz".to_string());

        assert!(!wizard.advance());

        assert_eq!(
            wizard.field_error(Field::ConfirmPassword),
            Some("Passwords must match")
        );
        assert_eq!(wizard.field_error(Field::Password), None);
    }

    #[test]
    fn advance_is_capped_at_the_last_step() {
        let mut wizard = at_review();
        assert!(wizard.is_last_step());

        assert!(!wizard.advance());

        assert_eq!(wizard.step_index(), SignupWizard::total_steps() - 1);
    }

    #[test]
    fn retreat_is_floored_at_zero_and_never_validates() {
        let mut wizard = SignupWizard::new();

        assert!(!wizard.retreat());
        assert_eq!(wizard.step_index(), 0);
        assert!(wizard.field_errors().is_empty());

        let mut wizard = at_review();
        wizard.set_field(Field::Email, String::new());
        assert!(wizard.retreat());
        assert_eq!(wizard.step(), Step::Credentials);
        assert_eq!(wizard.direction(), Direction::Backward);
        assert!(wizard.field_errors().is_empty());
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut wizard = SignupWizard::new();
        wizard.advance();
        assert!(wizard.field_error(Field::FirstName).is_some());

        wizard.set_field(Field::FirstName, "Ada".to_string());

        assert_eq!(wizard.field_error(Field::FirstName), None);
        assert!(wizard.field_error(Field::LastName).is_some());
    }

    #[test]
    fn submit_is_unavailable_before_the_last_step() {
        let mut wizard = SignupWizard::new();
        fill_identity(&mut wizard);
        assert_eq!(wizard.begin_submit(), None);

        wizard.advance();
        assert_eq!(wizard.begin_submit(), None);
        assert!(!wizard.is_pending());
    }

    #[test]
    fn submit_builds_registration_with_effective_display_name() {
        let mut wizard = at_review();

        let registration = wizard.begin_submit().expect("review step submits");

        assert_eq!(registration.email, "ada@example.com");
        assert_eq!(registration.password, "abcdef");
        assert_eq!(registration.display_name.as_deref(), Some("Ada Lovelace"));
        assert!(wizard.is_pending());
    }

    #[test]
    fn pending_submission_freezes_navigation_and_resubmission() {
        let mut wizard = at_review();
        wizard.begin_submit();

        assert!(!wizard.retreat());
        assert!(!wizard.advance());
        assert_eq!(wizard.begin_submit(), None);
        assert!(!wizard.begin_federated());
        assert!(wizard.is_last_step());
    }

    #[test]
    fn failed_submission_keeps_step_and_draft() {
        let mut wizard = at_review();
        wizard.begin_submit();

        wizard.finish(Err("An account already exists for that email.".to_string()));

        assert!(!wizard.is_pending());
        assert!(wizard.is_last_step());
        assert_eq!(
            wizard.form_error(),
            Some("An account already exists for that email.")
        );
        assert_eq!(wizard.draft().email, "ada@example.com");
        assert!(wizard.field_errors().is_empty());

        assert!(wizard.begin_submit().is_some());
        assert_eq!(wizard.form_error(), None);
    }

    #[test]
    fn federated_failure_leaves_step_untouched() {
        let mut wizard = SignupWizard::new();
        fill_identity(&mut wizard);
        wizard.advance();

        assert!(wizard.begin_federated());
        wizard.finish(Err("The sign-in popup was closed before completing.".to_string()));

        assert_eq!(wizard.step(), Step::Credentials);
        assert!(wizard.form_error().is_some());
    }

    #[test]
    fn effective_display_name_prefers_the_provided_one() {
        let mut draft = SignupDraft {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            ..SignupDraft::default()
        };
        assert_eq!(draft.effective_display_name().as_deref(), Some("Ada Lovelace"));

        draft.display_name = "Countess".to_string();
        assert_eq!(draft.effective_display_name().as_deref(), Some("Countess"));

        let empty = SignupDraft::default();
        assert_eq!(empty.effective_display_name(), None);
    }

    #[test]
    fn verification_prompt_falls_back_to_first_name() {
        let draft = SignupDraft {
            email: " a@b.com ".to_string(),
            ..SignupDraft::default()
        };
        let prompt = draft.verification_prompt();
        assert_eq!(prompt.email, "a@b.com");
        assert_eq!(prompt.display_name, "");

        let draft = SignupDraft {
            first_name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            ..SignupDraft::default()
        };
        assert_eq!(draft.verification_prompt().display_name, "Ada");
    }
}
