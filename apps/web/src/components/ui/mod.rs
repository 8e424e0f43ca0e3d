mod alert;
mod button;
mod federated_button;
mod spinner;
mod step_indicator;
mod text_field;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonVariant};
pub(crate) use federated_button::FederatedButton;
pub(crate) use spinner::Spinner;
pub(crate) use step_indicator::StepIndicator;
pub(crate) use text_field::TextField;
