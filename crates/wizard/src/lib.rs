//! Three-step SEM planning wizard: setup form, keyword research and
//! campaign structure.
//!
//! The wizard owns no globals: the plan source and the notifier are
//! constructed by the caller and handed in.

pub mod form;
pub mod notify;
pub mod source;
pub mod state;

pub use form::SetupForm;
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use source::{MockPlanSource, PlanBackend, PlanSource, RemotePlanSource};
pub use state::{Wizard, WizardAction, WizardStep};
