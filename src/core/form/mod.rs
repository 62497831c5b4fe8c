//! The filter-collection → validation → query → result-binding workflow.

pub mod bindings;
pub mod fields;
pub mod options;
pub mod orchestrator;
pub mod results;
pub mod session;
pub mod validator;

pub use bindings::{FieldBindingStore, FieldChange, FilterSnapshot};
pub use fields::FieldName;
pub use options::OptionProvider;
pub use orchestrator::{QueryOrchestrator, QueryState};
pub use results::ResultView;
pub use session::{FormSession, SubmitOutcome};
pub use validator::{FieldValidity, FormValidator, ValidationOutcome};
