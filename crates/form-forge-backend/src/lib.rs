//! Collaborators around the form engine: storage traits, an in-memory
//! store, the contract cache, and the authoring and intake services.

pub mod authoring;
pub mod cache;
pub mod caller;
pub mod error;
pub mod intake;
pub mod memory;
pub mod page;
pub mod traits;

pub use authoring::FormAuthoring;
pub use cache::ContractCache;
pub use caller::Caller;
pub use error::{BackendError, IntakeError};
pub use intake::SubmissionIntake;
pub use memory::InMemoryStore;
pub use page::{PageRequest, SubmissionPage};
pub use traits::{FormStore, SubmissionStore};
