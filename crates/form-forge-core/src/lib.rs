//! Form definitions, the schema compiler, and the submission validator.
//!
//! The pipeline is two-staged: [`compile`] turns a [`FormDefinition`] into a
//! [`CompiledContract`], and [`validate`] applies that contract to submitted
//! data. Both are pure functions over in-memory values.

pub mod compiler;
pub mod error;
pub mod reorder;
pub mod types;
pub mod validator;

pub use compiler::{compile, Activation, CompiledContract, CompiledField, PatternCheck, RangeCheck, TypeCheck};
pub use error::{CompileError, DependencyFault, OrderError, SchemaError};
pub use types::{FieldDefinition, FieldName, FieldType, FormDefinition, FormId};
pub use validator::{validate, FieldErrors, ValidatedRecord};
