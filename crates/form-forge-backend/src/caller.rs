use std::fmt;

use crate::error::BackendError;

/// Who is making a call, passed explicitly into every service operation.
///
/// How an admin proved their identity is the transport layer's business;
/// services only need to know whether the caller is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// An authenticated administrator.
    Admin { admin_id: String },
    /// Anyone else. May read forms and submit data.
    Anonymous,
}

impl Caller {
    pub fn admin(admin_id: impl Into<String>) -> Self {
        Self::Admin {
            admin_id: admin_id.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    /// Fails with `Unauthorized` unless the caller is an admin.
    pub fn require_admin(&self, action: &'static str) -> Result<(), BackendError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!(action, "refused anonymous caller");
            Err(BackendError::Unauthorized { action })
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin { admin_id } => write!(f, "admin:{admin_id}"),
            Self::Anonymous => write!(f, "anonymous"),
        }
    }
}
