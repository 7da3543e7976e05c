use std::fmt::{self, Debug, Formatter};

/// An optional password that never shows up in logs, an empty one counts as none
#[derive(Default, Clone)]
pub struct Password(Option<String>);

impl Password {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_some() {
            write!(f, "Password(***)")
        } else {
            write!(f, "Password(None)")
        }
    }
}

impl From<Option<String>> for Password {
    fn from(password: Option<String>) -> Self {
        Self(password.filter(|p| !p.is_empty()))
    }
}

impl From<&str> for Password {
    fn from(password: &str) -> Self {
        Self::from(Some(password.to_string()))
    }
}

impl AsRef<Option<String>> for Password {
    fn as_ref(&self) -> &Option<String> {
        &self.0
    }
}
