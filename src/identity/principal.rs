use serde::{Deserialize, Serialize};

// Resolved fresh on every guard invocation; never cached by this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}
