use serde::{Deserialize, Serialize};
use std::fmt;

/// What a single receipt amount pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sale,
    Tip,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Sale => write!(f, "Sale"),
            Category::Tip => write!(f, "Tip"),
        }
    }
}
