use serde::{Deserialize, Serialize};

/// Parameters of a queued email. `content` is already rendered plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailParams {
    pub email: String,
    pub subject: String,
    pub content: String,
}
