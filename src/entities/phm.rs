//! PHM mapping - arrangement to shell size and protective hardware dash number

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhmMapping {
    pub arrangement: String,
    pub shell_size: i64,
    pub dash_number: String,
}
