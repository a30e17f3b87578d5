//! Registration endpoint DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{Registration, SubmitOutcome};

/// Form-encoded body of `POST /submit`
#[derive(Debug, Clone, Serialize)]
pub struct SubmitFormDto<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a Registration> for SubmitFormDto<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            name: registration.name.as_str(),
            email: registration.email.as_str(),
        }
    }
}

/// JSON answer of `POST /submit`, whatever the HTTP status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseDto {
    /// Absent means failure
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl From<SubmitResponseDto> for SubmitOutcome {
    fn from(dto: SubmitResponseDto) -> Self {
        SubmitOutcome {
            success: dto.success,
            message: dto.message,
        }
    }
}
