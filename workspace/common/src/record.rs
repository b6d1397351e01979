use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::form::FormDraft;

/// Program prefix every persisted student code starts with.
pub const STUDENT_CODE_PREFIX: &str = "BWU/BCA/23/";

/// Builds the canonical student code from the raw 3-character code.
///
/// The prefix is applied unconditionally: passing an already canonical code
/// yields a doubled prefix.
pub fn canonical_student_code(raw_code: &str) -> String {
    format!("{STUDENT_CODE_PREFIX}{raw_code}")
}

/// Where the student lives; decides which address branch is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlaceOfLiving {
    Home,
    Pg,
}

impl PlaceOfLiving {
    pub const ALL: [PlaceOfLiving; 2] = [PlaceOfLiving::Home, PlaceOfLiving::Pg];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceOfLiving::Home => "home",
            PlaceOfLiving::Pg => "pg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaceOfLiving::Home => "Home",
            PlaceOfLiving::Pg => "PG",
        }
    }
}

impl fmt::Display for PlaceOfLiving {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceOfLiving {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(PlaceOfLiving::Home),
            "pg" => Ok(PlaceOfLiving::Pg),
            other => Err(format!("Unknown place of living: {}", other)),
        }
    }
}

/// The populated address branch of a record.
///
/// Serialized with `place_of_living` as the tag, so only the active branch's
/// keys ever appear in the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "place_of_living", rename_all = "lowercase")]
pub enum Residence {
    Home {
        /// Composed address, PS, PIN, state and district
        home_address: String,
    },
    Pg {
        pg_address: String,
        pg_name: String,
        pg_landmark: String,
        pg_owner_mobile: String,
        pg_owner_name: String,
    },
}

impl Residence {
    pub fn place_of_living(&self) -> PlaceOfLiving {
        match self {
            Residence::Home { .. } => PlaceOfLiving::Home,
            Residence::Pg { .. } => PlaceOfLiving::Pg,
        }
    }
}

/// Exact field set sent to the insert endpoint and persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecordPayload {
    /// Canonical student code, e.g. `BWU/BCA/23/406`
    pub student_code: String,
    pub name: String,
    pub mobile: String,
    #[serde(flatten)]
    pub residence: Residence,
}

impl RecordPayload {
    pub fn place_of_living(&self) -> PlaceOfLiving {
        self.residence.place_of_living()
    }

    /// Re-expresses the payload as a draft so the form rules can be reused
    /// on the server.
    fn as_draft(&self) -> FormDraft {
        let raw_code = self
            .student_code
            .strip_prefix(STUDENT_CODE_PREFIX)
            .unwrap_or(&self.student_code);

        let mut draft = FormDraft {
            student_code: raw_code.to_string(),
            name: self.name.clone(),
            mobile: self.mobile.clone(),
            place_of_living: Some(self.place_of_living()),
            ..Default::default()
        };

        match &self.residence {
            Residence::Home { home_address } => {
                draft.home_address = Some(home_address.clone());
            }
            Residence::Pg {
                pg_address,
                pg_name,
                pg_landmark,
                pg_owner_mobile,
                pg_owner_name,
            } => {
                draft.pg_address = Some(pg_address.clone());
                draft.pg_name = Some(pg_name.clone());
                draft.pg_landmark = Some(pg_landmark.clone());
                draft.pg_owner_mobile = Some(pg_owner_mobile.clone());
                draft.pg_owner_name = Some(pg_owner_name.clone());
            }
        }

        draft
    }
}

impl Validate for RecordPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.as_draft().validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if !self.student_code.starts_with(STUDENT_CODE_PREFIX) {
            let mut error = ValidationError::new("prefix");
            error.message = Some(Cow::Owned(format!(
                "Student code must start with {}",
                STUDENT_CODE_PREFIX
            )));
            errors.add("student_code", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
