use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use validator::{Validate, ValidationErrors};

use crate::form::{Field, FormDraft};
use crate::record::PlaceOfLiving;

const MISSING_BRANCH_FIELD: &str = "All relevant fields must be filled";

/// Field-level validation failures, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut field_errors = FieldErrors::new();
        for (name, errors) in errors.field_errors() {
            let Some(field) = Field::from_name(&*name) else {
                continue;
            };
            let message = errors
                .first()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({})", error.code),
                })
                .unwrap_or_else(|| "Invalid value".to_string());
            field_errors.add(field, message);
        }
        field_errors
    }
}

/// The five parts of a home address, kept separate until persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeAddress {
    pub address: String,
    pub police_station: String,
    pub pin: String,
    pub state: String,
    pub district: String,
}

impl HomeAddress {
    /// Single string stored as `home_address`.
    pub fn compose(&self) -> String {
        format!(
            "Address: {}, PS: {}, PIN: {}, State: {}, District: {}",
            self.address, self.police_station, self.pin, self.state, self.district
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgDetails {
    pub address: String,
    pub name: String,
    pub landmark: String,
    pub owner_mobile: String,
    pub owner_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedResidence {
    Home(HomeAddress),
    Pg(PgDetails),
}

/// A draft that passed every rule; `student_code` is still the raw code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub student_code: String,
    pub name: String,
    pub mobile: String,
    pub residence: ValidatedResidence,
}

impl ValidatedForm {
    pub fn place_of_living(&self) -> PlaceOfLiving {
        match self.residence {
            ValidatedResidence::Home(_) => PlaceOfLiving::Home,
            ValidatedResidence::Pg(_) => PlaceOfLiving::Pg,
        }
    }
}

/// Runs the per-field rules, then requires every field of the selected branch.
///
/// Fields of the branch that is not selected are ignored entirely. A missing
/// branch field is reported on that field.
pub fn validate(draft: &FormDraft) -> Result<ValidatedForm, FieldErrors> {
    let scoped = draft.scoped_to_branch();

    if let Err(errors) = scoped.validate() {
        let field_errors = FieldErrors::from(&errors);
        debug!("Draft failed field rules on {} field(s)", field_errors.len());
        return Err(field_errors);
    }

    let place_of_living = match scoped.place_of_living {
        Some(place_of_living) => place_of_living,
        None => {
            let mut errors = FieldErrors::new();
            errors.add(Field::PlaceOfLiving, "You need to select your residential details.");
            return Err(errors);
        }
    };
    trace!("Draft passed field rules for branch {}", place_of_living);

    let branch_fields = match place_of_living {
        PlaceOfLiving::Home => Field::HOME,
        PlaceOfLiving::Pg => Field::PG,
    };

    let mut errors = FieldErrors::new();
    for field in branch_fields {
        if scoped.optional_slot(field).map_or(true, Option::is_none) {
            errors.add(field, MISSING_BRANCH_FIELD);
        }
    }
    if !errors.is_empty() {
        debug!("Draft is missing {} {} field(s)", errors.len(), place_of_living);
        return Err(errors);
    }

    let take = |field: Field| scoped.value(field).to_string();
    let residence = match place_of_living {
        PlaceOfLiving::Home => ValidatedResidence::Home(HomeAddress {
            address: take(Field::HomeAddress),
            police_station: take(Field::HomePs),
            pin: take(Field::HomePin),
            state: take(Field::HomeState),
            district: take(Field::HomeDistrict),
        }),
        PlaceOfLiving::Pg => ValidatedResidence::Pg(PgDetails {
            address: take(Field::PgAddress),
            name: take(Field::PgName),
            landmark: take(Field::PgLandmark),
            owner_mobile: take(Field::PgOwnerMobile),
            owner_name: take(Field::PgOwnerName),
        }),
    };

    Ok(ValidatedForm {
        student_code: scoped.student_code.clone(),
        name: scoped.name.clone(),
        mobile: scoped.mobile.clone(),
        residence,
    })
}
