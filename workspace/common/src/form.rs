use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::record::{PlaceOfLiving, STUDENT_CODE_PREFIX};

/// Every input of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    StudentCode,
    Name,
    Mobile,
    PlaceOfLiving,
    HomeAddress,
    HomePs,
    HomePin,
    HomeState,
    HomeDistrict,
    PgAddress,
    PgName,
    PgLandmark,
    PgOwnerMobile,
    PgOwnerName,
}

impl Field {
    pub const HOME: [Field; 5] = [
        Field::HomeAddress,
        Field::HomePs,
        Field::HomePin,
        Field::HomeState,
        Field::HomeDistrict,
    ];

    pub const PG: [Field; 5] = [
        Field::PgAddress,
        Field::PgName,
        Field::PgLandmark,
        Field::PgOwnerMobile,
        Field::PgOwnerName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::StudentCode => "student_code",
            Field::Name => "name",
            Field::Mobile => "mobile",
            Field::PlaceOfLiving => "place_of_living",
            Field::HomeAddress => "home_address",
            Field::HomePs => "home_ps",
            Field::HomePin => "home_pin",
            Field::HomeState => "home_state",
            Field::HomeDistrict => "home_district",
            Field::PgAddress => "pg_address",
            Field::PgName => "pg_name",
            Field::PgLandmark => "pg_landmark",
            Field::PgOwnerMobile => "pg_owner_mobile",
            Field::PgOwnerName => "pg_owner_name",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        FIELDS
            .iter()
            .map(|spec| spec.field)
            .find(|field| field.as_str() == name)
    }

    /// The residence branch this field belongs to, if any.
    pub fn branch(&self) -> Option<PlaceOfLiving> {
        if Field::HOME.contains(self) {
            Some(PlaceOfLiving::Home)
        } else if Field::PG.contains(self) {
            Some(PlaceOfLiving::Pg)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Radio,
    Textarea,
}

impl FieldKind {
    /// HTML input type attribute.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Textarea => "text",
            FieldKind::Number => "number",
            FieldKind::Radio => "radio",
        }
    }
}

/// How a field is presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    /// Fixed text rendered in front of the input
    pub prefix: Option<&'static str>,
    /// Visible width of the input in characters
    pub size: Option<u32>,
}

const fn spec(
    field: Field,
    label: &'static str,
    kind: FieldKind,
    placeholder: &'static str,
) -> FieldSpec {
    FieldSpec {
        field,
        label,
        kind,
        placeholder,
        prefix: None,
        size: None,
    }
}

pub const FIELDS: [FieldSpec; 14] = [
    FieldSpec {
        prefix: Some(STUDENT_CODE_PREFIX),
        size: Some(3),
        ..spec(Field::StudentCode, "Student Code", FieldKind::Number, "406")
    },
    spec(Field::Name, "Name", FieldKind::Text, "Enter your name"),
    FieldSpec {
        prefix: Some("+91 "),
        size: Some(10),
        ..spec(Field::Mobile, "Mobile Number", FieldKind::Number, "Enter your mobile number")
    },
    spec(Field::PlaceOfLiving, "Place of Living", FieldKind::Radio, ""),
    spec(Field::HomeAddress, "Home Address", FieldKind::Textarea, "Enter your home address"),
    spec(Field::HomePs, "Home Police Station", FieldKind::Text, "Enter your home police station"),
    FieldSpec {
        size: Some(6),
        ..spec(Field::HomePin, "Home Pin", FieldKind::Number, "Enter your home pin")
    },
    spec(Field::HomeState, "Home State", FieldKind::Text, "Enter your home state"),
    spec(Field::HomeDistrict, "Home District", FieldKind::Text, "Enter your home district"),
    spec(Field::PgAddress, "PG Address", FieldKind::Text, "Enter your pg address"),
    spec(Field::PgName, "PG Name", FieldKind::Text, "Enter your pg name"),
    spec(Field::PgLandmark, "Nearest Landmark", FieldKind::Text, "Enter your nearest landmark"),
    FieldSpec {
        size: Some(10),
        ..spec(Field::PgOwnerMobile, "Owner Mobile", FieldKind::Number, "Enter your owner mobile number")
    },
    spec(Field::PgOwnerName, "Owner Name", FieldKind::Text, "Enter your owner name"),
];

/// Whether `field` is rendered for the selected residence branch.
///
/// Branch fields stay hidden until a branch is chosen, and the other
/// branch's fields are hidden once it is.
pub fn is_visible(place_of_living: Option<PlaceOfLiving>, field: Field) -> bool {
    match (field.branch(), place_of_living) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(branch), Some(selected)) => branch == selected,
    }
}

/// Raw form input before validation.
///
/// Branch fields are `None` until the user types into them; an input that was
/// typed into and cleared holds an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FormDraft {
    #[validate(length(equal = 3, message = "Must be exactly 3 characters long."))]
    pub student_code: String,
    #[validate(length(min = 2, message = "Name must be at least 2 characters long."))]
    pub name: String,
    #[validate(length(equal = 10, message = "Mobile number must be exactly 10 characters long."))]
    pub mobile: String,
    #[validate(required(message = "You need to select your residential details."))]
    pub place_of_living: Option<PlaceOfLiving>,
    #[validate(length(min = 2, message = "Address must be at least 2 characters long."))]
    pub home_address: Option<String>,
    #[validate(length(min = 2, message = "Police station must be at least 2 characters long."))]
    pub home_ps: Option<String>,
    #[validate(length(equal = 6, message = "PIN must be exactly 6 characters long."))]
    pub home_pin: Option<String>,
    #[validate(length(min = 2, message = "State must be at least 2 characters long."))]
    pub home_state: Option<String>,
    #[validate(length(min = 2, message = "District must be at least 2 characters long."))]
    pub home_district: Option<String>,
    #[validate(length(min = 2, message = "Address must be at least 2 characters long."))]
    pub pg_address: Option<String>,
    #[validate(length(min = 2, message = "Name must be at least 2 characters long."))]
    pub pg_name: Option<String>,
    #[validate(length(min = 2, message = "Landmark must be at least 2 characters long."))]
    pub pg_landmark: Option<String>,
    #[validate(length(equal = 10, message = "Mobile number must be exactly 10 characters long."))]
    pub pg_owner_mobile: Option<String>,
    #[validate(length(min = 2, message = "Name must be at least 2 characters long."))]
    pub pg_owner_name: Option<String>,
}

impl FormDraft {
    /// Current text of a field; unset fields read as empty.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::StudentCode => &self.student_code,
            Field::Name => &self.name,
            Field::Mobile => &self.mobile,
            Field::PlaceOfLiving => self.place_of_living.map_or("", |p| p.as_str()),
            _ => self.optional_slot(field).and_then(|slot| slot.as_deref()).unwrap_or(""),
        }
    }

    /// Stores the text typed into `field`.
    ///
    /// For `place_of_living` an unknown value clears the selection.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::StudentCode => self.student_code = value,
            Field::Name => self.name = value,
            Field::Mobile => self.mobile = value,
            Field::PlaceOfLiving => self.place_of_living = value.parse().ok(),
            _ => {
                if let Some(slot) = self.optional_slot_mut(field) {
                    *slot = Some(value);
                }
            }
        }
    }

    /// Copy with the fields of every hidden branch cleared.
    pub fn scoped_to_branch(&self) -> FormDraft {
        let mut scoped = self.clone();
        for field in Field::HOME.iter().chain(Field::PG.iter()) {
            if !is_visible(self.place_of_living, *field) {
                if let Some(slot) = scoped.optional_slot_mut(*field) {
                    *slot = None;
                }
            }
        }
        scoped
    }

    pub(crate) fn optional_slot(&self, field: Field) -> Option<&Option<String>> {
        match field {
            Field::HomeAddress => Some(&self.home_address),
            Field::HomePs => Some(&self.home_ps),
            Field::HomePin => Some(&self.home_pin),
            Field::HomeState => Some(&self.home_state),
            Field::HomeDistrict => Some(&self.home_district),
            Field::PgAddress => Some(&self.pg_address),
            Field::PgName => Some(&self.pg_name),
            Field::PgLandmark => Some(&self.pg_landmark),
            Field::PgOwnerMobile => Some(&self.pg_owner_mobile),
            Field::PgOwnerName => Some(&self.pg_owner_name),
            Field::StudentCode | Field::Name | Field::Mobile | Field::PlaceOfLiving => None,
        }
    }

    fn optional_slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::HomeAddress => Some(&mut self.home_address),
            Field::HomePs => Some(&mut self.home_ps),
            Field::HomePin => Some(&mut self.home_pin),
            Field::HomeState => Some(&mut self.home_state),
            Field::HomeDistrict => Some(&mut self.home_district),
            Field::PgAddress => Some(&mut self.pg_address),
            Field::PgName => Some(&mut self.pg_name),
            Field::PgLandmark => Some(&mut self.pg_landmark),
            Field::PgOwnerMobile => Some(&mut self.pg_owner_mobile),
            Field::PgOwnerName => Some(&mut self.pg_owner_name),
            Field::StudentCode | Field::Name | Field::Mobile | Field::PlaceOfLiving => None,
        }
    }
}
