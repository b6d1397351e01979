use crate::record::{RecordPayload, Residence, canonical_student_code};
use crate::validation::{ValidatedForm, ValidatedResidence};

/// Turns a validated form into the exact field set to persist.
///
/// The student code gets its program prefix here, and only here. A home
/// residence is collapsed into the composed `home_address`; a PG residence
/// keeps its five fields.
pub fn normalize(form: ValidatedForm) -> RecordPayload {
    let residence = match form.residence {
        ValidatedResidence::Home(address) => Residence::Home {
            home_address: address.compose(),
        },
        ValidatedResidence::Pg(pg) => Residence::Pg {
            pg_address: pg.address,
            pg_name: pg.name,
            pg_landmark: pg.landmark,
            pg_owner_mobile: pg.owner_mobile,
            pg_owner_name: pg.owner_name,
        },
    };

    RecordPayload {
        student_code: canonical_student_code(&form.student_code),
        name: form.name,
        mobile: form.mobile,
        residence,
    }
}
