use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use tracing::trace;

/// Which address branch a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum PlaceOfLiving {
    #[sea_orm(string_value = "home")]
    Home,
    #[sea_orm(string_value = "pg")]
    Pg,
}

/// A submitted student record.
///
/// Exactly one address branch is populated: `home_address` for
/// [`PlaceOfLiving::Home`], the five `pg_*` columns for [`PlaceOfLiving::Pg`].
/// The other branch's columns stay NULL.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Canonical code, e.g. `BWU/BCA/23/406`.
    #[sea_orm(unique)]
    pub student_code: String,
    pub name: String,
    pub mobile: String,
    pub place_of_living: PlaceOfLiving,
    /// Composed home address (address, PS, PIN, state, district).
    pub home_address: Option<String>,
    pub pg_address: Option<String>,
    pub pg_name: Option<String>,
    pub pg_landmark: Option<String>,
    pub pg_owner_mobile: Option<String>,
    pub pg_owner_name: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Stamps `created_at` on insert and `updated_at` on every save.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            trace!("Stamping created_at for new record");
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

impl Entity {
    /// Selects the record with exactly this canonical student code.
    pub fn find_by_student_code(student_code: &str) -> Select<Entity> {
        Self::find().filter(Column::StudentCode.eq(student_code))
    }
}
