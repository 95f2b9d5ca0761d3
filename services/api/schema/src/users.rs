use sea_orm::entity::prelude::*;

/// Identity user. Email doubles as the user name.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    /// Trimmed, lower-cased email; uniqueness is enforced here.
    #[sea_orm(unique)]
    pub normalized_email: String,
    /// argon2id PHC string.
    pub password_hash: String,
    pub email_confirmed: bool,
    pub lockout_enabled: bool,
    pub access_failed_count: i32,
    pub lockout_end: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_claims::Entity")]
    UserClaims,
}

impl Related<super::user_claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserClaims.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
