use sea_orm::entity::prelude::*;

/// Client record managed through the `/cliente` endpoints.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Clientes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub name: String,
    /// Tax/ID document number.
    #[sea_orm(column_type = "String(StringLen::N(14))")]
    pub document: String,
    #[sea_orm(column_type = "String(StringLen::N(11))")]
    pub phone: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
