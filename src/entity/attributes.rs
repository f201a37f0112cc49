use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attributes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_attributes::Entity")]
    ProductAttributes,
}

impl Related<super::product_attributes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductAttributes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
