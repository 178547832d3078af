use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sequences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sequence_items::Entity")]
    SequenceItems,
}

impl Related<super::sequence_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SequenceItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
