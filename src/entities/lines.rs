use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub list_id: i32,
    pub name: String,
    pub content: String,
    pub status: String,
    pub opinion: String,
    pub episode: String,
    pub tags: String,
    pub image_url: Option<String>,
    pub synopsis: Option<String>,
    /// JSON array of alternative titles, denormalized.
    pub synonyms: Option<String>,
    /// RFC 3339 timestamp of the last "verified" acknowledgement.
    pub last_highlight: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lists::Entity",
        from = "Column::ListId",
        to = "super::lists::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Lists,
    #[sea_orm(has_many = "super::sequence_items::Entity")]
    SequenceItems,
}

impl Related<super::lists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lists.def()
    }
}

impl Related<super::sequence_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SequenceItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
