use sea_orm::entity::prelude::*;

/// Join table carrying the 1-based position of a line inside a sequence.
/// Positions are assigned server-side and keep their gaps after removals.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sequence_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sequence_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub line_id: i32,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sequences::Entity",
        from = "Column::SequenceId",
        to = "super::sequences::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Sequences,
    #[sea_orm(
        belongs_to = "super::lines::Entity",
        from = "Column::LineId",
        to = "super::lines::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Lines,
}

impl Related<super::sequences::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sequences.def()
    }
}

impl Related<super::lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
