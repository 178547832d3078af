use crate::db::repositories::line::map_model;
use crate::entities::{prelude::*, sequence_items, sequences};
use crate::models::sequence::{Sequence, SequenceItem, SequenceSummary};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

pub struct SequenceRepository {
    conn: DatabaseConnection,
}

impl SequenceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map(model: sequences::Model) -> Sequence {
        Sequence {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> anyhow::Result<Sequence> {
        let model = sequences::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.map(String::from)),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!("Created sequence: {} (ID: {})", model.name, model.id);
        Ok(Self::map(model))
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<Sequence>> {
        Ok(Sequences::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map))
    }

    /// All sequences with their member counts, ordered by name.
    pub async fn summaries(&self) -> anyhow::Result<Vec<SequenceSummary>> {
        let rows = Sequences::find()
            .order_by_asc(sequences::Column::Name)
            .find_with_related(SequenceItems)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(sequence, items)| SequenceSummary {
                id: sequence.id,
                name: sequence.name,
                description: sequence.description,
                item_count: items.len() as i64,
            })
            .collect())
    }

    /// Member lines in position order.
    pub async fn items(&self, sequence_id: i32) -> anyhow::Result<Vec<SequenceItem>> {
        let rows = SequenceItems::find()
            .filter(sequence_items::Column::SequenceId.eq(sequence_id))
            .order_by_asc(sequence_items::Column::Position)
            .find_also_related(Lines)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(item, line)| {
                line.map(|line| SequenceItem {
                    position: item.position,
                    line: map_model(line),
                })
            })
            .collect())
    }

    pub async fn contains(&self, sequence_id: i32, line_id: i32) -> anyhow::Result<bool> {
        Ok(SequenceItems::find()
            .filter(sequence_items::Column::SequenceId.eq(sequence_id))
            .filter(sequence_items::Column::LineId.eq(line_id))
            .count(&self.conn)
            .await?
            > 0)
    }

    /// Appends a line at `MAX(position) + 1` and returns the new position.
    pub async fn append_item(&self, sequence_id: i32, line_id: i32) -> anyhow::Result<i32> {
        let max_position = SequenceItems::find()
            .filter(sequence_items::Column::SequenceId.eq(sequence_id))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|item| item.position)
            .max()
            .unwrap_or(0);

        let position = max_position + 1;

        sequence_items::ActiveModel {
            sequence_id: Set(sequence_id),
            line_id: Set(line_id),
            position: Set(position),
        }
        .insert(&self.conn)
        .await?;

        info!(
            "Added line {} to sequence {} at position {}",
            line_id, sequence_id, position
        );
        Ok(position)
    }

    /// Removing a member keeps the surviving positions as they are.
    pub async fn remove_item(&self, sequence_id: i32, line_id: i32) -> anyhow::Result<bool> {
        let result = SequenceItems::delete_many()
            .filter(sequence_items::Column::SequenceId.eq(sequence_id))
            .filter(sequence_items::Column::LineId.eq(line_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Bulk position update. Rolls back and reports the offending line when
    /// any entry does not belong to the sequence.
    pub async fn reorder(
        &self,
        sequence_id: i32,
        positions: &[(i32, i32)],
    ) -> anyhow::Result<Result<(), i32>> {
        let txn = self.conn.begin().await?;

        for &(line_id, position) in positions {
            let result = SequenceItems::update_many()
                .col_expr(sequence_items::Column::Position, Expr::value(position))
                .filter(sequence_items::Column::SequenceId.eq(sequence_id))
                .filter(sequence_items::Column::LineId.eq(line_id))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Ok(Err(line_id));
            }
        }

        txn.commit().await?;
        Ok(Ok(()))
    }

    /// Deletes the sequence and its item associations; member lines stay.
    pub async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await?;

        SequenceItems::delete_many()
            .filter(sequence_items::Column::SequenceId.eq(id))
            .exec(&txn)
            .await?;

        let result = Sequences::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed sequence with ID: {}", id);
        }
        Ok(removed)
    }

    /// Sequences a line belongs to, ordered by name, with its position in
    /// each. Detail flows only consult the first entry.
    pub async fn for_line(&self, line_id: i32) -> anyhow::Result<Vec<(Sequence, i32)>> {
        let rows = SequenceItems::find()
            .filter(sequence_items::Column::LineId.eq(line_id))
            .find_also_related(Sequences)
            .all(&self.conn)
            .await?;

        let mut memberships: Vec<(Sequence, i32)> = rows
            .into_iter()
            .filter_map(|(item, sequence)| sequence.map(|s| (Self::map(s), item.position)))
            .collect();
        memberships.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        Ok(memberships)
    }
}
