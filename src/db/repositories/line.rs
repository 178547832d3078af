use crate::constants::images::PLACEHOLDER_COVER;
use crate::entities::{lines, prelude::*, sequence_items};
use crate::models::line::{Line, LineUpdate, NewLine};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

/// Maps a row to the domain model, decoding the synonyms column.
pub(crate) fn map_model(model: lines::Model) -> Line {
    Line {
        id: model.id,
        list_id: model.list_id,
        name: model.name,
        content: model.content,
        status: model.status,
        opinion: model.opinion,
        episode: model.episode,
        tags: model.tags,
        image_url: model.image_url,
        synopsis: model.synopsis,
        synonyms: Line::parse_synonyms(model.synonyms.as_deref()),
        last_highlight: model.last_highlight,
    }
}

pub struct LineRepository {
    conn: DatabaseConnection,
}

impl LineRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_list(&self, list_id: i32) -> anyhow::Result<Vec<Line>> {
        let rows = Lines::find()
            .filter(lines::Column::ListId.eq(list_id))
            .order_by_asc(lines::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(map_model).collect())
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<Line>> {
        Ok(Lines::find_by_id(id).one(&self.conn).await?.map(map_model))
    }

    pub async fn add(&self, new: &NewLine) -> anyhow::Result<Line> {
        let model = lines::ActiveModel {
            list_id: Set(new.list_id),
            name: Set(new.name.clone()),
            content: Set(new.content.clone()),
            status: Set(new.status.clone()),
            opinion: Set(new.opinion.clone()),
            episode: Set(new.episode.clone()),
            tags: Set(new.tags.clone()),
            created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!("Added line: {} (ID: {})", model.name, model.id);
        Ok(map_model(model))
    }

    pub async fn update(&self, id: i32, update: &LineUpdate) -> anyhow::Result<bool> {
        let result = Lines::update_many()
            .col_expr(lines::Column::Name, Expr::value(update.name.clone()))
            .col_expr(lines::Column::Content, Expr::value(update.content.clone()))
            .col_expr(lines::Column::Status, Expr::value(update.status.clone()))
            .col_expr(lines::Column::Opinion, Expr::value(update.opinion.clone()))
            .col_expr(lines::Column::Episode, Expr::value(update.episode.clone()))
            .col_expr(lines::Column::Tags, Expr::value(update.tags.clone()))
            .filter(lines::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_image(&self, id: i32, image_url: &str) -> anyhow::Result<bool> {
        let result = Lines::update_many()
            .col_expr(lines::Column::ImageUrl, Expr::value(image_url))
            .filter(lines::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_details(
        &self,
        id: i32,
        synonyms: &[String],
        synopsis: &str,
    ) -> anyhow::Result<bool> {
        let encoded = serde_json::to_string(synonyms)?;
        let result = Lines::update_many()
            .col_expr(lines::Column::Synonyms, Expr::value(encoded))
            .col_expr(lines::Column::Synopsis, Expr::value(synopsis))
            .filter(lines::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes the line and its sequence memberships in one transaction.
    pub async fn remove(&self, id: i32) -> anyhow::Result<bool> {
        let txn = self.conn.begin().await?;

        sequence_items::Entity::delete_many()
            .filter(sequence_items::Column::LineId.eq(id))
            .exec(&txn)
            .await?;

        let result = Lines::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed line with ID: {}", id);
        }
        Ok(removed)
    }

    /// Lines the user is actively following whose last verification is
    /// absent or older than `cutoff` (RFC 3339). Watching applies to anime,
    /// reading to the printed formats.
    pub async fn pending_review(&self, list_id: i32, cutoff: &str) -> anyhow::Result<Vec<Line>> {
        let active = Condition::any()
            .add(
                Condition::all()
                    .add(lines::Column::Content.eq("Anime"))
                    .add(lines::Column::Status.contains("vendo")),
            )
            .add(
                Condition::all()
                    .add(lines::Column::Content.is_in(["Manga", "Webtoon", "Manhwa"]))
                    .add(lines::Column::Status.contains("lendo")),
            );

        let stale = Condition::any()
            .add(lines::Column::LastHighlight.is_null())
            .add(lines::Column::LastHighlight.lte(cutoff));

        let rows = Lines::find()
            .filter(lines::Column::ListId.eq(list_id))
            .filter(active)
            .filter(stale)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(map_model).collect())
    }

    pub async fn mark_highlighted(&self, id: i32, at: &str) -> anyhow::Result<bool> {
        let result = Lines::update_many()
            .col_expr(lines::Column::LastHighlight, Expr::value(at))
            .filter(lines::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lines with no cover or still carrying the unresolved sentinel.
    pub async fn missing_image(&self) -> anyhow::Result<Vec<Line>> {
        let rows = Lines::find()
            .filter(
                Condition::any()
                    .add(lines::Column::ImageUrl.is_null())
                    .add(lines::Column::ImageUrl.eq(PLACEHOLDER_COVER)),
            )
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(map_model).collect())
    }

    /// Lines still waiting for synonyms or a synopsis.
    pub async fn missing_details(&self) -> anyhow::Result<Vec<Line>> {
        let rows = Lines::find()
            .filter(
                Condition::any()
                    .add(lines::Column::Synonyms.is_null())
                    .add(lines::Column::Synonyms.eq("[]"))
                    .add(lines::Column::Synopsis.is_null())
                    .add(lines::Column::Synopsis.eq("")),
            )
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(map_model).collect())
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        Ok(Lines::find().count(&self.conn).await?)
    }
}
