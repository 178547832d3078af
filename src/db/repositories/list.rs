use crate::entities::{lists, prelude::*};
use crate::models::List;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

pub struct ListRepository {
    conn: DatabaseConnection,
}

impl ListRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map(model: lists::Model) -> List {
        List {
            id: model.id,
            name: model.name,
        }
    }

    pub async fn list_all(&self) -> anyhow::Result<Vec<List>> {
        let rows = Lists::find()
            .order_by_asc(lists::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Self::map).collect())
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<List>> {
        Ok(Lists::find_by_id(id).one(&self.conn).await?.map(Self::map))
    }

    pub async fn add(&self, name: &str) -> anyhow::Result<List> {
        let model = lists::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!("Created list: {} (ID: {})", model.name, model.id);
        Ok(Self::map(model))
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        Ok(Lists::find().count(&self.conn).await?)
    }

    pub async fn exists(&self, id: i32) -> anyhow::Result<bool> {
        Ok(Lists::find()
            .filter(lists::Column::Id.eq(id))
            .count(&self.conn)
            .await?
            > 0)
    }
}
