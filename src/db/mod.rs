use crate::models::line::{Line, LineUpdate, NewLine};
use crate::models::sequence::{Sequence, SequenceItem, SequenceSummary};
use crate::models::List;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("memory") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn list_repo(&self) -> repositories::list::ListRepository {
        repositories::list::ListRepository::new(self.conn.clone())
    }

    fn line_repo(&self) -> repositories::line::LineRepository {
        repositories::line::LineRepository::new(self.conn.clone())
    }

    fn sequence_repo(&self) -> repositories::sequence::SequenceRepository {
        repositories::sequence::SequenceRepository::new(self.conn.clone())
    }

    // -- lists --

    pub async fn list_lists(&self) -> Result<Vec<List>> {
        self.list_repo().list_all().await
    }

    pub async fn get_list(&self, id: i32) -> Result<Option<List>> {
        self.list_repo().get(id).await
    }

    pub async fn add_list(&self, name: &str) -> Result<List> {
        self.list_repo().add(name).await
    }

    pub async fn count_lists(&self) -> Result<u64> {
        self.list_repo().count().await
    }

    pub async fn list_exists(&self, id: i32) -> Result<bool> {
        self.list_repo().exists(id).await
    }

    // -- lines --

    pub async fn lines_for_list(&self, list_id: i32) -> Result<Vec<Line>> {
        self.line_repo().list_for_list(list_id).await
    }

    pub async fn get_line(&self, id: i32) -> Result<Option<Line>> {
        self.line_repo().get(id).await
    }

    pub async fn add_line(&self, new: &NewLine) -> Result<Line> {
        self.line_repo().add(new).await
    }

    pub async fn update_line(&self, id: i32, update: &LineUpdate) -> Result<bool> {
        self.line_repo().update(id, update).await
    }

    pub async fn update_line_image(&self, id: i32, image_url: &str) -> Result<bool> {
        self.line_repo().update_image(id, image_url).await
    }

    pub async fn update_line_details(
        &self,
        id: i32,
        synonyms: &[String],
        synopsis: &str,
    ) -> Result<bool> {
        self.line_repo().update_details(id, synonyms, synopsis).await
    }

    pub async fn remove_line(&self, id: i32) -> Result<bool> {
        self.line_repo().remove(id).await
    }

    pub async fn pending_review(&self, list_id: i32, cutoff: &str) -> Result<Vec<Line>> {
        self.line_repo().pending_review(list_id, cutoff).await
    }

    pub async fn mark_highlighted(&self, id: i32, at: &str) -> Result<bool> {
        self.line_repo().mark_highlighted(id, at).await
    }

    pub async fn lines_missing_image(&self) -> Result<Vec<Line>> {
        self.line_repo().missing_image().await
    }

    pub async fn lines_missing_details(&self) -> Result<Vec<Line>> {
        self.line_repo().missing_details().await
    }

    pub async fn count_lines(&self) -> Result<u64> {
        self.line_repo().count().await
    }

    // -- sequences --

    pub async fn create_sequence(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Sequence> {
        self.sequence_repo().create(name, description).await
    }

    pub async fn get_sequence(&self, id: i32) -> Result<Option<Sequence>> {
        self.sequence_repo().get(id).await
    }

    pub async fn sequence_summaries(&self) -> Result<Vec<SequenceSummary>> {
        self.sequence_repo().summaries().await
    }

    pub async fn sequence_items(&self, id: i32) -> Result<Vec<SequenceItem>> {
        self.sequence_repo().items(id).await
    }

    pub async fn sequence_contains(&self, sequence_id: i32, line_id: i32) -> Result<bool> {
        self.sequence_repo().contains(sequence_id, line_id).await
    }

    pub async fn append_sequence_item(&self, sequence_id: i32, line_id: i32) -> Result<i32> {
        self.sequence_repo().append_item(sequence_id, line_id).await
    }

    pub async fn remove_sequence_item(&self, sequence_id: i32, line_id: i32) -> Result<bool> {
        self.sequence_repo().remove_item(sequence_id, line_id).await
    }

    pub async fn reorder_sequence(
        &self,
        sequence_id: i32,
        positions: &[(i32, i32)],
    ) -> Result<Result<(), i32>> {
        self.sequence_repo().reorder(sequence_id, positions).await
    }

    pub async fn delete_sequence(&self, id: i32) -> Result<bool> {
        self.sequence_repo().delete(id).await
    }

    pub async fn sequences_for_line(&self, line_id: i32) -> Result<Vec<(Sequence, i32)>> {
        self.sequence_repo().for_line(line_id).await
    }
}
