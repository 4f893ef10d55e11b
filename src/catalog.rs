use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Set, Statement, sea_query::Expr,
};
use serde_json::Value as JsonValue;

use crate::{entities::movie, models::MovieFields};

/// Storage for the `movies` table. Every operation is a single statement
/// (plus a read-back for writes); nothing spans a transaction.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Runs `SELECT 1 AS test` and returns the rows as JSON objects.
    pub async fn ping(&self) -> Result<Vec<JsonValue>, DbErr> {
        let stmt =
            Statement::from_string(self.db.get_database_backend(), "SELECT 1 AS test".to_string());
        JsonValue::find_by_statement(stmt).all(&self.db).await
    }

    pub async fn list(&self) -> Result<Vec<movie::Model>, DbErr> {
        movie::Entity::find().order_by_desc(movie::Column::Id).all(&self.db).await
    }

    pub async fn find(&self, id: i32) -> Result<Option<movie::Model>, DbErr> {
        movie::Entity::find_by_id(id).one(&self.db).await
    }

    pub async fn insert(&self, fields: MovieFields) -> Result<movie::Model, DbErr> {
        let model = movie::ActiveModel {
            id: Default::default(),
            name: Set(fields.name),
            kind: Set(fields.kind),
            rating: Set(fields.rating),
            image_url: Set(fields.image_url),
        };

        let id = movie::Entity::insert(model).exec(&self.db).await?.last_insert_id;
        self.find(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("movie {id} missing after insert")))
    }

    /// Replaces all mutable columns of row `id`. A missing id is not an error:
    /// zero rows change and `None` comes back.
    pub async fn update(&self, id: i32, fields: MovieFields) -> Result<Option<movie::Model>, DbErr> {
        let result = movie::Entity::update_many()
            .col_expr(movie::Column::Name, Expr::value(fields.name))
            .col_expr(movie::Column::Kind, Expr::value(fields.kind))
            .col_expr(movie::Column::Rating, Expr::value(fields.rating))
            .col_expr(movie::Column::ImageUrl, Expr::value(fields.image_url))
            .filter(movie::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        tracing::debug!(id, rows = result.rows_affected, "movie updated");

        self.find(id).await
    }

    /// Deletes row `id` and reports how many rows went away (0 or 1).
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
