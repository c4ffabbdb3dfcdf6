use chrono::Utc;
use contracts::domain::a002_document::aggregate::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub document_id: String,
    pub content_type_uid: String,
    pub data_json: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Record {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let fields: Map<String, Value> = serde_json::from_str(&m.data_json)
            .map_err(|e| anyhow::anyhow!("Invalid data of document {}: {}", m.document_id, e))?;
        Ok(Record {
            document_id: m.document_id,
            fields,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Записи типа контента в порядке создания
pub async fn list_by_content_type(uid: &str) -> anyhow::Result<Vec<Record>> {
    Entity::find()
        .filter(Column::ContentTypeUid.eq(uid))
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Record::try_from)
        .collect()
}

pub async fn get_by_document_id(uid: &str, document_id: &str) -> anyhow::Result<Option<Record>> {
    let result = Entity::find()
        .filter(Column::ContentTypeUid.eq(uid))
        .filter(Column::DocumentId.eq(document_id))
        .one(conn())
        .await?;
    result.map(Record::try_from).transpose()
}

pub async fn insert(uid: &str, record: &Record) -> anyhow::Result<()> {
    let now = Utc::now().to_rfc3339();
    let active = ActiveModel {
        id: NotSet,
        document_id: Set(record.document_id.clone()),
        content_type_uid: Set(uid.to_string()),
        data_json: Set(serde_json::to_string(&record.fields)?),
        created_at: Set(Some(now.clone())),
        updated_at: Set(Some(now)),
    };
    active.insert(conn()).await?;
    Ok(())
}

/// Перезапись полей документа; `false`, если документ не найден
pub async fn update_fields(uid: &str, record: &Record) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(
            Column::DataJson,
            Expr::value(serde_json::to_string(&record.fields)?),
        )
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now().to_rfc3339()))
        .filter(Column::ContentTypeUid.eq(uid))
        .filter(Column::DocumentId.eq(record.document_id.as_str()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
