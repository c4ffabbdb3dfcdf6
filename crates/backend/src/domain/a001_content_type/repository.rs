use chrono::Utc;
use contracts::domain::a001_content_type::aggregate::{
    AttributeDescriptor, ContentTypeDescriptor, ContentTypeKind,
};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    pub kind: String,
    pub display_name: String,
    pub schema_json: String,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ContentTypeDescriptor {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let attributes: Vec<AttributeDescriptor> = serde_json::from_str(&m.schema_json)
            .map_err(|e| anyhow::anyhow!("Invalid schema of {}: {}", m.uid, e))?;
        Ok(ContentTypeDescriptor {
            kind: ContentTypeKind::from_code(&m.kind).unwrap_or_default(),
            uid: m.uid,
            display_name: m.display_name,
            attributes,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<ContentTypeDescriptor>> {
    Entity::find()
        .order_by_asc(Column::Uid)
        .all(conn())
        .await?
        .into_iter()
        .map(ContentTypeDescriptor::try_from)
        .collect()
}

pub async fn get_by_uid(uid: &str) -> anyhow::Result<Option<ContentTypeDescriptor>> {
    let result = Entity::find_by_id(uid.to_string()).one(conn()).await?;
    result.map(ContentTypeDescriptor::try_from).transpose()
}

pub async fn upsert(descriptor: &ContentTypeDescriptor) -> anyhow::Result<()> {
    let active = ActiveModel {
        uid: Set(descriptor.uid.clone()),
        kind: Set(descriptor.kind.code().to_string()),
        display_name: Set(descriptor.display_name.clone()),
        schema_json: Set(serde_json::to_string(&descriptor.attributes)?),
        updated_at: Set(Some(Utc::now().to_rfc3339())),
    };

    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Uid)
                .update_columns([
                    Column::Kind,
                    Column::DisplayName,
                    Column::SchemaJson,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(conn())
        .await?;
    Ok(())
}
