use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recorded weather lookup. The autoincrement `id` doubles as the
/// recency order for history listings; no timestamp is stored.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CityQuery {
    pub id: i64,
    pub user_id: i64,
    pub city_name: String,
}
