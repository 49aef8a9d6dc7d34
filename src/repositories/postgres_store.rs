//! Store persistente sobre PostgreSQL
//!
//! Las restricciones (teléfono único, claves foráneas) las aplica la base de
//! datos; aquí solo se traducen sus violaciones a `StoreError`.

use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgExecutor, PgPool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{seed, EntityStore, StoreError, StoreResult};
use crate::database::schema::{ROUTES, USERS, USER_FAVORITES};
use crate::models::{InsertRoute, InsertUser, InsertUserFavorite, Route, User, UserFavorite};

/// Fila de routes tal como sale de PostgreSQL (category en JSONB)
#[derive(Debug, FromRow)]
struct RouteRow {
    id: Uuid,
    number: String,
    from_location: String,
    to_location: String,
    duration: String,
    distance: String,
    seats: String,
    status: String,
    category: Json<Vec<String>>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        Self {
            id: row.id,
            number: row.number,
            from_location: row.from_location,
            to_location: row.to_location,
            duration: row.duration,
            distance: row.distance,
            seats: row.seats,
            status: row.status,
            category: row.category.0,
            created_at: row.created_at,
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Nombre de la entidad referenciada si el error es de clave foránea
fn foreign_key_target(e: &sqlx::Error) -> Option<&'static str> {
    match e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            let constraint = db.constraint().unwrap_or_default();
            Some(if constraint.contains("user_id") { "user" } else { "route" })
        }
        _ => None,
    }
}

async fn insert_route<'e, E>(executor: E, payload: InsertRoute) -> Result<RouteRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let route = Route::from_insert(payload);

    sqlx::query_as::<_, RouteRow>(&ROUTES.insert_statement())
        .bind(route.id)
        .bind(&route.number)
        .bind(&route.from_location)
        .bind(&route.to_location)
        .bind(&route.duration)
        .bind(&route.distance)
        .bind(&route.seats)
        .bind(&route.status)
        .bind(Json(&route.category))
        .bind(route.created_at)
        .fetch_one(executor)
        .await
}

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Siembra las rutas de demo dentro de una transacción con la tabla
    /// bloqueada: varias instancias arrancando a la vez siembran una sola vez.
    pub async fn seed_routes_locked(&self) -> StoreResult<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE routes IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let (has_routes,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM routes)")
            .fetch_one(&mut *tx)
            .await?;
        if has_routes {
            tx.commit().await?;
            debug!("Rutas existentes, se omite la siembra");
            return Ok(0);
        }

        let routes = seed::demo_routes();
        let count = routes.len();
        for route in routes {
            insert_route(&mut *tx, route).await?;
        }
        tx.commit().await?;

        info!("🌱 {} rutas de demo sembradas en PostgreSQL", count);
        Ok(count)
    }
}

#[async_trait]
impl EntityStore for PostgresStore {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_user_by_phone(&self, phone: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, payload: InsertUser) -> StoreResult<User> {
        let user = User::from_insert(payload);

        let created = sqlx::query_as::<_, User>(&USERS.insert_statement())
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.phone)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Conflict {
                        entity: "User",
                        field: "phone",
                        value: user.phone.clone(),
                    }
                } else {
                    StoreError::Database(e)
                }
            })?;

        debug!("👤 Usuario creado en PostgreSQL: {}", created.id);
        Ok(created)
    }

    async fn get_routes(&self) -> StoreResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn get_route(&self, id: Uuid) -> StoreResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Route::from))
    }

    async fn create_route(&self, payload: InsertRoute) -> StoreResult<Route> {
        let row = insert_route(&self.pool, payload).await?;
        Ok(row.into())
    }

    async fn get_user_favorites(&self, user_id: Uuid) -> StoreResult<Vec<UserFavorite>> {
        let favorites = sqlx::query_as::<_, UserFavorite>(
            "SELECT * FROM user_favorites WHERE user_id = $1 ORDER BY seq",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }

    async fn add_user_favorite(&self, payload: InsertUserFavorite) -> StoreResult<UserFavorite> {
        let (already_saved,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM user_favorites WHERE user_id = $1 AND route_id = $2)",
        )
        .bind(payload.user_id)
        .bind(payload.route_id)
        .fetch_one(&self.pool)
        .await?;
        if already_saved {
            warn!(
                "⚠️ Favorito duplicado: usuario {} ya guardó la ruta {}",
                payload.user_id, payload.route_id
            );
        }

        let favorite = UserFavorite::from_insert(payload);

        let created = sqlx::query_as::<_, UserFavorite>(&USER_FAVORITES.insert_statement())
            .bind(favorite.id)
            .bind(favorite.user_id)
            .bind(favorite.route_id)
            .bind(favorite.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match foreign_key_target(&e) {
                Some(target) => StoreError::MissingReference(target),
                None => StoreError::Database(e),
            })?;

        Ok(created)
    }

    async fn remove_user_favorite(&self, user_id: Uuid, route_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_favorites
            WHERE id = (
                SELECT id FROM user_favorites
                WHERE user_id = $1 AND route_id = $2
                ORDER BY seq
                LIMIT 1
            )
            "#,
        )
        .bind(user_id)
        .bind(route_id)
        .execute(&self.pool)
        .await?;

        debug!("🗑️ Favoritos eliminados: {}", result.rows_affected());
        Ok(())
    }
}
