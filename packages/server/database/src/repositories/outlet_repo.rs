use domain::entities::geo::GeoPoint;
use domain::ports::OutletStore;
use domain::{Distance, LocatorError, Outlet, OutletSite, OverlapFlags, Result};
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use std::future::Future;
use std::time::Duration;

/// Raw row as stored. Coordinates and categories come back as text so the
/// repository accepts numeric or text columns alike and validates here.
#[derive(Debug, sqlx::FromRow)]
struct OutletRow {
    id: i64,
    name: Option<String>,
    address: Option<String>,
    telephone: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    categories: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct SiteRow {
    id: i64,
    name: Option<String>,
    address: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

/// PostgreSQL/PostGIS outlet repository.
///
/// Every call checks out its own connection, which goes back to the pool
/// when the call returns, whichever way it returns.
pub struct OutletRepository {
    pool: PgPool,
    table: String,
    query_timeout: Duration,
}

impl OutletRepository {
    /// `table` must be a plain identifier; it is spliced into the SQL.
    pub fn new(pool: PgPool, table: impl Into<String>, query_timeout: Duration) -> Self {
        Self {
            pool,
            table: table.into(),
            query_timeout,
        }
    }

    async fn acquire(&self) -> Result<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(|e| {
            tracing::error!("Database connection error: {}", e);
            LocatorError::RepositoryUnavailable(format!("Database connection failed: {}", e))
        })
    }

    async fn timed<T, F>(&self, what: &str, query: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(Ok(rows)) => Ok(rows),
            Ok(Err(e)) => Err(LocatorError::RepositoryQueryFailed(format!("{}: {}", what, e))),
            Err(_) => Err(LocatorError::RepositoryQueryFailed(format!(
                "{}: timed out after {:?}",
                what, self.query_timeout
            ))),
        }
    }
}

#[async_trait::async_trait]
impl OutletStore for OutletRepository {
    async fn fetch_all_outlets(&self) -> Result<Vec<Outlet>> {
        let sql = format!(
            r#"
            SELECT
                id::bigint AS id,
                name::text AS name,
                address::text AS address,
                telephone::text AS telephone,
                latitude::text AS latitude,
                longitude::text AS longitude,
                categories::text AS categories
            FROM {}
            ORDER BY id
            "#,
            self.table
        );

        let mut conn = self.acquire().await?;
        let rows = self
            .timed(
                "Fetching outlets",
                sqlx::query_as::<_, OutletRow>(&sql).fetch_all(&mut *conn),
            )
            .await?;

        rows.into_iter().map(outlet_from_row).collect()
    }

    async fn fetch_outlet_sites(&self) -> Result<Vec<OutletSite>> {
        let sql = format!(
            r#"
            SELECT
                id::bigint AS id,
                name::text AS name,
                address::text AS address,
                latitude::text AS latitude,
                longitude::text AS longitude
            FROM {}
            ORDER BY id
            "#,
            self.table
        );

        let mut conn = self.acquire().await?;
        let rows = self
            .timed(
                "Fetching outlet locations",
                sqlx::query_as::<_, SiteRow>(&sql).fetch_all(&mut *conn),
            )
            .await?;

        rows.into_iter().map(site_from_row).collect()
    }

    async fn fetch_overlap_flags(&self, threshold: Distance) -> Result<OverlapFlags> {
        // geography distances are in meters.
        let sql = format!(
            r#"
            SELECT
                a.id::bigint AS id,
                EXISTS (
                    SELECT 1
                    FROM {table} b
                    WHERE a.id <> b.id
                    AND ST_DWithin(a.geom, b.geom, $1)
                ) AS intersects
            FROM {table} a
            "#,
            table = self.table
        );

        let mut conn = self.acquire().await?;
        let rows = self
            .timed(
                "Computing overlaps",
                sqlx::query_as::<_, (i64, bool)>(&sql)
                    .bind(threshold.meters())
                    .fetch_all(&mut *conn),
            )
            .await?;

        Ok(rows.into_iter().collect())
    }
}

fn outlet_from_row(row: OutletRow) -> Result<Outlet> {
    let location = location(row.id, row.latitude, row.longitude)?.ok_or_else(|| {
        LocatorError::RepositoryQueryFailed(format!("Outlet {} has no coordinates", row.id))
    })?;

    Ok(Outlet {
        id: row.id,
        name: row.name.unwrap_or_default(),
        address: row.address.unwrap_or_default(),
        telephone: row.telephone.filter(|t| !t.trim().is_empty()),
        location,
        categories: split_categories(row.categories.as_deref()),
    })
}

fn site_from_row(row: SiteRow) -> Result<OutletSite> {
    Ok(OutletSite {
        location: location(row.id, row.latitude, row.longitude)?,
        id: row.id,
        name: row.name.unwrap_or_default(),
        address: row.address.unwrap_or_default(),
    })
}

/// `Ok(None)` when either coordinate is missing; an error when one is present
/// but unparseable or out of range.
fn location(id: i64, latitude: Option<String>, longitude: Option<String>) -> Result<Option<GeoPoint>> {
    let latitude = parse_coordinate(id, "latitude", latitude)?;
    let longitude = parse_coordinate(id, "longitude", longitude)?;

    match (latitude, longitude) {
        (Some(lat), Some(lon)) => GeoPoint::new(lat, lon).map(Some).map_err(|e| {
            LocatorError::RepositoryQueryFailed(format!("Outlet {} has invalid coordinates: {}", id, e))
        }),
        _ => Ok(None),
    }
}

fn parse_coordinate(id: i64, field: &str, raw: Option<String>) -> Result<Option<f64>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed.parse::<f64>().map(Some).map_err(|_| {
        LocatorError::RepositoryQueryFailed(format!(
            "Outlet {} has unparseable {} `{}`",
            id, field, raw
        ))
    })
}

fn split_categories(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
