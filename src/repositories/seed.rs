//! Rutas de demostración
//!
//! Se insertan solo cuando la colección de rutas está vacía, así que
//! reiniciar contra una base de datos ya sembrada no las duplica.
//! PostgreSQL usa `PostgresStore::seed_routes_locked`, que hace la misma
//! comprobación con la tabla bloqueada.

use tracing::debug;

use super::{EntityStore, StoreResult};
use crate::models::InsertRoute;

fn demo_route(
    number: &str,
    from: &str,
    to: &str,
    duration: &str,
    distance: &str,
    seats: &str,
    status: &str,
    category: &[&str],
) -> InsertRoute {
    InsertRoute {
        number: number.to_string(),
        from_location: from.to_string(),
        to_location: to.to_string(),
        duration: duration.to_string(),
        distance: distance.to_string(),
        seats: seats.to_string(),
        status: status.to_string(),
        category: category.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn demo_routes() -> Vec<InsertRoute> {
    vec![
        demo_route("Route #42", "Chandigarh", "Mohali", "25 min", "12.5 km", "24 seats", "Active", &["popular"]),
        demo_route(
            "Route #108",
            "Gurudwara Sahib",
            "Golden Temple",
            "45 min",
            "18.2 km",
            "30 seats",
            "En Route",
            &["religious"],
        ),
        demo_route(
            "Route #156",
            "Ludhiana",
            "Delhi",
            "180 min",
            "95.4 km",
            "40 seats",
            "Delayed",
            &["highway", "popular"],
        ),
    ]
}

/// Devuelve cuántas rutas se insertaron (0 si ya había alguna)
pub async fn seed_routes(store: &dyn EntityStore) -> StoreResult<usize> {
    if !store.get_routes().await?.is_empty() {
        debug!("Rutas existentes, se omite la siembra");
        return Ok(0);
    }

    let routes = demo_routes();
    let count = routes.len();
    for route in routes {
        store.create_route(route).await?;
    }
    Ok(count)
}
