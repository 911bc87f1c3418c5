//! Offloads synchronous Diesel work from the async executor.

use crate::automation::ports::{AutomationRepositoryError, AutomationRepositoryResult};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type shared by the automation adapters.
pub type AutomationPgPool = Pool<ConnectionManager<PgConnection>>;

/// Checks out a connection and runs `f` on the blocking thread pool.
pub(super) async fn run_blocking<F, T>(
    pool: &AutomationPgPool,
    f: F,
) -> AutomationRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> AutomationRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(AutomationRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(AutomationRepositoryError::persistence)?
}
