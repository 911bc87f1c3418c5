//! Embedded `PostgreSQL` cluster shared by the adapter suite.


use self::env_utils::{env_vars_to_os, port_override};
use self::fs_utils::{sync_password_from_file, sync_port_from_pid};
use crate::test_helpers::EnvVarGuard;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Status};
use rstest::fixture;
use std::sync::{Mutex, OnceLock};
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<ManagedCluster> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Shared cluster handle.
pub type PostgresCluster = &'static ManagedCluster;

/// Embedded `PostgreSQL` server started once per test binary.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    runtime: Runtime,
    postgres: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn start() -> Result<Self, BoxError> {
        let port_guard = EnvVarGuard::set_many(&port_override()?);
        let mut bootstrap = bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError)?;
        drop(port_guard);

        if matches!(bootstrap.privileges, ExecutionPrivileges::Root) {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "embedded PostgreSQL refuses to run as root; run this suite as an unprivileged user",
            )));
        }
        sync_password_from_file(&mut bootstrap.settings)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| Box::new(err) as BoxError)?;
        let env_guard = EnvVarGuard::set_many(&env_vars_to_os(&bootstrap.environment.to_env()));
        let mut postgres = PostgreSQL::new(bootstrap.settings.clone());
        let started = runtime.block_on(async {
            postgres.setup().await?;
            if !matches!(postgres.status(), Status::Started) {
                postgres.start().await?;
            }
            Ok::<(), postgresql_embedded::Error>(())
        });
        drop(env_guard);
        started.map_err(|err| Box::new(err) as BoxError)?;

        bootstrap.settings = postgres.settings().clone();
        sync_port_from_pid(&mut bootstrap.settings)?;
        Ok(Self {
            bootstrap,
            runtime,
            postgres: Some(postgres),
        })
    }

    /// Connection URL for `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    /// Creates `template` and runs `schema` in it unless it already exists.
    pub fn ensure_template(&self, template: &str, schema: &str) -> Result<(), BoxError> {
        let _guard = TEMPLATE_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if self.database_exists(template)? {
            return Ok(());
        }

        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        let migrated = PgConnection::establish(&self.database_url(template))
            .map_err(|err| Box::new(err) as BoxError)
            .and_then(|mut connection| {
                connection
                    .batch_execute(schema)
                    .map_err(|err| Box::new(err) as BoxError)
            });
        if let Err(err) = migrated {
            self.drop_database(template)?;
            return Err(err);
        }
        Ok(())
    }

    /// Clones `template` into a fresh database that is dropped with the
    /// returned handle.
    pub fn temporary_database(
        &'static self,
        name: &str,
        template: &str,
    ) -> Result<TemporaryDatabase, BoxError> {
        self.execute_admin_sql(&format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(name),
            quote_identifier(template),
        ))?;
        Ok(TemporaryDatabase {
            cluster: self,
            name: name.to_owned(),
        })
    }

    fn drop_database(&self, name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(name)
        ))
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut connection = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut connection)
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    fn database_exists(&self, name: &str) -> Result<bool, BoxError> {
        #[derive(QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut connection = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(name)
        .get_result::<ExistsRow>(&mut connection)
        .map_err(|err| Box::new(err) as BoxError)?;
        Ok(row.exists)
    }
}

impl Drop for ManagedCluster {
    fn drop(&mut self) {
        if let Some(postgres) = self.postgres.take() {
            drop(self.runtime.block_on(postgres.stop()));
        }
    }
}

/// Database cloned from the migrated template for a single test.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
}

impl TemporaryDatabase {
    /// Connection URL for this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.database_url(&self.name)
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Starts the shared cluster on first use.
#[fixture]
pub fn postgres_cluster() -> PostgresCluster {
    SHARED_CLUSTER.get_or_init(|| match ManagedCluster::start() {
        Ok(cluster) => cluster,
        Err(err) => panic!("SKIP-TEST-CLUSTER: failed to start PostgreSQL: {err}"),
    })
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
