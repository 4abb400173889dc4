use sqlx::PgConnection;

/// A handle to an active database connection which can be borrowed to execute queries
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Owns the clients used to reach external systems so business logic can stay
/// agnostic of the concrete systems it communicates with
pub trait ExternalConnectivity {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    /// Borrow a scoped database connection, held only for the duration of the request
    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}

/// Implemented by connection owners which can open a database transaction
pub trait Transactable {
    type Handle: ExternalConnectivity + TransactionHandle + Send;

    async fn start_transaction(&self) -> Result<Self::Handle, anyhow::Error>;
}

/// An active database transaction. Dropping the handle without calling [commit](Self::commit)
/// rolls the transaction back.
pub trait TransactionHandle {
    async fn commit(self) -> Result<(), anyhow::Error>;
}

/// Combination trait for connection owners which can both execute one-off queries
/// and open transactions
pub trait TransactableExternalConnectivity: ExternalConnectivity + Transactable + Send {}
impl<T: ExternalConnectivity + Transactable + Send> TransactableExternalConnectivity for T {}
