use std::any::Any;

use diesel::Connection;
use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use moneta_core::errors::Result;

use super::DbPool;
use crate::errors::StorageError;

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the single writer actor (spec §5: "single
/// transaction boundary per mutating endpoint"). Every repository write
/// goes through this instead of taking a connection from the pool directly,
/// so SQLite only ever sees one writer at a time.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>)>,
}

impl WriteHandle {
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();
        self.tx
            .send((Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)), ret_tx))
            .await
            .expect("writer actor's receiving channel was closed");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender without sending a result")
            .map(|boxed| *boxed.downcast::<T>().unwrap_or_else(|_| panic!("writer actor result type mismatch")))
    }
}

/// Spawns the background task that owns the single write connection and
/// processes jobs serially, each inside its own immediate transaction.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool.get().expect("failed to acquire the writer actor's dedicated connection");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
