use std::{
    path::Path,
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use rusqlite::Connection;
use tokio::sync::oneshot;

use crate::db::migrations::run_migrations;

type StoreJob = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum StoreMessage {
    Job(StoreJob),
    Close,
}

struct StoreWorker {
    jobs: mpsc::Sender<StoreMessage>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        let handle = match self.handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(handle) = handle else {
            return;
        };

        if self.jobs.send(StoreMessage::Close).is_err() {
            warn!("Round store worker already gone at shutdown");
        }
        if let Err(err) = handle.join() {
            error!("Round store worker panicked: {err:?}");
        }
    }
}

/// Open the SQLite file and bring its schema up to date.
fn open_store(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to open round store {}", path.display()))?;

    for (pragma, value) in [("journal_mode", "WAL"), ("foreign_keys", "ON")] {
        if let Err(err) = conn.pragma_update(None, pragma, value) {
            warn!("Round store ignored {pragma}={value}: {err}");
        }
    }

    run_migrations(&mut conn).context("failed to migrate round store")?;
    Ok(conn)
}

fn serve(mut conn: Connection, jobs: mpsc::Receiver<StoreMessage>) {
    for message in jobs {
        match message {
            StoreMessage::Job(job) => job(&mut conn),
            StoreMessage::Close => break,
        }
    }
    info!("Round store worker stopped");
}

/// Handle to the round store. The SQLite connection lives on one worker
/// thread; clones share it and queue closures in arrival order.
#[derive(Clone)]
pub struct Database {
    worker: Arc<StoreWorker>,
}

impl Database {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create data directory {}", parent.display())
            })?;
        }

        let (jobs_tx, jobs_rx) = mpsc::channel::<StoreMessage>();
        let (opened_tx, opened_rx) = mpsc::channel::<Result<()>>();
        let worker_path = db_path.clone();

        let handle = thread::Builder::new()
            .name("molistats-db".into())
            .spawn(move || match open_store(&worker_path) {
                Ok(conn) => {
                    if opened_tx.send(Ok(())).is_ok() {
                        serve(conn, jobs_rx);
                    }
                }
                Err(err) => {
                    let _ = opened_tx.send(Err(err));
                }
            })
            .context("failed to spawn round store worker")?;

        opened_rx
            .recv()
            .context("round store worker exited during startup")??;
        info!("Round store opened at {}", db_path.display());

        Ok(Self {
            worker: Arc::new(StoreWorker {
                jobs: jobs_tx,
                handle: Mutex::new(Some(handle)),
            }),
        })
    }

    /// Run `job` on the store thread and wait for its result.
    pub async fn execute<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let message = StoreMessage::Job(Box::new(move |conn| {
            if reply_tx.send(job(conn)).is_err() {
                warn!("Round store caller went away before the reply");
            }
        }));

        self.worker
            .jobs
            .send(message)
            .map_err(|_| anyhow!("round store worker is not running"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("round store worker stopped mid-request"))?
    }
}
