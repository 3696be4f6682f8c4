//! Background store worker.
//!
//! Disk and cipher work runs on one dedicated thread so an interactive
//! front-end never blocks on it. Requests are handled in the order they
//! are submitted; each one answers on its own channel.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, error, info};

use crate::error::{NoteError, Result};
use crate::notes::NoteRepository;
use crate::storage::{create_backup, restore_backup, EncryptedFileStore, NoteStore};

enum Request {
    Save(NoteRepository, Sender<Result<()>>),
    Load(Sender<Result<NoteRepository>>),
    CreateBackup(NoteRepository, Sender<Result<PathBuf>>),
    RestoreBackup(PathBuf, Sender<Result<NoteRepository>>),
    Stop,
}

/// Handle to the store worker thread.
///
/// Dropping the handle stops the worker after pending requests finish.
pub struct StoreWorker {
    requests: Sender<Request>,
    thread: Option<JoinHandle<()>>,
}

impl StoreWorker {
    /// Start the worker for `store`, writing backups into `backup_dir`.
    pub fn spawn(store: EncryptedFileStore, backup_dir: impl Into<PathBuf>) -> Result<Self> {
        let backup_dir = backup_dir.into();
        let (requests, inbox) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("notevault-store".to_string())
            .spawn(move || run(store, backup_dir, inbox))?;
        debug!("Store worker started");
        Ok(Self {
            requests,
            thread: Some(thread),
        })
    }

    /// Encrypt and atomically write `repository`.
    pub fn save(&self, repository: NoteRepository) -> Receiver<Result<()>> {
        self.submit(|reply| Request::Save(repository, reply))
    }

    pub fn load(&self) -> Receiver<Result<NoteRepository>> {
        self.submit(Request::Load)
    }

    pub fn create_backup(&self, repository: NoteRepository) -> Receiver<Result<PathBuf>> {
        self.submit(|reply| Request::CreateBackup(repository, reply))
    }

    /// Decode a backup. The caller decides whether to swap it in.
    pub fn restore_backup(&self, path: impl Into<PathBuf>) -> Receiver<Result<NoteRepository>> {
        let path = path.into();
        self.submit(|reply| Request::RestoreBackup(path, reply))
    }

    /// Finish pending requests and join the thread.
    ///
    /// Later requests fail with `NoteError::WorkerStopped`.
    pub fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.requests.send(Request::Stop);
        if thread.join().is_err() {
            error!("Store worker panicked");
        }
        debug!("Store worker stopped");
    }

    fn submit<T>(&self, request: impl FnOnce(Sender<Result<T>>) -> Request) -> Receiver<Result<T>> {
        let (reply, receiver) = mpsc::channel();
        if self.requests.send(request(reply.clone())).is_err() {
            let _ = reply.send(Err(NoteError::WorkerStopped));
        }
        receiver
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(store: EncryptedFileStore, backup_dir: PathBuf, inbox: Receiver<Request>) {
    // A dropped receiver on the caller side is not an error; the work is done.
    for request in inbox {
        match request {
            Request::Save(repository, reply) => {
                let _ = reply.send(store.save(&repository));
            }
            Request::Load(reply) => {
                let _ = reply.send(store.load());
            }
            Request::CreateBackup(repository, reply) => {
                let _ = reply.send(create_backup(&repository, store.key(), &backup_dir));
            }
            Request::RestoreBackup(path, reply) => {
                let _ = reply.send(restore_backup(&path, store.key()));
            }
            Request::Stop => {
                info!("Store worker shutting down");
                break;
            }
        }
    }
}
