//! Single-writer access to a [`TilingEngine`] shared by several callers.
//!
//! The engine reads and rewrites the whole layout on every open/close, so
//! concurrent callers must not interleave. A spawned task owns the engine
//! and drains an mpsc queue one command at a time; each caller gets its
//! answer back on a oneshot channel.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::tiling::{
    PaneId, PlacedPane, Signature, SplitSide, SyncReport, TilingEngine, TilingError, Toggled,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Tiling(#[from] TilingError),
    #[error("tiling service has shut down")]
    Closed,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutSnapshot<C> {
    pub signature: Signature,
    pub split_side: SplitSide,
    pub capacity: usize,
    pub panes: Vec<PlacedPane<C>>,
}

impl<C> LayoutSnapshot<C> {
    pub fn is_full(&self) -> bool {
        self.panes.len() >= self.capacity
    }
}

impl<C: Clone> From<&TilingEngine<C>> for LayoutSnapshot<C> {
    fn from(engine: &TilingEngine<C>) -> Self {
        Self {
            signature: engine.signature(),
            split_side: engine.split_side(),
            capacity: engine.capacity(),
            panes: engine.current_layout(),
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, TilingError>>;

enum Command<C> {
    Open {
        content: C,
        side: Option<SplitSide>,
        reply: Reply<PaneId>,
    },
    Close {
        id: PaneId,
        reply: Reply<()>,
    },
    Toggle {
        content: C,
        reply: Reply<Toggled>,
    },
    Sync {
        desired: Vec<C>,
        reply: Reply<SyncReport>,
    },
    SetSplitSide {
        side: SplitSide,
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<LayoutSnapshot<C>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Cloneable handle to the task owning the engine.
pub struct TilingHandle<C> {
    tx: mpsc::UnboundedSender<Command<C>>,
}

impl<C> Clone for TilingHandle<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C> TilingHandle<C>
where
    C: Clone + PartialEq + Send + 'static,
{
    /// Move `engine` into a new task. Must be called inside a tokio runtime.
    pub fn spawn(engine: TilingEngine<C>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(engine, rx));
        Self { tx }
    }

    pub async fn open(&self, content: C) -> Result<PaneId, ServiceError> {
        self.call(|reply| Command::Open {
            content,
            side: None,
            reply,
        })
        .await
    }

    pub async fn open_with(&self, content: C, side: SplitSide) -> Result<PaneId, ServiceError> {
        self.call(|reply| Command::Open {
            content,
            side: Some(side),
            reply,
        })
        .await
    }

    pub async fn close(&self, id: PaneId) -> Result<(), ServiceError> {
        self.call(|reply| Command::Close { id, reply }).await
    }

    pub async fn toggle(&self, content: C) -> Result<Toggled, ServiceError> {
        self.call(|reply| Command::Toggle { content, reply }).await
    }

    pub async fn sync(&self, desired: Vec<C>) -> Result<SyncReport, ServiceError> {
        self.call(|reply| Command::Sync { desired, reply }).await
    }

    pub async fn set_split_side(&self, side: SplitSide) -> Result<(), ServiceError> {
        self.request(|reply| Command::SetSplitSide { side, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<LayoutSnapshot<C>, ServiceError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Stop the task. Later calls on any clone return `ServiceError::Closed`.
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    async fn call<T>(
        &self,
        make: impl FnOnce(Reply<T>) -> Command<C>,
    ) -> Result<T, ServiceError> {
        Ok(self.request(make).await??)
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command<C>,
    ) -> Result<T, ServiceError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| ServiceError::Closed)?;
        rx.await.map_err(|_| ServiceError::Closed)
    }
}

async fn run<C>(mut engine: TilingEngine<C>, mut rx: mpsc::UnboundedReceiver<Command<C>>)
where
    C: Clone + PartialEq,
{
    while let Some(command) = rx.recv().await {
        match command {
            Command::Open {
                content,
                side,
                reply,
            } => {
                let side = side.unwrap_or(engine.split_side());
                let _ = reply.send(engine.open_with(content, side));
            }
            Command::Close { id, reply } => {
                let _ = reply.send(engine.close(id));
            }
            Command::Toggle { content, reply } => {
                let _ = reply.send(engine.toggle(content));
            }
            Command::Sync { desired, reply } => {
                let _ = reply.send(engine.sync(&desired));
            }
            Command::SetSplitSide { side, reply } => {
                engine.set_split_side(side);
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(LayoutSnapshot::from(&engine));
            }
            Command::Shutdown { reply } => {
                let _ = reply.send(());
                break;
            }
        }
    }
    tracing::debug!(panes = engine.len(), "tiling service stopped");
}
