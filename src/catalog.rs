//! Owner of the in-memory project list.
//!
//! One task holds the list and applies [`CatalogEvent`]s from a queue.
//! Readers get immutable snapshots through a `watch` channel, so a request
//! sees either the previous list or the replacement, never a mix.
//!
//! ```text
//!  refresh task ──Replace──▶ ┌──────────────┐ ──snapshot──▶ handlers
//!                            │ catalog task │
//!  POST /api/refresh ──────▶ └──────────────┘
//! ```

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::ingest;
use crate::models::{example_project, ProjectRecord};
use crate::sources::CsvSource;

pub type Snapshot = Arc<Vec<ProjectRecord>>;

/// Messages accepted by the catalog task.
#[derive(Debug)]
pub enum CatalogEvent {
    /// Swap in a freshly ingested list.
    Replace(Vec<ProjectRecord>),
}

/// Cloneable handle to the catalog task.
#[derive(Clone)]
pub struct CatalogHandle {
    events: mpsc::UnboundedSender<CatalogEvent>,
    snapshot: watch::Receiver<Snapshot>,
}

/// Starts the catalog task holding only the example project.
///
/// Must be called from within a tokio runtime.
pub fn spawn_catalog() -> CatalogHandle {
    let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(vec![example_project()]));
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    tokio::spawn(run_catalog(events_rx, snapshot_tx));

    CatalogHandle {
        events: events_tx,
        snapshot: snapshot_rx,
    }
}

async fn run_catalog(
    mut events: mpsc::UnboundedReceiver<CatalogEvent>,
    snapshot: watch::Sender<Snapshot>,
) {
    while let Some(event) = events.recv().await {
        match event {
            CatalogEvent::Replace(projects) => {
                log::debug!("catalog replaced with {} projects", projects.len());
                snapshot.send_replace(Arc::new(projects));
            }
        }
    }
}

impl CatalogHandle {
    /// Current list. The first element is always the example project.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn post(&self, event: CatalogEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| anyhow::anyhow!("catalog task has stopped"))
    }

    pub fn is_closed(&self) -> bool {
        self.events.is_closed()
    }

    /// Waits until the list has been replaced since this handle last looked.
    pub async fn changed(&mut self) -> Result<()> {
        self.snapshot.changed().await?;
        Ok(())
    }

    /// Spawns one ingestion from the configured source.
    ///
    /// Fire-and-forget: on success the result is posted as a replacement, on
    /// failure the error is logged and the list stays as it was. Concurrent
    /// refreshes are not coordinated; whichever finishes last wins.
    pub fn refresh(&self, config: Arc<Config>) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            let result = ingest::load_projects(&config).await;
            handle.apply(result);
        })
    }

    /// Like [`refresh`](Self::refresh) with an explicit source.
    pub fn refresh_from(&self, source: Arc<dyn CsvSource>) -> JoinHandle<()> {
        let handle = self.clone();
        tokio::spawn(async move {
            let result = ingest::fetch_projects(source.as_ref()).await;
            handle.apply(result);
        })
    }

    fn apply(&self, result: Result<Vec<ProjectRecord>>) {
        match result {
            Ok(projects) => {
                if let Err(e) = self.post(CatalogEvent::Replace(projects)) {
                    log::error!("dropping ingested projects: {}", e);
                }
            }
            Err(e) => log::error!("Error fetching projects: {:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSource(String);

    #[async_trait]
    impl CsvSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl CsvSource for BrokenSource {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        async fn fetch(&self) -> Result<String> {
            anyhow::bail!("network unreachable")
        }
    }

    #[tokio::test]
    async fn starts_with_only_the_example() {
        let catalog = spawn_catalog();
        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, 0);
    }

    #[tokio::test]
    async fn refresh_replaces_the_list() {
        let mut catalog = spawn_catalog();
        let source = Arc::new(StaticSource(
            "Project Title,Author Name\nSolar Tracker,Jane Doe\nRover,Kim\n".to_string(),
        ));

        catalog.refresh_from(source).await.unwrap();
        catalog.changed().await.unwrap();

        let titles: Vec<String> = catalog.snapshot().iter().map(|p| p.title.clone()).collect();
        assert_eq!(titles.len(), 3);
        assert!(titles[0].starts_with("EcoTrack"));
        assert_eq!(&titles[1..], ["Solar Tracker", "Rover"]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let mut catalog = spawn_catalog();
        let good = Arc::new(StaticSource("Project Title\nSolar Tracker\n".to_string()));
        catalog.refresh_from(good).await.unwrap();
        catalog.changed().await.unwrap();
        assert_eq!(catalog.snapshot().len(), 2);

        catalog.refresh_from(Arc::new(BrokenSource)).await.unwrap();
        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].title, "Solar Tracker");
    }

    #[tokio::test]
    async fn old_snapshots_are_not_mutated() {
        let mut catalog = spawn_catalog();
        let before = catalog.snapshot();

        catalog
            .post(CatalogEvent::Replace(vec![example_project(), example_project()]))
            .unwrap();
        catalog.changed().await.unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(catalog.snapshot().len(), 2);
    }
}
