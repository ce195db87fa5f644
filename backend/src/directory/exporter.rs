use std::time::{Duration, Instant};

use anyhow::Context;
use common::{profile_names::ProfileNamesResponse, therapist::DirectoryEntry};
use futures::{Stream, TryStreamExt, stream};
use tracing::{error, info, warn};

use super::{ProfileNamesSource, compare_ids};
use crate::config::{DEFAULT_PAGE_ATTEMPTS, DEFAULT_PAGE_TIMEOUT, ExportConfig};
use common::profile_names::DEFAULT_PAGE_SIZE;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(250);

enum PageCursor {
    First,
    After(String),
    Done,
}

/// Walks a [`ProfileNamesSource`] page by page, strictly sequentially.
pub struct DirectoryExporter<S> {
    source: S,
    page_size: u32,
    page_timeout: Duration,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<S: ProfileNamesSource> DirectoryExporter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            max_attempts: DEFAULT_PAGE_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn from_config(source: S, config: &ExportConfig) -> Self {
        Self::new(source)
            .with_page_size(config.page_size)
            .with_page_timeout(config.page_timeout)
            .with_max_attempts(config.max_attempts)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_timeout(mut self, page_timeout: Duration) -> Self {
        self.page_timeout = page_timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One page, with a timeout per attempt and a bounded number of attempts.
    async fn fetch_page(&self, cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = match tokio::time::timeout(self.page_timeout, self.source.list_page(self.page_size, cursor)).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::anyhow!("page fetch timed out after {:?}", self.page_timeout)),
            };
            match result {
                Ok(page) => return Ok(page),
                Err(e) if attempt < self.max_attempts => {
                    warn!("directory export: attempt {} for cursor {:?} failed: {:#}", attempt, cursor, e);
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("page fetch failed after {attempt} attempts (cursor {cursor:?})"));
                }
            }
        }
    }

    async fn next_page(&self, state: PageCursor) -> anyhow::Result<Option<(Vec<DirectoryEntry>, PageCursor)>> {
        let cursor = match state {
            PageCursor::Done => return Ok(None),
            PageCursor::First => None,
            PageCursor::After(cursor) => Some(cursor),
        };
        let page = self.fetch_page(cursor.as_deref()).await?;
        let next = match page.next_cursor() {
            None => PageCursor::Done,
            Some(next) => {
                // a cursor that does not move forward would loop forever
                if let Some(previous) = &cursor {
                    if compare_ids(next, previous).is_le() {
                        anyhow::bail!("page cursor went from {previous:?} to {next:?}");
                    }
                }
                PageCursor::After(next.to_string())
            }
        };
        Ok(Some((page.directory_entries(), next)))
    }

    /// Lazy stream of pages. Each call starts again from the first page.
    pub fn pages(&self) -> impl Stream<Item = anyhow::Result<Vec<DirectoryEntry>>> + '_ {
        stream::try_unfold(PageCursor::First, move |state| self.next_page(state))
    }

    /// Every entry of the directory, or the first error.
    pub async fn fetch_all(&self) -> anyhow::Result<Vec<DirectoryEntry>> {
        let t0 = Instant::now();
        let mut all = Vec::new();
        let mut page_count = 0;
        let mut pages = std::pin::pin!(self.pages());
        while let Some(entries) = pages.try_next().await? {
            page_count += 1;
            info!(
                "directory export: page {} returned {} entries ({} so far)",
                page_count,
                entries.len(),
                all.len() + entries.len()
            );
            all.extend(entries);
        }
        info!(
            "directory export complete: {} pages, {} entries in {}ms",
            page_count,
            all.len(),
            t0.elapsed().as_millis()
        );
        Ok(all)
    }

    /// Like [`Self::fetch_all`] but a failure yields an empty directory
    /// instead of a partial one.
    pub async fn export_all_or_nothing(&self) -> Vec<DirectoryEntry> {
        match self.fetch_all().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("directory export failed, publishing no therapist routes: {:#}", e);
                Vec::new()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::directory::{InMemoryTherapistTable, LocalProfileNames, list_page};

    const P: u32 = 10;

    /// Counts calls and can fail or stall the first few of them.
    struct ScriptedSource {
        table: InMemoryTherapistTable,
        calls: AtomicUsize,
        failures_before_success: usize,
        stall: Option<Duration>,
    }

    impl ScriptedSource {
        fn new(rows: usize) -> Self {
            Self {
                table: InMemoryTherapistTable::from_names((0..rows).map(|i| (format!("Name{i}"), format!("Surname{i}")))),
                calls: AtomicUsize::new(0),
                failures_before_success: 0,
                stall: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProfileNamesSource for ScriptedSource {
        async fn list_page(&self, page_size: u32, cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                if let Some(stall) = self.stall {
                    tokio::time::sleep(stall).await;
                }
                anyhow::bail!("simulated outage on call {call}");
            }
            list_page(&self.table, page_size as i64, cursor).await
        }
    }

    /// Always hands back the same cursor.
    struct StuckSource;

    #[async_trait]
    impl ProfileNamesSource for StuckSource {
        async fn list_page(&self, page_size: u32, _cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse> {
            let table = InMemoryTherapistTable::from_names((0..50).map(|i| (format!("A{i}"), format!("B{i}"))));
            list_page(&table, page_size as i64, None).await
        }
    }

    fn exporter(source: ScriptedSource) -> DirectoryExporter<ScriptedSource> {
        DirectoryExporter::new(source).with_page_size(P).with_retry_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn walks_every_row_once_in_minimal_calls() {
        for n in [0, 1, P as usize, P as usize + 1, 10 * P as usize] {
            let exporter = exporter(ScriptedSource::new(n));
            let entries = exporter.fetch_all().await.unwrap();

            let expected_calls = n.div_ceil(P as usize).max(1);
            assert_eq!(exporter.source().calls(), expected_calls, "calls for n = {n}");
            assert_eq!(entries.len(), n);
            let unique = entries.iter().map(|e| e.id.clone()).collect::<HashSet<_>>();
            assert_eq!(unique.len(), n, "duplicate rows for n = {n}");
            let expected_ids = (1..=n).map(|i| i.to_string()).collect::<Vec<_>>();
            assert_eq!(entries.iter().map(|e| e.id.clone()).collect::<Vec<_>>(), expected_ids);
        }
    }

    #[tokio::test]
    async fn page_stream_is_restartable() {
        let exporter = exporter(ScriptedSource::new(25));
        let first_run = exporter.pages().try_collect::<Vec<_>>().await.unwrap();
        let second_run = exporter.pages().try_collect::<Vec<_>>().await.unwrap();
        assert_eq!(first_run.len(), 3);
        assert_eq!(first_run, second_run);
        assert_eq!(exporter.source().calls(), 6);
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let mut source = ScriptedSource::new(15);
        source.failures_before_success = 2;
        let exporter = exporter(source).with_max_attempts(3);
        let entries = exporter.fetch_all().await.unwrap();
        assert_eq!(entries.len(), 15);
        assert_eq!(exporter.source().calls(), 4);
    }

    #[tokio::test]
    async fn persistent_failure_yields_empty_export() {
        let mut source = ScriptedSource::new(15);
        source.failures_before_success = usize::MAX;
        let exporter = exporter(source).with_max_attempts(2);
        assert!(exporter.fetch_all().await.is_err());
        assert!(exporter.export_all_or_nothing().await.is_empty());
    }

    #[tokio::test]
    async fn stalled_page_times_out() {
        let mut source = ScriptedSource::new(5);
        source.failures_before_success = 1;
        source.stall = Some(Duration::from_secs(5));
        let exporter = exporter(source).with_page_timeout(Duration::from_millis(50)).with_max_attempts(2);
        let t0 = Instant::now();
        let entries = exporter.fetch_all().await.unwrap();
        assert_eq!(entries.len(), 5);
        assert!(t0.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn failure_after_first_page_drops_partial_results() {
        struct FailsOnSecondPage(AtomicUsize, InMemoryTherapistTable);

        #[async_trait]
        impl ProfileNamesSource for FailsOnSecondPage {
            async fn list_page(&self, page_size: u32, cursor: Option<&str>) -> anyhow::Result<ProfileNamesResponse> {
                if self.0.fetch_add(1, Ordering::SeqCst) > 0 {
                    anyhow::bail!("connection reset");
                }
                list_page(&self.1, page_size as i64, cursor).await
            }
        }

        let table = InMemoryTherapistTable::from_names((0..30).map(|i| (format!("N{i}"), format!("S{i}"))));
        let exporter = DirectoryExporter::new(FailsOnSecondPage(AtomicUsize::new(0), table))
            .with_page_size(P)
            .with_max_attempts(1);
        assert!(exporter.export_all_or_nothing().await.is_empty());
    }

    #[tokio::test]
    async fn cursor_that_does_not_advance_aborts() {
        let exporter = DirectoryExporter::new(StuckSource).with_page_size(P).with_max_attempts(1);
        let err = exporter.fetch_all().await.unwrap_err();
        assert!(err.to_string().contains("cursor"));
    }

    #[tokio::test]
    async fn local_source_serves_table_pages() {
        let table = InMemoryTherapistTable::from_names([("José".to_string(), "O'Brien".to_string())]);
        let exporter = DirectoryExporter::new(LocalProfileNames::new(table));
        let entries = exporter.fetch_all().await.unwrap();
        assert_eq!(entries[0].display_name, "José O'Brien");
    }
}
