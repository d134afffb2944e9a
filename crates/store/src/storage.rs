use std::collections::HashMap;

use jiff::{SignedDuration, Timestamp};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{
    article::ResearchArticle,
    clock::{Clock, SystemClock},
    record::SimulationResult,
};

/// How long cached articles stay fresh unless configured otherwise.
pub const DEFAULT_ARTICLE_TTL: SignedDuration = SignedDuration::from_mins(30);

/// A place to keep simulation results and cached research articles.
pub trait Storage: Send + Sync {
    /// Stores `result`, replacing any record with the same id, and returns it.
    fn save(&self, result: SimulationResult) -> SimulationResult;

    fn get(&self, id: &Uuid) -> Option<SimulationResult>;

    /// Returns every stored result in the order first saved.
    fn list(&self) -> Vec<SimulationResult>;

    /// Replaces the article cache and restarts its freshness window.
    fn cache_articles(&self, articles: Vec<ResearchArticle>);

    /// Returns the cached articles, or nothing once the cache has expired.
    fn cached_articles(&self) -> Vec<ResearchArticle>;

    /// Returns the current time as this store sees it.
    ///
    /// New records are stamped with this, so a store on a manual clock
    /// produces reproducible timestamps.
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Default)]
struct Results {
    order: Vec<Uuid>,
    by_id: HashMap<Uuid, SimulationResult>,
}

#[derive(Debug)]
struct ArticleCache {
    articles: Vec<ResearchArticle>,
    stored_at: Timestamp,
}

/// An in-process [`Storage`] guarded by read-write locks.
///
/// Article freshness is measured with the injected [`Clock`]. A cache is
/// still fresh when its age equals the TTL exactly.
#[derive(Debug)]
pub struct MemStorage<C = SystemClock> {
    results: RwLock<Results>,
    articles: RwLock<Option<ArticleCache>>,
    ttl: SignedDuration,
    clock: C,
}

impl MemStorage {
    /// Creates an empty store on the system clock with the default TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemStorage<C> {
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            results: RwLock::new(Results::default()),
            articles: RwLock::new(None),
            ttl: DEFAULT_ARTICLE_TTL,
            clock,
        }
    }

    /// Sets how long cached articles stay fresh.
    #[must_use]
    pub fn with_ttl(self, ttl: SignedDuration) -> Self {
        Self { ttl, ..self }
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Returns the number of stored results.
    pub fn len(&self) -> usize {
        self.results.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Clock> Storage for MemStorage<C> {
    fn save(&self, result: SimulationResult) -> SimulationResult {
        let mut results = self.results.write();
        if results.by_id.insert(result.id, result.clone()).is_none() {
            results.order.push(result.id);
        }
        debug!(id = %result.id, total = results.order.len(), "saved simulation");
        result
    }

    fn get(&self, id: &Uuid) -> Option<SimulationResult> {
        self.results.read().by_id.get(id).cloned()
    }

    fn list(&self) -> Vec<SimulationResult> {
        let results = self.results.read();
        results
            .order
            .iter()
            .filter_map(|id| results.by_id.get(id).cloned())
            .collect()
    }

    fn cache_articles(&self, articles: Vec<ResearchArticle>) {
        debug!(count = articles.len(), "caching research articles");
        *self.articles.write() = Some(ArticleCache {
            articles,
            stored_at: self.clock.now(),
        });
    }

    fn cached_articles(&self) -> Vec<ResearchArticle> {
        let cache = self.articles.read();
        let Some(cache) = cache.as_ref() else {
            debug!("article cache empty");
            return Vec::new();
        };

        let age = self.clock.now().duration_since(cache.stored_at);
        if age > self.ttl {
            debug!(age_secs = age.as_secs(), "article cache expired");
            return Vec::new();
        }

        debug!(count = cache.articles.len(), "article cache hit");
        cache.articles.clone()
    }

    fn now(&self) -> Timestamp {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use glucoloop_engine::{
        DataPoint, Scenario, ScenarioKind, SimulationOutput, SimulatorParameters,
    };

    use crate::clock::ManualClock;

    fn start() -> Timestamp {
        "2025-06-01T12:00:00Z".parse().unwrap()
    }

    fn result(glucose: f64) -> SimulationResult {
        let parameters = SimulatorParameters {
            weight: 70.0,
            carb_intake: 45.0,
            insulin_sensitivity_factor: 50.0,
            basal_rate: 1.0,
            target_glucose: 110.0,
            correction_factor: 50.0,
        };
        let output = SimulationOutput {
            data_points: vec![DataPoint {
                time: 0,
                glucose,
                insulin: 1.0,
                carbs: 0.0,
            }],
            algorithm_logs: Vec::new(),
        };
        SimulationResult::new(
            parameters,
            Scenario::new(ScenarioKind::Normal, 0.0),
            output,
            start(),
        )
    }

    fn article(id: &str) -> ResearchArticle {
        ResearchArticle {
            id: id.to_owned(),
            title: format!("Article {id}"),
            authors: Vec::new(),
            source: "PubMed".to_owned(),
            pub_date: "2025-01-01".to_owned(),
            abstract_text: String::new(),
            summary: String::new(),
            why_it_matters: String::new(),
            url: format!("https://example.org/{id}"),
            topics: Vec::new(),
        }
    }

    #[test]
    fn list_keeps_insertion_order() {
        let storage = MemStorage::new();
        let saved: Vec<_> = [101.0, 99.5, 140.2]
            .into_iter()
            .map(|glucose| storage.save(result(glucose)))
            .collect();

        let listed: Vec<Uuid> = storage.list().iter().map(|r| r.id).collect();
        let expected: Vec<Uuid> = saved.iter().map(|r| r.id).collect();
        assert_eq!(listed, expected);
        assert_eq!(storage.len(), 3);
    }

    #[test]
    fn resaving_replaces_in_place() {
        let storage = MemStorage::new();
        let first = storage.save(result(100.0));
        let second = storage.save(result(120.0));

        let mut updated = first.clone();
        updated.data_points[0].glucose = 105.0;
        storage.save(updated.clone());

        let listed = storage.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], updated);
        assert_eq!(listed[1], second);
        assert_eq!(storage.get(&first.id), Some(updated));
    }

    #[test]
    fn unknown_id_is_absent() {
        let storage = MemStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get(&Uuid::new_v4()), None);
    }

    #[test]
    fn article_cache_expires_after_ttl() {
        let clock = ManualClock::new(start());
        let storage = MemStorage::with_clock(&clock);

        assert!(storage.cached_articles().is_empty());

        storage.cache_articles(vec![article("a"), article("b")]);
        clock.advance(SignedDuration::from_mins(29));
        assert_eq!(storage.cached_articles().len(), 2);

        clock.advance(SignedDuration::from_mins(1));
        assert_eq!(storage.cached_articles().len(), 2);

        clock.advance(SignedDuration::from_secs(1));
        assert!(storage.cached_articles().is_empty());
    }

    #[test]
    fn recaching_restarts_the_window() {
        let clock = ManualClock::new(start());
        let storage = MemStorage::with_clock(&clock).with_ttl(SignedDuration::from_mins(5));
        assert_eq!(storage.ttl(), SignedDuration::from_mins(5));

        storage.cache_articles(vec![article("old")]);
        clock.advance(SignedDuration::from_mins(6));
        assert!(storage.cached_articles().is_empty());

        storage.cache_articles(vec![article("new")]);
        let cached = storage.cached_articles();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "new");
    }

    #[test]
    fn storage_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemStorage>();
        assert_send_sync::<MemStorage<&ManualClock>>();
    }
}
