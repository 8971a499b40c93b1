//! # Recommendation Orchestrator
//!
//! Coordinates the two entry points:
//!
//! **recommend**
//! 1. Validate the call parameters
//! 2. Fetch a fresh catalog and interaction snapshot from the provider
//! 3. Aggregate interactions
//! 4. Score collaboratively and by text profile
//! 5. Blend (or fall back to popularity)
//! 6. Rank and truncate
//!
//! **search**
//! 1. Fit a bigram TF-IDF space over every movie plus the query
//! 2. Score movies by cosine similarity to the query
//! 3. Apply year and genre filters, sort, truncate
//!
//! Nothing is cached between calls; every call rebuilds its matrices.

use std::time::Instant;

use tracing::{debug, info};

use data_loader::{Catalog, DataProvider, Interaction, UserId};
use pipeline::filters::{GenreFilter, YearRangeFilter};
use pipeline::{
    rank_recommendations, rank_search_results, FilterPipeline, Recommendation, SearchResult,
    SortPolicy,
};
use sources::{
    aggregate_interactions, collaborative_scores, popularity_scores, ContentSource,
    HybridBlender, ScoreBasis, TfidfVectorizer, UserItemMatrix,
};

use crate::config::{validate_alpha, EngineConfig};
use crate::error::{EngineError, Result};

// =============================================================================
// Search parameters
// =============================================================================

/// Keyword search request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Result list length; the engine's `search_top_n` when `None`
    pub top_n: Option<usize>,
    pub year_min: Option<u16>,
    pub year_max: Option<u16>,
    pub genres: Vec<String>,
    pub sort: SortPolicy,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    pub fn with_years(mut self, year_min: Option<u16>, year_max: Option<u16>) -> Self {
        self.year_min = year_min;
        self.year_max = year_max;
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort: impl Into<SortPolicy>) -> Self {
        self.sort = sort.into();
        self
    }
}

/// Everything keyword search needs besides the query and catalog
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub top_n: usize,
    pub year_min: Option<u16>,
    pub year_max: Option<u16>,
    pub genres: Vec<String>,
    pub sort: SortPolicy,
    pub max_features: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            top_n: config.search_top_n,
            year_min: None,
            year_max: None,
            genres: Vec::new(),
            sort: SortPolicy::default(),
            max_features: config.max_features,
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Serves recommend and search calls against a data provider
pub struct RecommendationEngine<P: DataProvider> {
    provider: P,
    config: EngineConfig,
}

impl<P: DataProvider> RecommendationEngine<P> {
    /// Create an engine; the configuration is validated up front
    pub fn new(provider: P, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Recommend up to `top_n` movies the user has not interacted with.
    ///
    /// `alpha` weights the collaborative signal and must lie within [0, 1];
    /// it is checked before any data is fetched.
    pub fn recommend(&self, user_id: UserId, top_n: usize, alpha: f64) -> Result<Vec<Recommendation>> {
        validate_alpha(alpha)?;

        let start_time = Instant::now();
        let snapshot = self.provider.load_snapshot()?;
        info!(
            "Loaded {} movies and {} interactions",
            snapshot.catalog.len(),
            snapshot.interactions.len()
        );

        let recommendations = recommend_for_user(
            user_id,
            &snapshot.catalog,
            &snapshot.interactions,
            top_n,
            alpha,
            self.config.max_features,
        );

        info!(
            "Total time to recommend {} movies for user {}: {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Recommend with the configured `top_n` and `alpha`
    pub fn recommend_default(&self, user_id: UserId) -> Result<Vec<Recommendation>> {
        self.recommend(user_id, self.config.top_n, self.config.alpha)
    }

    /// Keyword search over the provider's catalog
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        let start_time = Instant::now();
        if request.query.trim().is_empty() {
            debug!("Blank query; nothing to search");
            return Ok(Vec::new());
        }

        let catalog = self.provider.load_catalog()?;
        let options = SearchOptions {
            top_n: request.top_n.unwrap_or(self.config.search_top_n),
            year_min: request.year_min,
            year_max: request.year_max,
            genres: request.genres.clone(),
            sort: request.sort,
            max_features: self.config.max_features,
        };

        let results = search_movies_by_keyword(&request.query, &catalog, &options)?;
        info!(
            "Search for {:?} returned {} results in {:.2?}",
            request.query.trim(),
            results.len(),
            start_time.elapsed()
        );
        Ok(results)
    }
}

// =============================================================================
// Pure entry points
// =============================================================================

/// Hybrid recommendations for one user over an in-memory snapshot.
///
/// Returns an empty list for an empty catalog. Users without history get
/// popularity-ranked results.
pub fn recommend_for_user(
    user_id: UserId,
    catalog: &Catalog,
    interactions: &[Interaction],
    top_n: usize,
    alpha: f64,
    max_features: usize,
) -> Vec<Recommendation> {
    if catalog.is_empty() {
        debug!("Empty catalog; no recommendations");
        return Vec::new();
    }

    let agg = aggregate_interactions(interactions);
    debug!("Aggregated {} records into {} pairs", interactions.len(), agg.len());

    let matrix = UserItemMatrix::build(&agg, &catalog.movie_ids());
    let collab = collaborative_scores(user_id, &matrix, &agg);
    let content = ContentSource::new()
        .with_max_features(max_features)
        .scores(user_id, catalog, &agg);

    let blended = HybridBlender::new(alpha).blend(&collab, &content, || {
        popularity_scores(catalog, &agg)
    });
    if blended.basis == ScoreBasis::Popularity {
        info!("No personal signal for user {}; using popularity", user_id);
    }

    rank_recommendations(catalog, &blended.scores, top_n)
}

/// Keyword search over an in-memory catalog.
///
/// A blank query or an empty catalog yields an empty list.
pub fn search_movies_by_keyword(
    query: &str,
    catalog: &Catalog,
    options: &SearchOptions,
) -> Result<Vec<SearchResult>> {
    let query = query.trim();
    if query.is_empty() || catalog.is_empty() {
        return Ok(Vec::new());
    }

    let mut documents = catalog.documents();
    documents.push(query.to_string());

    let space = TfidfVectorizer::new()
        .with_max_features(options.max_features)
        .with_ngram_range(1, 2)
        .fit_transform(&documents);

    let scores = match space.row(catalog.len()) {
        Some(query_row) => space.similarities_to_row(query_row, catalog.len()),
        None => return Ok(Vec::new()),
    };

    let results: Vec<SearchResult> = catalog
        .iter()
        .zip(scores.iter())
        .map(|(movie, &score)| SearchResult::from_movie(movie, score))
        .collect();

    let filters = FilterPipeline::new()
        .add_optional(YearRangeFilter::from_bounds(options.year_min, options.year_max))
        .add_optional(GenreFilter::from_names(&options.genres));
    let filtered = filters
        .apply(results)
        .map_err(|e| EngineError::Filter(format!("{e:#}")))?;

    Ok(rank_search_results(filtered, options.sort, options.top_n))
}
