//! The aggregation pipeline
//!
//! Resolve the protein name once, then run the four source branches over the
//! same read-only [`Accession`] and join them before assembly. Inside a branch
//! calls stay sequential so the rate limiter keeps its spacing.

use crate::aggregate;
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::rate_limit::{self, RateLimiter};
use crate::sources::{
    InterProAdapter, QuickGoAdapter, ResolvedProtein, Resolver, StringAdapter, StringQuery,
    UniProtAdapter,
};
use protfetch_common::{Accession, CompositeRecord};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// Hooks for reporting progress while a run is in flight
pub trait RunObserver: Send + Sync {
    fn on_resolved(&self, _resolved: &ResolvedProtein) {}

    fn on_go_terms_discovered(&self, _count: usize) {}

    fn on_go_term_expanded(&self, _go_id: &str) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl RunObserver for Silent {}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The name matched nothing; no adapter ran and no file was written
    NotFound { query: String },
    Written {
        resolved: ResolvedProtein,
        path: PathBuf,
        record: CompositeRecord,
    },
}

/// Resolver, adapters and output location for one run
#[derive(Debug, Clone)]
pub struct Pipeline {
    resolver: Resolver,
    uniprot: UniProtAdapter,
    interpro: InterProAdapter,
    string: StringAdapter,
    quickgo: QuickGoAdapter,
    output_dir: PathBuf,
}

impl Pipeline {
    /// Build with the limiter described by `config`
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_limiter(config, rate_limit::from_config(config))
    }

    /// Build with an explicit limiter shared by STRING and QuickGO
    pub fn with_limiter(config: &Config, limiter: Arc<dyn RateLimiter>) -> Result<Self> {
        let client = ApiClient::new(config)?;

        Ok(Self {
            resolver: Resolver::new(client.clone()),
            uniprot: UniProtAdapter::new(client.clone()),
            interpro: InterProAdapter::new(client.clone()),
            string: StringAdapter::new(client.clone(), limiter.clone(), config.species),
            quickgo: QuickGoAdapter::new(client, limiter),
            output_dir: config.output_dir.clone(),
        })
    }

    /// Fetch every source for an already resolved accession
    #[instrument(skip_all, fields(accession = %accession))]
    pub async fn collect(
        &self,
        accession: &Accession,
        observer: &dyn RunObserver,
    ) -> CompositeRecord {
        let string_query = StringQuery::from(accession);

        let quickgo = async {
            let terms = self.quickgo.discover_terms(accession).await;
            observer.on_go_terms_discovered(terms.len());
            self.quickgo
                .expand(terms, |go_id| observer.on_go_term_expanded(go_id))
                .await
        };

        let (uniprot, interpro, string, quickgo) = tokio::join!(
            self.uniprot.fetch(accession),
            self.interpro.fetch(accession),
            self.string.fetch(&string_query),
            quickgo,
        );

        aggregate::assemble(uniprot, interpro, string, quickgo)
    }

    /// Resolve `name`, collect every source and write the artifact
    pub async fn run(&self, name: &str, observer: &dyn RunObserver) -> Result<RunOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(RunOutcome::NotFound {
                query: String::new(),
            });
        }

        let Some(resolved) = self.resolver.resolve(name).await else {
            return Ok(RunOutcome::NotFound {
                query: name.to_string(),
            });
        };
        observer.on_resolved(&resolved);

        let record = self.collect(&resolved.accession, observer).await;
        let path =
            aggregate::write_artifact(&record, &self.output_dir, &resolved.accession).await?;

        info!(accession = %resolved.accession, path = %path.display(), "Run complete");
        Ok(RunOutcome::Written {
            resolved,
            path,
            record,
        })
    }
}
