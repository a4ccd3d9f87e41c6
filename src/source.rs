//! The read side: record budget, pacing and generation behind one `read` call.

use crate::config::{derive_seed, ConfigError, GeneratorConfig, GeneratorSettings};
use cdc_burst::{BurstLimiter, Cancelled};
use cdc_core::Record;
use cdc_generator::{
    CollectionGenerator, GeneratorError, MultiRecordGenerator, PayloadBuilder, RecordGenerator,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors raised by [`Source`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Record generation failed: {0}")]
    Generator(#[from] GeneratorError),
}

/// Result of a single [`Source::read`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Record(Record),
    /// The configured record budget has been used up
    Exhausted,
    /// The wait was cancelled before a record was produced
    Stopped,
}

/// Rate-limited stream of generated records.
pub struct Source {
    generator: MultiRecordGenerator,
    limiter: BurstLimiter,
    record_count: u64,
    emitted: u64,
}

impl Source {
    /// Validate `config` and open a source for it.
    pub fn open(config: &GeneratorConfig) -> Result<Self, SourceError> {
        Self::from_settings(&config.validate()?)
    }

    /// Open a source from flat `key=value` parameters.
    pub fn from_params<'a, I>(params: I) -> Result<Self, SourceError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        Self::open(&GeneratorConfig::from_params(params)?)
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self, SourceError> {
        let generators = settings
            .collections
            .iter()
            .map(|collection| {
                let payload =
                    PayloadBuilder::from_format(&collection.format, derive_seed(collection.seed, 1))?;
                CollectionGenerator::new(
                    collection.name.clone(),
                    collection.operations.clone(),
                    payload,
                    collection.seed,
                )
            })
            .collect::<Result<Vec<_>, GeneratorError>>()?;
        let generator = MultiRecordGenerator::new(generators, settings.seed)?;
        let limiter = BurstLimiter::new(settings.rate, settings.burst);

        info!(
            "Opened source with {} collection(s), interval {:?}, burst {:?}, record count {}",
            generator.generators().len(),
            limiter.interval(),
            limiter.schedule(),
            settings.record_count
        );
        for collection in generator.generators() {
            debug!(
                "Collection {}: format {}, operations {:?}",
                collection.collection().unwrap_or("<unnamed>"),
                collection.format_type(),
                collection.operations()
            );
        }

        Ok(Self {
            generator,
            limiter,
            record_count: settings.record_count,
            emitted: 0,
        })
    }

    /// Number of records returned so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Whether a finite record budget has been used up.
    pub fn is_exhausted(&self) -> bool {
        self.record_count > 0 && self.emitted >= self.record_count
    }

    /// Produce the next record, waiting as long as the limiter demands.
    ///
    /// Returns [`ReadOutcome::Exhausted`] once the record budget is spent and
    /// [`ReadOutcome::Stopped`] when `cancel` fires during the wait.
    pub async fn read(&mut self, cancel: &CancellationToken) -> Result<ReadOutcome, SourceError> {
        if self.is_exhausted() {
            info!("Record budget of {} exhausted", self.record_count);
            return Ok(ReadOutcome::Exhausted);
        }

        match self.limiter.acquire(cancel).await {
            Ok(wait) => {
                if !wait.is_zero() {
                    debug!("Waited {:?} before record {}", wait, self.emitted + 1);
                }
            }
            Err(Cancelled) => {
                debug!("Read cancelled while waiting");
                return Ok(ReadOutcome::Stopped);
            }
        }

        let record = self.generator.next_record()?;
        self.emitted += 1;
        Ok(ReadOutcome::Record(record))
    }
}
