//! Record generators: operation choice, key, metadata and payload slots.

use crate::generators::faker;
use crate::payload::PayloadBuilder;
use crate::GeneratorError;
use cdc_core::{Data, FormatType, Metadata, Operation, Payload, Record, METADATA_COLLECTION};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that produces change-event records on demand.
pub trait RecordGenerator {
    fn next_record(&mut self) -> Result<Record, GeneratorError>;
}

/// Generates records for a single collection.
///
/// Each call picks an operation uniformly from the configured list and fills
/// the payload slots that operation requires. Updates get independently
/// generated `before` and `after` images.
pub struct CollectionGenerator {
    collection: Option<String>,
    operations: Vec<Operation>,
    payload: PayloadBuilder,
    rng: StdRng,
    count: u64,
}

impl CollectionGenerator {
    pub fn new(
        collection: Option<String>,
        operations: Vec<Operation>,
        payload: PayloadBuilder,
        seed: u64,
    ) -> Result<Self, GeneratorError> {
        if operations.is_empty() {
            return Err(GeneratorError::NoOperations);
        }
        Ok(Self {
            collection,
            operations,
            payload,
            rng: StdRng::seed_from_u64(seed),
            count: 0,
        })
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn format_type(&self) -> FormatType {
        self.payload.format_type()
    }

    /// Number of records generated so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    fn pick_operation(&mut self) -> Operation {
        if self.operations.len() == 1 {
            return self.operations[0];
        }
        self.operations[self.rng.random_range(0..self.operations.len())]
    }
}

impl RecordGenerator for CollectionGenerator {
    fn next_record(&mut self) -> Result<Record, GeneratorError> {
        let operation = self.pick_operation();

        let before = if operation.has_before() {
            Some(self.payload.build(&mut self.rng)?)
        } else {
            None
        };
        let after = if operation.has_after() {
            Some(self.payload.build(&mut self.rng)?)
        } else {
            None
        };

        let mut metadata = Metadata::new();
        metadata.set_created_at(Utc::now());
        if let Some(collection) = &self.collection {
            metadata.insert(METADATA_COLLECTION, collection.as_str());
        }

        let key = Data::Raw(faker::word(&mut self.rng).as_bytes().to_vec());

        self.count += 1;
        Ok(Record {
            position: self.count.to_string(),
            operation,
            metadata,
            key,
            payload: Payload { before, after },
        })
    }
}

/// Picks one of several collection generators uniformly for every record.
///
/// Positions are assigned here from a single counter, so they stay unique
/// across all collections of the stream.
pub struct MultiRecordGenerator {
    generators: Vec<CollectionGenerator>,
    rng: StdRng,
    count: u64,
}

impl MultiRecordGenerator {
    pub fn new(generators: Vec<CollectionGenerator>, seed: u64) -> Result<Self, GeneratorError> {
        if generators.is_empty() {
            return Err(GeneratorError::NoCollections);
        }
        Ok(Self {
            generators,
            rng: StdRng::seed_from_u64(seed),
            count: 0,
        })
    }

    pub fn generators(&self) -> &[CollectionGenerator] {
        &self.generators
    }
}

impl RecordGenerator for MultiRecordGenerator {
    fn next_record(&mut self) -> Result<Record, GeneratorError> {
        let index = if self.generators.len() == 1 {
            0
        } else {
            self.rng.random_range(0..self.generators.len())
        };
        let mut record = self.generators[index].next_record()?;
        self.count += 1;
        record.position = self.count.to_string();
        Ok(record)
    }
}
