use std::time::{Duration, Instant};

use log::{debug, error, info};
use uuid::Uuid;

use crate::BatchError;

use super::{
    build_name,
    item::{ItemReader, ItemWriter},
};

/// Outcome of a step run.
#[derive(Debug)]
pub struct StepExecution {
    /// Unique identifier for this step run
    pub id: Uuid,
    /// Human-readable name for the step
    pub name: String,
    /// Wall-clock time spent reading and writing
    pub duration: Duration,
    /// Number of items successfully read
    pub read_count: usize,
    /// Number of items successfully written
    pub write_count: usize,
}

/// Reads every item from its reader, then hands them to its writer in one
/// write.
///
/// Nothing reaches the writer's `write` until the reader is exhausted, so a
/// read failure aborts the step before any item is written.
pub struct Step<'a, T> {
    id: Uuid,
    name: String,
    reader: &'a dyn ItemReader<T>,
    writer: &'a dyn ItemWriter<T>,
}

impl<T> Step<'_, T> {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Runs the step.
    ///
    /// # Returns
    /// - `Ok(StepExecution)` when every item was read and written
    /// - `Err(BatchError)` on the first read or write failure
    pub fn execute(&self) -> Result<StepExecution, BatchError> {
        let start_time = Instant::now();

        info!("Start of step: {}, id: {}", self.name, self.id);

        let items = self.read_all().inspect_err(|err| {
            error!("Error occurred during read item: {}", err);
        })?;
        let read_count = items.len();

        self.write_all(&items).inspect_err(|err| {
            error!("ItemWriter error: {}", err);
        })?;

        info!("End of step: {}, id: {}", self.name, self.id);

        Ok(StepExecution {
            id: self.id,
            name: self.name.clone(),
            duration: start_time.elapsed(),
            read_count,
            write_count: items.len(),
        })
    }

    fn read_all(&self) -> Result<Vec<T>, BatchError> {
        debug!("Start reading items");
        let mut items = Vec::new();

        while let Some(item) = self.reader.read()? {
            items.push(item);
        }

        debug!("End reading items: {} read", items.len());
        Ok(items)
    }

    fn write_all(&self, items: &[T]) -> Result<(), BatchError> {
        debug!("Start writing {} items", items.len());

        self.writer.open()?;
        self.writer.write(items)?;
        self.writer.flush()?;
        self.writer.close()?;

        debug!("End writing items");
        Ok(())
    }
}

/// Builder for a [`Step`].
///
/// The reader and writer are required up front; the name is generated
/// randomly when not set.
pub struct StepBuilder<'a, T> {
    name: Option<String>,
    reader: &'a dyn ItemReader<T>,
    writer: &'a dyn ItemWriter<T>,
}

impl<'a, T> StepBuilder<'a, T> {
    pub fn new(reader: &'a impl ItemReader<T>, writer: &'a impl ItemWriter<T>) -> Self {
        Self {
            name: None,
            reader,
            writer,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(self) -> Step<'a, T> {
        Step {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            reader: self.reader,
            writer: self.writer,
        }
    }
}
