//! Concurrent detect pipeline.
//!
//! The calling thread reads records and submits each one to a fixed-size
//! worker pool as soon as it is parsed. Tasks report one [`Outcome`] each to a
//! collector thread over a bounded channel; once the input is exhausted the
//! reader announces how many records it dispatched and waits for the
//! collector to account for all of them. If the collector stops early on an
//! error, the next task to report finds the channel closed and the reader
//! stops submitting.

pub mod budget;
pub mod collector;

pub use budget::InFlightBudget;
pub use collector::{collect, Collector, DetectSummary, Message, Outcome};

use std::io::{BufRead, Write};
use std::sync::mpsc::{sync_channel, SyncSender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use workerpool::thunk::{Thunk, ThunkWorker};
use workerpool::Pool;

use crate::classify::{ScriptClassifier, ScriptSet};
use crate::config::{DetectConfig, Emit};
use crate::error::{Error, Result};
use crate::record::{text_body, Record, RecordReader};

/// Classify one record into the outcome the collector expects.
///
/// With a seed the draw is reproducible per record; otherwise the thread-local
/// generator is used.
pub fn classify_record(
    record: &Record,
    classifier: &ScriptClassifier,
    emit: Emit,
    seed: Option<u64>,
) -> Outcome {
    let Some(text) = text_body(record) else {
        return Outcome::Skipped;
    };

    let result = match seed {
        Some(seed) => classifier.classify(&text, &mut StdRng::seed_from_u64(seed)),
        None => classifier.classify(&text, &mut rand::rng()),
    };

    match result {
        Ok(c) if c.is_match() => Outcome::Match(match emit {
            Emit::Id => record.id.clone(),
            Emit::Body => text,
        }),
        Ok(_) => Outcome::NoMatch,
        Err(e) => Outcome::Failed(e),
    }
}

/// Run the detect pass over `input`, writing matches to `out`.
///
/// Returns the writer once every dispatched record has been accounted for.
pub fn run_detect<R, W>(
    input: R,
    script: Arc<ScriptSet>,
    config: &DetectConfig,
    out: W,
) -> Result<(W, DetectSummary)>
where
    R: BufRead,
    W: Write + Send + 'static,
{
    let classifier = Arc::new(ScriptClassifier::new(script, config.classifier.clone()));
    let (tx, rx) = sync_channel::<Message>(config.result_buffer.max(1));
    let emit = config.emit;

    let collector = thread::Builder::new()
        .name("warcscan-collector".to_string())
        .spawn(move || collect(&rx, out, emit))?;

    let pool = Pool::<ThunkWorker<()>>::new(config.workers.max(1));
    let budget = InFlightBudget::new(config.max_in_flight.max(1));
    info!(
        "Detecting with {} workers ({} records in flight), threshold {}, sample size {}, {:?} sampling",
        config.workers.max(1),
        budget.total(),
        config.classifier.threshold,
        config.classifier.sample_size,
        config.classifier.sampling
    );

    let records = RecordReader::with_config(input, config.reader.clone());
    let dispatched = dispatch(records, &pool, &budget, &classifier, &tx, config);

    if let Ok(total) = dispatched {
        // A closed channel means the collector already stopped on an error,
        // which the join below reports.
        let _ = tx.send(Message::Total(total));
    }
    pool.join();
    drop(tx);

    let collected = collector.join().map_err(|_| Error::WorkerLost)?;
    let total = dispatched?;
    let (out, summary) = collected?;
    debug!("Dispatched {total} records");
    info!(
        "Classified {} records: {} matches, {} skipped",
        summary.records, summary.matches, summary.skipped
    );
    Ok((out, summary))
}

/// Submit records to the pool until the input ends or the collector hangs
/// up, returning how many were submitted.
fn dispatch<R: BufRead>(
    mut records: RecordReader<R>,
    pool: &Pool<ThunkWorker<()>>,
    budget: &Arc<InFlightBudget>,
    classifier: &Arc<ScriptClassifier>,
    tx: &SyncSender<Message>,
    config: &DetectConfig,
) -> Result<usize> {
    let closed = Arc::new(AtomicBool::new(false));
    let mut dispatched = 0usize;
    for record in &mut records {
        let record = record?;
        let permit = budget.acquire();
        if closed.load(Ordering::Acquire) {
            debug!("Collector stopped, abandoning input after {dispatched} records");
            break;
        }
        let classifier = Arc::clone(classifier);
        let closed = Arc::clone(&closed);
        let tx = tx.clone();
        let emit = config.emit;
        let seed = config.seed.map(|s| s ^ dispatched as u64);

        pool.execute(Thunk::of(move || {
            let outcome = classify_record(&record, &classifier, emit, seed);
            if tx.send(Message::Outcome(outcome)).is_err() {
                closed.store(true, Ordering::Release);
            }
            drop(permit);
        }));
        dispatched += 1;
    }
    debug!(
        "Read {} records over {} lines",
        records.records_read(),
        records.line_no()
    );
    Ok(dispatched)
}
