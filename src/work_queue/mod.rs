use rayon::iter::{ParallelBridge, ParallelIterator};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::mpsc;
use std::thread::JoinHandle;

use thiserror::Error;

use crate::pipeline::{ArticleRecord, Document};

#[cfg(test)]
mod tests;

const QUEUE_SIZE: usize = 1024;

const K: usize = 1024;
const M: usize = 1024 * K;
const OUTPUT_BUFFER_SIZE: usize = 64 * M;

#[derive(Debug, Error)]
pub enum WorkQueueError {
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization Error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("The work queue has shut down")]
    Closed,
    #[error("A worker thread panicked")]
    ThreadPanicked,
}

/// Cleans documents on the rayon thread pool while a single thread writes the records out.
/// Records are written as one JSON array, in the order they finish, not the order queued.
pub struct WorkQueue {
    parser_sender: Option<mpsc::SyncSender<Document>>,
    parser_thread: JoinHandle<()>,
    writer_thread: JoinHandle<Result<usize, WorkQueueError>>,
}

impl WorkQueue {
    pub fn new<F>(output_file: String, text_processor: F) -> Self
    where
        F: Fn(Document) -> ArticleRecord + Sync + Send + 'static,
    {
        let (writer_sender, writer_receiver) = mpsc::sync_channel::<ArticleRecord>(QUEUE_SIZE);
        let (parser_sender, parser_receiver) = mpsc::sync_channel::<Document>(QUEUE_SIZE);

        // Start the writer thread
        let writer_thread = std::thread::spawn(move || file_writer(output_file, writer_receiver));

        // Iterate over the elements in the parser channel parallely, and run text_processor in a
        // thread pool. Send the result over to the writer thread.
        // If the writer is gone there's no point in going on; its error comes out of
        // wait_for_completion.
        let parser_thread = std::thread::spawn(move || {
            let _ = parser_receiver.into_iter().par_bridge().try_for_each_with(
                writer_sender,
                |writer_sender, document| writer_sender.send((text_processor)(document)),
            );
        });

        Self {
            parser_sender: Some(parser_sender),
            parser_thread,
            writer_thread,
        }
    }

    pub fn queue(&mut self, document: Document) -> Result<(), WorkQueueError> {
        let sender = self.parser_sender.as_ref().ok_or(WorkQueueError::Closed)?;
        sender.send(document).map_err(|_| WorkQueueError::Closed)
    }

    // Returns the number of records written
    pub fn wait_for_completion(mut self) -> Result<usize, WorkQueueError> {
        drop(self.parser_sender.take());
        self.parser_thread
            .join()
            .map_err(|_| WorkQueueError::ThreadPanicked)?;
        self.writer_thread
            .join()
            .map_err(|_| WorkQueueError::ThreadPanicked)?
    }
}

fn file_writer(
    output_file: String,
    rx: mpsc::Receiver<ArticleRecord>,
) -> Result<usize, WorkQueueError> {
    let output_file = File::create(output_file)?;
    let mut writer = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, output_file);

    let mut count = 0;
    writer.write_all(b"[")?;
    for record in rx {
        if count > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(b"\n")?;
        serde_json::to_writer_pretty(&mut writer, &record)?;
        count += 1;
    }
    writer.write_all(b"\n]\n")?;
    writer.flush()?;

    Ok(count)
}
