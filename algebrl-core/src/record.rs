//! Types and traits for recording and aggregating training metrics.
//!
//! * [`Record`] - a container of key-value pairs of various data types
//! * [`RecordValue`] - the types of values that can be stored
//! * [`Recorder`] and [`AggregateRecorder`] - interfaces for writing records
//! * [`RecordStorage`] - aggregation of stored records (min, max, mean, median)
//! * [`BufferedRecorder`] - keeps records in memory, useful for inspection
//! * [`LogRecorder`] - writes aggregated records to the log
//! * [`NullRecorder`] - discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use algebrl_core::record::{Record, RecordValue};
//!
//! let step = 1;
//! let reward = -1f32;
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(step as f32));
//! record.insert("reward", RecordValue::Scalar(reward));
//! record.insert("equation", RecordValue::String("3*x - 1 = 2*x + 11".to_string()));
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
