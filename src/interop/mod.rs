//! Interchange with Arrow columnar data

mod record_batch;

pub use record_batch::{
    frame_to_record_batch, record_batch_to_frame, CLASS_METADATA_KEY, ROW_NAMES_METADATA_KEY,
};
