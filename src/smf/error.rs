//! Errors produced while encoding and exporting a Standard MIDI File.

use thiserror::Error;

/// Caller bugs detected before any byte reaches the sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    /// A variable-length quantity can carry at most 28 bits.
    #[error("value {0} does not fit in a 4-byte variable-length quantity")]
    VlqOutOfRange(u64),

    /// Tempo of zero beats per minute.
    #[error("tempo must be at least 1 BPM")]
    ZeroTempo,

    /// Tempo too slow for the 3-byte microseconds-per-quarter payload.
    #[error("tempo of {0} BPM does not fit in a 24-bit tempo payload")]
    TempoOutOfRange(u32),

    /// Division of zero or with the SMPTE bit set.
    #[error("division {0} is not a valid ticks-per-quarter-note value")]
    InvalidDivision(u16),

    /// An event earlier than the running track clock under the strict policy.
    #[error("event at tick {time} arrives after tick {clock} was already emitted")]
    OutOfOrder { time: u32, clock: u32 },

    /// Chunk bodies are framed with a 32-bit length.
    #[error("chunk body of {0} bytes exceeds the 32-bit length field")]
    ChunkTooLong(usize),
}

/// Failure of one export invocation.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export; the sink was not touched.
    #[error("nothing to export: the score has no sheets")]
    NoContent,

    /// Invalid input; the sink was not touched.
    #[error("invalid export input: {0}")]
    Precondition(#[from] PreconditionError),

    /// The sink failed. Partial output may already have been written.
    #[error("failed to write MIDI data: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// True if bytes may already have reached the sink.
    pub fn may_have_partial_output(&self) -> bool {
        matches!(self, ExportError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_output_only_for_io() {
        assert!(!ExportError::NoContent.may_have_partial_output());
        assert!(!ExportError::from(PreconditionError::ZeroTempo).may_have_partial_output());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(ExportError::from(io).may_have_partial_output());
    }

    #[test]
    fn test_messages() {
        let err = PreconditionError::OutOfOrder { time: 50, clock: 100 };
        assert_eq!(
            err.to_string(),
            "event at tick 50 arrives after tick 100 was already emitted"
        );
    }
}
