use std::io;
use thiserror::Error;

/// Errors that stop the simulator before or during the frame loop
#[derive(Debug, Error)]
pub enum FireError {
    #[error("terminal too small: need at least {min_width}x{min_height}, got {width}x{height}")]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("terminal does not support colors (reports {colors})")]
    NoColorSupport { colors: u16 },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, FireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_message_names_both_sizes() {
        let err = FireError::TerminalTooSmall {
            width: 60,
            height: 20,
            min_width: 80,
            min_height: 25,
        };
        let msg = err.to_string();
        assert!(msg.contains("80x25"));
        assert!(msg.contains("60x20"));
    }

    #[test]
    fn io_errors_convert() {
        let err: FireError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, FireError::Io(_)));
    }
}
