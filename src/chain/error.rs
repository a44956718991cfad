/// Errors that can occur while driving a shift-register chain.
///
/// `E` is the error type of the [`LineDriver`](crate::chain::LineDriver)
/// the chain was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError<E> {
    /// The chain was declared with zero chips.
    EmptyChain,
    /// A full-chain write was given the wrong number of bytes.
    InvalidLength { expected: usize, actual: usize },
    /// Pin index is not below `chips * 8`.
    OutOfRange { pin: usize, pins: usize },
    /// The requested control line is not wired.
    NotConnected,
    /// The line collaborator failed to configure or drive a line.
    Line(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for ChainError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChainError::EmptyChain => write!(f, "chain must contain at least one chip"),
            ChainError::InvalidLength { expected, actual } => {
                write!(f, "expected {} bytes, got {}", expected, actual)
            }
            ChainError::OutOfRange { pin, pins } => {
                write!(f, "pin {} out of range for {} outputs", pin, pins)
            }
            ChainError::NotConnected => write!(f, "control line is not connected"),
            ChainError::Line(e) => write!(f, "line driver failed: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    struct Buf {
        bytes: [u8; 64],
        len: usize,
    }

    impl Write for Buf {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let end = self.len + s.len();
            if end > self.bytes.len() {
                return Err(core::fmt::Error);
            }
            self.bytes[self.len..end].copy_from_slice(s.as_bytes());
            self.len = end;
            Ok(())
        }
    }

    impl Buf {
        fn written(&self) -> &[u8] {
            &self.bytes[..self.len]
        }
    }

    fn render(err: ChainError<u8>) -> Buf {
        let mut buf = Buf {
            bytes: [0; 64],
            len: 0,
        };
        write!(buf, "{}", err).unwrap();
        buf
    }

    #[test]
    fn display_includes_details() {
        let buf = render(ChainError::OutOfRange { pin: 24, pins: 24 });
        assert_eq!(buf.written(), b"pin 24 out of range for 24 outputs");

        let buf = render(ChainError::InvalidLength {
            expected: 3,
            actual: 2,
        });
        assert_eq!(buf.written(), b"expected 3 bytes, got 2");

        let buf = render(ChainError::Line(7));
        assert_eq!(buf.written(), b"line driver failed: 7");
    }
}
