use std::fmt;
use std::io::{self, Write};

use crate::line_mode::LineMode;

/// Writes diagnostics prefixed with the program name.
///
/// Every message becomes `<program>: <message>`, followed by a newline unless
/// the [`LineMode`] says otherwise.
///
/// ```
/// use logging::MessageSink;
///
/// let mut sink = MessageSink::new(Vec::new(), "oc-setfacl");
/// for message in ["first", "second"] {
///     sink.write(message)?;
/// }
/// assert_eq!(
///     sink.into_inner(),
///     b"oc-setfacl: first\noc-setfacl: second\n".to_vec()
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct MessageSink<W> {
    writer: W,
    program: String,
    line_mode: LineMode,
}

impl<W> MessageSink<W> {
    /// Creates a sink that appends a newline after each message.
    #[must_use]
    pub fn new(writer: W, program: impl Into<String>) -> Self {
        Self::with_line_mode(writer, program, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, program: impl Into<String>, line_mode: LineMode) -> Self {
        Self {
            writer,
            program: program.into(),
            line_mode,
        }
    }

    /// Program name used as prefix.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Current line mode.
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> MessageSink<W>
where
    W: Write,
{
    /// Writes one message using the sink's current [`LineMode`].
    pub fn write(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.write_with_mode(message, self.line_mode)
    }

    /// Writes one message with an explicit [`LineMode`] without changing the sink.
    pub fn write_with_mode(
        &mut self,
        message: impl fmt::Display,
        line_mode: LineMode,
    ) -> io::Result<()> {
        write!(self.writer, "{}: {message}", self.program)?;
        if line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }
}
