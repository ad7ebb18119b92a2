//! Log output that does not tear progress bars

use indicatif::MultiProgress;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

/// stderr writer that hides the progress bars while a log line is written
///
/// Pass it to `tracing_subscriber::fmt().with_writer(..)` together with the
/// same `MultiProgress` the run draws its bars on.
#[derive(Clone)]
pub struct ProgressLogWriter {
    multi: MultiProgress,
}

impl ProgressLogWriter {
    pub fn new(multi: MultiProgress) -> Self {
        Self { multi }
    }
}

impl Write for ProgressLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressLogWriter {
    type Writer = ProgressLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_writes_pass_through_hidden_progress() {
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let mut writer = ProgressLogWriter::new(multi).make_writer();

        assert_eq!(writer.write(b"log line\n").expect("write"), 9);
        writer.flush().expect("flush");
    }
}
