use log::{info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};

/// Where decoded or encoded data goes. A file output that is dropped without
/// `finish()` is deleted, so a failed run never leaves a half-written file behind.
pub struct DataOut {
    writer: Option<BufWriter<Box<dyn Write>>>,
    path: Option<String>,
    done: bool,
}

impl DataOut {
    /// Create `path` for writing. Refuses to replace an existing file unless `force` is set.
    pub fn create(path: &str, force: bool) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true);
        if force {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let file: File = options.open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                io::Error::new(
                    e.kind(),
                    format!("output file {} already exists (use --force to overwrite)", path),
                )
            } else {
                e
            }
        })?;
        info!("Writing output to {}", path);
        Ok(Self::with_writer(Box::new(file), Some(path.to_string())))
    }

    /// Write to standard out.
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()), None)
    }

    /// Throw the output away (integrity test mode).
    pub fn discard() -> Self {
        Self::with_writer(Box::new(io::sink()), None)
    }

    fn with_writer(writer: Box<dyn Write>, path: Option<String>) -> Self {
        Self {
            writer: Some(BufWriter::new(writer)),
            path,
            done: false,
        }
    }

    /// Flush everything and keep the output.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        self.done = true;
        Ok(())
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<Box<dyn Write>>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "output already closed"))
    }
}

impl Write for DataOut {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Drop for DataOut {
    fn drop(&mut self) {
        // Close the file before removing it.
        drop(self.writer.take());
        if !self.done {
            if let Some(path) = &self.path {
                warn!("Removing incomplete output file {}", path);
                if let Err(e) = fs::remove_file(path) {
                    warn!("Could not remove {}: {}", path, e);
                }
            }
        }
    }
}
