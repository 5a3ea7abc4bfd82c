//! Utilities for input/output.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Output path that is written to through a temporary file, which replaces
/// the target only once writing has completed.
#[derive(Clone, Debug)]
pub struct AtomicOutputPath {
    target_path: PathBuf,
    temporary_path: PathBuf,
}

impl AtomicOutputPath {
    /// Sets up a temporary path next to the given target path.
    pub fn new<P: AsRef<Path>>(target_path: P) -> io::Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();
        let file_name = target_path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Output path {} has no file name", target_path.display()),
            )
        })?;
        let mut temporary_file_name = std::ffi::OsString::from(".");
        temporary_file_name.push(file_name);
        temporary_file_name.push(".tmp");
        let temporary_path = target_path.with_file_name(temporary_file_name);
        Ok(Self {
            target_path,
            temporary_path,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn temporary_path(&self) -> &Path {
        &self.temporary_path
    }

    /// Checks that the target may be written, which requires that it does not
    /// exist unless overwriting was requested.
    pub fn check_write_allowed(&self, automatic_overwrite: bool) -> io::Result<()> {
        if self.target_path.exists() && !automatic_overwrite {
            Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "{} already exists (use --overwrite to replace it)",
                    self.target_path.display()
                ),
            ))
        } else {
            Ok(())
        }
    }

    /// Moves the temporary file to the target path.
    pub fn perform_replace(&self) -> io::Result<()> {
        fs::rename(&self.temporary_path, &self.target_path)
    }

    /// Writes the temporary file with the given function and moves it to the
    /// target path. A partially written temporary file is removed on failure.
    pub fn write_and_replace<W>(&self, write: W) -> io::Result<()>
    where
        W: FnOnce(&Path) -> io::Result<()>,
    {
        if let Err(err) = write(&self.temporary_path) {
            if self.temporary_path.exists() {
                // The write error is the one worth reporting
                let _ = fs::remove_file(&self.temporary_path);
            }
            return Err(err);
        }
        self.perform_replace()
    }
}

/// Returns the absolute version of the given path, resolved against the
/// current directory if relative.
pub fn absolute_path<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
