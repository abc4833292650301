use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::api::{ConversionError, FlagValue};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The path of a pid file, created and removed by the caller outside of parsing.
///
/// ### Example
/// ```
/// # use flagtag_builder as flagtag;
/// use flagtag::{ext::PidFile, FlagValue};
///
/// let directory = tempfile::tempdir().unwrap();
/// let path = directory.path().join("app.pid");
/// let mut pid_file = PidFile::default();
/// pid_file.set(path.to_str().unwrap()).unwrap();
///
/// {
///     let _guard = pid_file.create().unwrap();
///     assert_eq!(
///         std::fs::read_to_string(&path).unwrap(),
///         std::process::id().to_string()
///     );
///     // A second instance is refused while the first holds the file.
///     assert!(pid_file.create().is_err());
/// }
///
/// assert!(!path.exists());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// The configured path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current process id to the path, refusing to overwrite an existing file.
    ///
    /// The returned guard removes the file when dropped.
    pub fn create(&self) -> io::Result<PidFileGuard> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;
        write!(file, "{}", std::process::id())?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Created pid file {}.", self.path.display());
        }

        Ok(PidFileGuard {
            path: Some(self.path.clone()),
        })
    }

    /// Remove the file at the path.
    pub fn remove(&self) -> io::Result<()> {
        fs::remove_file(&self.path)
    }
}

impl FlagValue for PidFile {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        if raw.is_empty() {
            return Err(ConversionError::invalid::<PidFile>(raw));
        }

        self.path = PathBuf::from(raw);
        Ok(())
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }
}

/// Removes the pid file on drop, unless [`PidFileGuard::keep`] is called.
#[derive(Debug)]
pub struct PidFileGuard {
    path: Option<PathBuf>,
}

impl PidFileGuard {
    /// Leave the file in place.
    pub fn keep(mut self) {
        self.path.take();
    }
}

impl Drop for PidFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            // Nothing to report to at this point.
            let _ = fs::remove_file(path);
        }
    }
}
