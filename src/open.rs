use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
};

use crate::arg::FileOptions;

/// Opens the path given to a file argument.
///
/// The parser calls this once per matched file argument and reports a failure
/// as [`Error::FileOpen`](crate::Error::FileOpen). Nothing is retried, and
/// files already opened stay open if parsing fails later on.
pub trait Open {
    fn open(&self, path: &Path, options: &FileOptions) -> io::Result<File>;
}

/// Opens files through [`std::fs::OpenOptions`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Fs;

impl Open for Fs {
    fn open(&self, path: &Path, options: &FileOptions) -> io::Result<File> {
        let mut oo = OpenOptions::new();
        oo.read(options.read)
            .write(options.write)
            .append(options.append)
            .truncate(options.truncate)
            .create(options.create)
            .create_new(options.create_new);
        #[cfg(unix)]
        if let Some(mode) = options.mode {
            use std::os::unix::fs::OpenOptionsExt;
            oo.mode(mode);
        }
        oo.open(path)
    }
}

impl<F> Open for F
where
    F: Fn(&Path, &FileOptions) -> io::Result<File>,
{
    fn open(&self, path: &Path, options: &FileOptions) -> io::Result<File> {
        self(path, options)
    }
}
