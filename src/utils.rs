//! Utility functions.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;


//-----------------------------------------------------------------------------

/// Returns the full file name for a specific test file.
pub fn get_test_data(filename: &'static str) -> PathBuf {
    let mut buf = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    buf.push("test-data");
    buf.push(filename);
    buf
}

//-----------------------------------------------------------------------------

// Utilities for working with files.

/// Returns `true` if the file exists.
pub fn file_exists<P: AsRef<Path>>(filename: P) -> bool {
    fs::metadata(filename).is_ok()
}

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Returns `true` if the file appears to be gzip-compressed.
pub fn is_gzipped<P: AsRef<Path>>(filename: P) -> bool {
    let mut file = match File::open(filename) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut magic = [0; 2];
    file.read_exact(&mut magic).is_ok() && magic == GZIP_MAGIC
}

/// Returns a buffered reader for the file, which may be gzip-compressed.
pub fn open_file<P: AsRef<Path>>(filename: P) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(&filename)?;
    let inner = BufReader::new(file);
    if is_gzipped(&filename) {
        let inner = MultiGzDecoder::new(inner);
        Ok(Box::new(BufReader::new(inner)))
    } else {
        Ok(Box::new(inner))
    }
}

//-----------------------------------------------------------------------------

// Text output.

/// Appends the decimal representation of the integer to the buffer.
pub fn append_usize(buffer: &mut Vec<u8>, value: usize) {
    buffer.extend_from_slice(value.to_string().as_bytes());
}

/// Appends the strings to the buffer, separated by the given byte.
pub fn append_joined<T: AsRef<[u8]>>(buffer: &mut Vec<u8>, items: &[T], separator: u8) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buffer.push(separator);
        }
        buffer.extend_from_slice(item.as_ref());
    }
}

//-----------------------------------------------------------------------------
