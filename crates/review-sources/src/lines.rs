use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Split};
use std::path::Path;

/// Decode `bytes` as UTF-8, dropping invalid sequences rather than
/// substituting a replacement character.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Line iterator that never fails on invalid UTF-8: bad byte sequences are
/// dropped. A trailing `\r` is dropped too.
pub struct LossyLines<R> {
    inner: Split<R>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: reader.split(b'\n'),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|line| {
            line.map(|bytes| {
                let mut text = decode_ignoring_invalid(&bytes);
                if text.ends_with('\r') {
                    text.pop();
                }
                text
            })
        })
    }
}

/// Open `path` for lossy line-by-line reading.
pub fn open_lossy_lines<P: AsRef<Path>>(path: P) -> Result<LossyLines<BufReader<File>>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(LossyLines::new(BufReader::new(file)))
}

/// Read the whole of `path` as text, dropping invalid UTF-8.
pub fn read_lossy_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(decode_ignoring_invalid(&bytes))
}
