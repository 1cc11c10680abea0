use crate::config::Config;
use crate::error::Result;
use crate::skein::Skein256;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Name used for standard input in checksum lines
pub const STDIN_NAME: &str = "-";

const READ_CHUNK: usize = 64 * 1024;

/// Options for the sum command
#[derive(Debug, Clone)]
pub struct SumOptions {
    /// Digest size in bytes
    pub size: usize,
    pub config: Config,
}

impl Default for SumOptions {
    fn default() -> Self {
        Self {
            size: 32,
            config: Config::default(),
        }
    }
}

/// Hash everything `reader` yields
pub fn digest_reader<R: Read>(mut reader: R, options: &SumOptions) -> Result<Vec<u8>> {
    let mut hasher = Skein256::with_config(options.size, &options.config)?;
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.write(&buf[..n]);
    }
    Ok(hasher.finalize())
}

/// Hash a file, or standard input when `path` is `-`
pub fn digest_file(path: &Path, options: &SumOptions) -> Result<Vec<u8>> {
    if path.as_os_str() == STDIN_NAME {
        digest_reader(io::stdin().lock(), options)
    } else {
        digest_reader(File::open(path)?, options)
    }
}

/// Format one checksum line: `<hex>  <name>`
pub fn format_line(digest: &[u8], name: &str) -> String {
    format!("{}  {}", hex::encode(digest), name)
}

/// Hash each input and return one checksum line per input
pub fn sum_files(paths: &[&Path], options: &SumOptions) -> Result<String> {
    let mut output = String::new();
    for path in paths {
        let digest = digest_file(path, options)?;
        output.push_str(&format_line(&digest, &path.display().to_string()));
        output.push('\n');
    }
    Ok(output)
}
