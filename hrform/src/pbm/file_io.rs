//! Reading and writing bitmap matrices by path

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use hrform_core::{CrsMatrix, PbmHeader};
use tracing::info;

use super::decode::read_header;
use super::encode::write_matrix;
use crate::error::{DecodeResult, EncodeResult};

/// File handle for bitmap matrices
#[derive(Debug, Clone)]
pub struct PbmFile {
    pub header: PbmHeader,
    pub path: PathBuf,
}

impl PbmFile {
    /// Open an existing file, reading only its header
    pub fn open<P: AsRef<Path>>(path: P) -> DecodeResult<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let mut reader = BufReader::new(File::open(&path_buf)?);
        let header = read_header(&mut reader)?;
        Ok(Self {
            header,
            path: path_buf,
        })
    }

    /// Read the full matrix this handle points to
    pub fn read_matrix(&self) -> DecodeResult<CrsMatrix> {
        Self::load(&self.path)
    }

    /// Read a matrix from `path`
    ///
    /// With the `mmap` feature the file is memory mapped and its length is
    /// checked against the header before decoding.
    pub fn load<P: AsRef<Path>>(path: P) -> DecodeResult<CrsMatrix> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading matrix");
        #[cfg(feature = "mmap")]
        {
            load_mapped(path)
        }
        #[cfg(not(feature = "mmap"))]
        {
            super::decode::read_matrix(BufReader::new(File::open(path)?))
        }
    }

    /// Write `matrix` in logical order to `path`, replacing any existing file
    pub fn save<P: AsRef<Path>>(path: P, matrix: &CrsMatrix) -> EncodeResult<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        write_matrix(writer, matrix)?;
        info!(
            path = %path.display(),
            dimension = matrix.dimension(),
            nnz = matrix.nnz(),
            "wrote matrix"
        );
        Ok(())
    }
}

#[cfg(feature = "mmap")]
fn load_mapped(path: &Path) -> DecodeResult<CrsMatrix> {
    use memmap2::Mmap;

    let file = File::open(path)?;
    // Zero-length files cannot be mapped on every platform
    if file.metadata()?.len() == 0 {
        return Err(hrform_core::HrError::MissingMagic.into());
    }

    // SAFETY: read-only mapping, dropped before this function returns
    let mmap = unsafe { Mmap::map(&file)? };
    super::decode::decode_slice(&mmap).map(|(_, matrix)| matrix)
}
