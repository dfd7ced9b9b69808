//! Encoder and decoder for the sparsedim file format

use sparsedim_core::{CsrSlice, Element, Error, Result, Shape, SparseMatrix, SparseNd};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Out-of-band outcome of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum LoadStatus {
    Ok = 0,
    /// The file could not be opened.
    OpenFailed = 1,
    /// The stream ended early or failed mid-read.
    BadStream = 2,
}

impl LoadStatus {
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    #[inline]
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Result of a load: the array plus the I/O status.
///
/// When `status` is not [`LoadStatus::Ok`], `array` is a placeholder whose
/// dimensions are all 1 and whose default is zero; check `status` first.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<A> {
    pub array: A,
    pub status: LoadStatus,
}

impl<A> Loaded<A> {
    /// The array if the load succeeded.
    #[must_use]
    pub fn ok(self) -> Option<A> {
        self.status.is_ok().then_some(self.array)
    }
}

enum DecodeError {
    Stream(io::Error),
    Contract(Error),
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> Self {
        Self::Stream(e)
    }
}

impl From<Error> for DecodeError {
    fn from(e: Error) -> Self {
        Self::Contract(e)
    }
}

fn to_i32(x: usize, what: &str) -> io::Result<i32> {
    i32::try_from(x).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{what} {x} does not fit the 32-bit file format"),
        )
    })
}

fn write_i32<W: Write>(w: &mut W, x: i32) -> io::Result<()> {
    w.write_all(&x.to_le_bytes())
}

fn write_elem<T: Element, W: Write>(w: &mut W, v: T) -> io::Result<()> {
    if cfg!(target_endian = "little") {
        w.write_all(bytemuck::bytes_of(&v))
    } else {
        let mut bytes = bytemuck::bytes_of(&v).to_vec();
        bytes.reverse();
        w.write_all(&bytes)
    }
}

fn write_index_section<W: Write>(w: &mut W, parts: &[&[usize]], what: &str) -> io::Result<()> {
    write_i32(w, to_i32(parts.len(), "slice count")?)?;
    for inner in parts {
        write_i32(w, to_i32(inner.len(), what)?)?;
        for &x in *inner {
            write_i32(w, to_i32(x, what)?)?;
        }
    }
    Ok(())
}

/// Encode `a` into `w`.
///
/// # Errors
/// I/O errors from `w`; `InvalidInput` if a size does not fit in an `i32`.
pub fn write_to<T: Element, W: Write>(a: &SparseNd<T>, w: &mut W) -> io::Result<()> {
    write_elem(w, a.default_value())?;
    write_i32(w, to_i32(a.ndim(), "dimension count")?)?;
    for &d in a.dims() {
        write_i32(w, to_i32(d, "dimension")?)?;
    }
    let indptr: Vec<&[usize]> = a.slices().iter().map(|s| s.indptr.as_slice()).collect();
    write_index_section(w, &indptr, "row pointer")?;
    let indices: Vec<&[usize]> = a.slices().iter().map(|s| s.indices.as_slice()).collect();
    write_index_section(w, &indices, "column index")?;

    write_i32(w, to_i32(a.slice_count(), "slice count")?)?;
    for s in a.slices() {
        write_i32(w, to_i32(s.nnz(), "value count")?)?;
        if cfg!(target_endian = "little") {
            w.write_all(bytemuck::cast_slice(&s.data))?;
        } else {
            for &v in &s.data {
                write_elem(w, v)?;
            }
        }
    }
    Ok(())
}

/// Write `a` to `path`, replacing any existing file.
///
/// # Errors
/// Any I/O error while creating or writing the file.
pub fn dump<T: Element>(a: &SparseNd<T>, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    write_to(a, &mut w)?;
    w.flush()?;
    a.span().in_scope(|| {
        tracing::debug!(path = %path.display(), shape = %a.shape(), nnz = a.nnz(), "dumped sparse array");
    });
    Ok(())
}

/// [`dump`] for the 2D wrapper.
///
/// # Errors
/// See [`dump`].
pub fn dump_matrix<T: Element>(m: &SparseMatrix<T>, path: impl AsRef<Path>) -> io::Result<()> {
    dump(m.as_nd(), path)
}

fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_elem<T: Element, R: Read>(r: &mut R) -> io::Result<T> {
    let mut buf = vec![0u8; std::mem::size_of::<T>()];
    r.read_exact(&mut buf)?;
    if cfg!(target_endian = "big") {
        buf.reverse();
    }
    Ok(bytemuck::pod_read_unaligned(&buf))
}

fn read_count<R: Read>(r: &mut R, what: &str) -> std::result::Result<usize, DecodeError> {
    let n = read_i32(r)?;
    usize::try_from(n)
        .map_err(|_| DecodeError::Contract(Error::InvalidState(format!("negative {what} {n}"))))
}

/// Reads a `VecOfVec`, element by element so a corrupt length cannot force a
/// huge allocation before the stream runs dry.
fn read_sections<X, R: Read>(
    r: &mut R,
    mut read_one: impl FnMut(&mut R) -> std::result::Result<X, DecodeError>,
) -> std::result::Result<Vec<Vec<X>>, DecodeError> {
    let outer = read_count(r, "section count")?;
    let mut out = Vec::new();
    for _ in 0..outer {
        let inner = read_count(r, "section length")?;
        let mut v = Vec::new();
        for _ in 0..inner {
            v.push(read_one(&mut *r)?);
        }
        out.push(v);
    }
    Ok(out)
}

fn decode<T: Element, R: Read>(r: &mut R, ndim: usize) -> std::result::Result<SparseNd<T>, DecodeError> {
    let default: T = read_elem(r)?;
    let count = read_i32(r)?;
    if usize::try_from(count).ok() != Some(ndim) {
        return Err(Error::InvalidDimensions(format!(
            "file holds {count} dimensions, expected {ndim}"
        ))
        .into());
    }
    let mut dims = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        let d = read_i32(r)?;
        let d = usize::try_from(d)
            .map_err(|_| Error::InvalidDimensions(format!("negative dimension {d}")))?;
        dims.push(d);
    }
    let shape = Shape::new(dims)?;

    let read_index = |r: &mut R| -> std::result::Result<usize, DecodeError> { read_count(r, "index") };
    let indptr = read_sections(r, read_index)?;
    let indices = read_sections(r, read_index)?;
    let data = read_sections(r, |r: &mut R| Ok(read_elem::<T, R>(r)?))?;
    if indptr.len() != indices.len() || indices.len() != data.len() {
        return Err(Error::InvalidState(format!(
            "section counts differ: {} row pointer, {} column index, {} value",
            indptr.len(),
            indices.len(),
            data.len()
        ))
        .into());
    }
    let slices = indptr
        .into_iter()
        .zip(indices)
        .zip(data)
        .map(|((p, i), d)| CsrSlice::from_parts_unchecked(p, i, d))
        .collect();
    Ok(SparseNd::from_parts(shape, default, slices, true)?)
}

fn placeholder<T: Element>(ndim: usize, status: LoadStatus) -> Result<Loaded<SparseNd<T>>> {
    Ok(Loaded {
        array: SparseNd::from_shape(Shape::ones(ndim)?, T::zero()),
        status,
    })
}

/// Decode an `ndim`-dimensional array from `r`.
///
/// A stream that fails or ends early yields [`LoadStatus::BadStream`] and a
/// placeholder array.
///
/// # Errors
/// `InvalidDimensions` if `ndim < 2`, if the stored dimension count differs
/// from `ndim`, or if a stored dimension is not positive; `InvalidState` if
/// the sections violate the CSR invariants.
pub fn read_from<T: Element, R: Read>(r: &mut R, ndim: usize) -> Result<Loaded<SparseNd<T>>> {
    Shape::ones(ndim)?;
    match decode(r, ndim) {
        Ok(array) => Ok(Loaded {
            array,
            status: LoadStatus::Ok,
        }),
        Err(DecodeError::Contract(e)) => Err(e),
        Err(DecodeError::Stream(e)) => {
            tracing::warn!(error = %e, "sparse array stream ended early");
            placeholder(ndim, LoadStatus::BadStream)
        }
    }
}

/// Load an `ndim`-dimensional array from `path`.
///
/// # Errors
/// See [`read_from`]; failing to open the file is reported as
/// [`LoadStatus::OpenFailed`], not as an error.
pub fn load<T: Element>(path: impl AsRef<Path>, ndim: usize) -> Result<Loaded<SparseNd<T>>> {
    let path = path.as_ref();
    Shape::ones(ndim)?;
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open sparse array file");
            return placeholder(ndim, LoadStatus::OpenFailed);
        }
    };
    let loaded = read_from(&mut BufReader::new(file), ndim)?;
    if loaded.status.is_ok() {
        tracing::debug!(
            path = %path.display(),
            shape = %loaded.array.shape(),
            nnz = loaded.array.nnz(),
            "loaded sparse array"
        );
    }
    Ok(loaded)
}

/// [`load`] for the 2D wrapper.
///
/// # Errors
/// See [`load`].
pub fn load_matrix<T: Element>(path: impl AsRef<Path>) -> Result<Loaded<SparseMatrix<T>>> {
    let Loaded { array, status } = load(path, 2)?;
    Ok(Loaded {
        array: SparseMatrix::try_from(array)?,
        status,
    })
}
