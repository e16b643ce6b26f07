//! BMP writer: verbatim header passthrough plus 24-bit pixel data.
//!
//! Everything before the pixel data (file header, info header, any color
//! table) is copied byte-for-byte from the source. Header fields are never
//! recomputed; the pixel payload keeps its exact size.

use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use super::header::FileHeader;
use crate::error::BmpError;
use crate::pixel::{BYTES_PER_PIXEL, Pixel, to_bgr};

/// Write `buf` to `writer`, stopping early when the writer accepts no more
/// bytes or fails. Returns the number of bytes accepted along with the
/// error, if any, so a partial count survives a failing writer.
fn write_full<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> (usize, io::Result<()>) {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return (written, Err(e)),
        }
    }
    (written, Ok(()))
}

/// Copy the source's header region and then `pixels` to `out`.
///
/// The header is flushed before any pixel is written, so a buffered writer
/// that fails on its way to storage still reports `CopyMismatch` for the
/// header and `ShortWrite` for the pixels. A failure in the final flush is
/// charged to the last pixel.
pub fn write_to<R, W>(
    source: &mut R,
    header: &FileHeader,
    pixels: &[Pixel],
    out: &mut W,
) -> Result<(), BmpError>
where
    R: Read + Seek,
    W: Write + ?Sized,
{
    let expected = header.data_offset as usize;

    source.seek(SeekFrom::Start(0))?;
    let mut buf = Vec::new();
    let read = source.by_ref().take(expected as u64).read_to_end(&mut buf)?;
    if read != expected {
        return Err(BmpError::CopyMismatch {
            expected,
            read,
            written: 0,
        });
    }
    let (written, status) = write_full(out, &buf);
    if let Err(e) = status.and_then(|()| out.flush()) {
        debug!("header write failed after {written} bytes: {e}");
        return Err(BmpError::CopyMismatch {
            expected,
            read,
            written,
        });
    }
    if written != read {
        return Err(BmpError::CopyMismatch {
            expected,
            read,
            written,
        });
    }
    debug!("copied {written} header bytes");

    for (index, &px) in pixels.iter().enumerate() {
        match write_full(out, &to_bgr(px)) {
            (_, Err(source)) => return Err(BmpError::ShortWrite { index, source }),
            (BYTES_PER_PIXEL, Ok(())) => {}
            (n, Ok(())) => {
                return Err(BmpError::ShortWrite {
                    index,
                    source: io::Error::new(
                        io::ErrorKind::WriteZero,
                        format!("accepted {n} of {BYTES_PER_PIXEL} bytes"),
                    ),
                });
            }
        }
    }
    out.flush().map_err(|source| BmpError::ShortWrite {
        index: pixels.len().saturating_sub(1),
        source,
    })?;
    debug!("wrote {} pixels", pixels.len());

    Ok(())
}

/// Create `output` and write the image to it.
pub fn write_image<R: Read + Seek>(
    source: &mut R,
    header: &FileHeader,
    pixels: &[Pixel],
    output: &Path,
) -> Result<(), BmpError> {
    let file = File::create(output).map_err(|source| BmpError::Open {
        path: output.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    write_to(source, header, pixels, &mut out)
}
