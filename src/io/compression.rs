//! Transparent compression for CSV sources and destinations.
//!
//! Codecs are picked from the file name first (`.gz`, `.zst`) and, for
//! readers only, from the leading magic bytes of the stream. Output files
//! produced by `split` and `shuffle` keep the source file name as their
//! suffix, so a compressed source yields compressed outputs with the same
//! codec. A source recognized only by its magic bytes keeps its codec too:
//! the detected codec travels with the dataset to every writer.
//!
//! | Codec | Extensions       | Feature            |
//! |-------|------------------|--------------------|
//! | gzip  | `.gz`, `.gzip`   | `compression-gzip` |
//! | zstd  | `.zst`, `.zstd`  | `compression-zstd` |
//!
//! With no codec feature enabled every path is treated as plain text.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A compression format understood by the readers and writers of this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    #[cfg(feature = "compression-gzip")]
    Gzip,
    #[cfg(feature = "compression-zstd")]
    Zstd,
}

impl Codec {
    /// Every codec compiled into this build.
    pub const ALL: &'static [Codec] = &[
        #[cfg(feature = "compression-gzip")]
        Codec::Gzip,
        #[cfg(feature = "compression-zstd")]
        Codec::Zstd,
    ];

    /// Human-readable codec name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => "gzip",
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => "zstd",
        }
    }

    /// Lowercase extensions, leading dot included.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => &[".gz", ".gzip"],
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => &[".zst", ".zstd"],
        }
    }

    const fn magic_bytes(self) -> &'static [u8] {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => &[0x1f, 0x8b],
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => &[0x28, 0xb5, 0x2f, 0xfd],
        }
    }

    /// Detect a codec from the path's extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Codec> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.extensions().iter().any(|ext| name.ends_with(ext)))
    }

    /// Detect a codec from the first bytes of a buffered stream without consuming them.
    fn from_magic<R: BufRead>(reader: &mut R) -> Option<Codec> {
        let buf = reader.fill_buf().ok()?;
        Self::ALL
            .iter()
            .copied()
            .find(|c| buf.starts_with(c.magic_bytes()))
    }

    fn wrap_reader(self, reader: Box<dyn Read>) -> std::io::Result<Box<dyn Read>> {
        match self {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => Ok(Box::new(flate2::read::MultiGzDecoder::new(reader))),
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => {
                zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as Box<dyn Read>)
            }
        }
    }
}

/// A destination stream, compressed or not, that must be finished explicitly.
///
/// Dropping an encoder finalizes it but swallows any error from writing the
/// trailing frame; [`CompressedWriter::finish`] reports it instead.
pub enum CompressedWriter<W: Write> {
    Plain(BufWriter<W>),
    #[cfg(feature = "compression-gzip")]
    Gzip(flate2::write::GzEncoder<BufWriter<W>>),
    #[cfg(feature = "compression-zstd")]
    Zstd(zstd::stream::write::Encoder<'static, BufWriter<W>>),
}

impl<W: Write> CompressedWriter<W> {
    /// Wrap `writer` with `codec`, or just a buffer when `codec` is `None`.
    ///
    /// # Errors
    /// Returns an error if the encoder cannot be initialized.
    pub fn new(writer: W, codec: Option<Codec>) -> std::io::Result<Self> {
        let buffered = BufWriter::new(writer);
        let Some(codec) = codec else {
            return Ok(Self::Plain(buffered));
        };
        match codec {
            #[cfg(feature = "compression-gzip")]
            Codec::Gzip => Ok(Self::Gzip(flate2::write::GzEncoder::new(
                buffered,
                flate2::Compression::default(),
            ))),
            #[cfg(feature = "compression-zstd")]
            Codec::Zstd => zstd::stream::write::Encoder::new(buffered, 3).map(Self::Zstd),
        }
    }

    /// Codec applied by this writer.
    #[must_use]
    pub fn codec(&self) -> Option<Codec> {
        match self {
            Self::Plain(_) => None,
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(_) => Some(Codec::Gzip),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(_) => Some(Codec::Zstd),
        }
    }

    /// Write the trailing frame (if any), flush the buffer and hand back the sink.
    ///
    /// # Errors
    /// Returns the first error hit while finalizing or flushing.
    pub fn finish(self) -> std::io::Result<W> {
        let buffered = match self {
            Self::Plain(w) => w,
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(enc) => enc.finish()?,
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(enc) => enc.finish()?,
        };
        buffered.into_inner().map_err(std::io::IntoInnerError::into_error)
    }
}

impl<W: Write> Write for CompressedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(w) => w.write(buf),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            #[cfg(feature = "compression-gzip")]
            Self::Gzip(w) => w.flush(),
            #[cfg(feature = "compression-zstd")]
            Self::Zstd(w) => w.flush(),
        }
    }
}

/// Wrap `reader` with decompression if `path_hint` or the stream's magic bytes call for it.
///
/// Also returns the codec that was applied, so a rewritten file can keep it.
///
/// # Errors
/// Returns an error if the decoder cannot be initialized.
pub fn detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<(Box<dyn Read>, Option<Codec>)> {
    let mut buf_reader = BufReader::new(reader);
    let codec = Codec::from_path(&path_hint).or_else(|| Codec::from_magic(&mut buf_reader));
    match codec {
        Some(codec) => codec
            .wrap_reader(Box::new(buf_reader))
            .map(|r| (r, Some(codec)))
            .with_context(|| format!("wrap reader with {} codec", codec.name())),
        None => Ok((Box::new(buf_reader), None)),
    }
}

/// Like [`detect_reader`], without reporting the codec.
///
/// # Errors
/// Returns an error if the decoder cannot be initialized.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<Box<dyn Read>> {
    detect_reader(reader, path_hint).map(|(r, _)| r)
}

/// Wrap `writer` with compression if `path_hint` ends with a codec extension.
///
/// The stream is complete only after [`CompressedWriter::finish`].
///
/// # Errors
/// Returns an error if the encoder cannot be initialized.
pub fn auto_detect_writer<W: Write>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> Result<CompressedWriter<W>> {
    let codec = Codec::from_path(&path_hint);
    CompressedWriter::new(writer, codec).with_context(|| {
        format!(
            "wrap writer with {} codec",
            codec.map_or("plain", Codec::name)
        )
    })
}
