//! Bitmap rendering and the pre-converted image cache
//!
//! Rendering a BMP directly costs a header decode, padding removal and a
//! byte swap of every pixel, on every render. [`ImageCache::build`] does
//! that work once and stores the result as a cache artifact, which later
//! renders stream to the panel unchanged.
//!
//! ## Artifact format
//!
//! ```text
//! offset  size        field
//! 0       2           width, u16 little-endian
//! 2       2           height, u16 little-endian
//! 4       w * h * 2   pixels, bottom row first, RGB565 big-endian
//! ```
//!
//! The artifact for `images/<name>` is `images/cache/<name>.cache`.
//! Artifacts are never checked against their source: after replacing a
//! source image, rebuild its artifact or [`clear_cache`](ImageCache::clear_cache).
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_tft::{CacheConfig, Color, Config, Display, ImageCache, Interface, StdStorage};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let interface = Interface::new(MockSpi, MockPin, MockPin);
//! let mut display = Display::new(interface, Config::default());
//! let storage = StdStorage::new("/sd");
//! let mut cache = match ImageCache::new(storage, CacheConfig::default()) {
//!     Ok(cache) => cache,
//!     Err(_) => return,
//! };
//!
//! let _ = cache.build("logo.bmp");
//! let _ = cache.render(&mut display, "logo.bmp", None, true, Some(Color::BLACK));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::bmp::{self, BmpHeader, HEADER_LEN};
use crate::color::Color;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::Display;
use crate::error::{Error, FormatError};
use crate::interface::DisplayInterface;
use crate::orientation::Orientation;
use crate::storage::{Storage, StorageFile};

/// File name suffix of cache artifacts
pub const CACHE_EXTENSION: &str = ".cache";

/// Size of the artifact header
pub const CACHE_HEADER_LEN: usize = 4;

/// Default directory holding source bitmaps
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Default directory holding cache artifacts
pub const DEFAULT_CACHE_DIR: &str = "images/cache";

/// Bytes read from storage per transfer
pub const CHUNK_BUFFER_LEN: usize = 512;

const SOURCE_EXTENSION: &str = ".bmp";

/// Where sources and artifacts live
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory of source bitmaps
    pub image_dir: String,
    /// Directory of cache artifacts
    pub cache_dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            image_dir: String::from(DEFAULT_IMAGE_DIR),
            cache_dir: String::from(DEFAULT_CACHE_DIR),
        }
    }
}

/// Errors from cache maintenance
#[derive(Debug)]
pub enum CacheError<SE> {
    /// Storage I/O failed
    Storage(SE),
    /// No file at this path
    NotFound(String),
    /// Source or artifact is malformed
    Format(FormatError),
}

impl<SE> From<FormatError> for CacheError<SE> {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

impl<SE> core::fmt::Display for CacheError<SE> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Storage(_) => write!(f, "Storage error"),
            Self::NotFound(path) => write!(f, "No such file: {path}"),
            Self::Format(err) => write!(f, "{err}"),
        }
    }
}

impl<SE: core::fmt::Debug> core::error::Error for CacheError<SE> {}

/// Errors from rendering an image
#[derive(Debug)]
pub enum ImageError<I: DisplayInterface, SE> {
    /// Talking to the display failed
    Display(Error<I>),
    /// Storage I/O failed
    Storage(SE),
    /// No source image at this path
    NotFound(String),
    /// Source or artifact is malformed
    Format(FormatError),
}

impl<I: DisplayInterface, SE> From<Error<I>> for ImageError<I, SE> {
    fn from(err: Error<I>) -> Self {
        Self::Display(err)
    }
}

impl<I: DisplayInterface, SE> From<CacheError<SE>> for ImageError<I, SE> {
    fn from(err: CacheError<SE>) -> Self {
        match err {
            CacheError::Storage(err) => Self::Storage(err),
            CacheError::NotFound(path) => Self::NotFound(path),
            CacheError::Format(err) => Self::Format(err),
        }
    }
}

impl<I: DisplayInterface, SE> core::fmt::Display for ImageError<I, SE> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(err) => write!(f, "{err}"),
            Self::Storage(_) => write!(f, "Storage error"),
            Self::NotFound(path) => write!(f, "No such image: {path}"),
            Self::Format(err) => write!(f, "{err}"),
        }
    }
}

impl<I, SE> core::error::Error for ImageError<I, SE>
where
    I: DisplayInterface + core::fmt::Debug,
    SE: core::fmt::Debug,
{
}

type CacheResult<T, S> = Result<T, CacheError<<S as Storage>::Error>>;

/// Pixel rows of a validated source, compacted and in device order
struct RowReader<F> {
    file: F,
    header: BmpHeader,
    rows_left: u16,
}

impl<F: StorageFile> RowReader<F> {
    fn open(mut file: F) -> Result<Self, CacheError<F::Error>> {
        let mut raw = [0u8; HEADER_LEN];
        let read = file.read_fill(&mut raw).map_err(CacheError::Storage)?;
        let header = BmpHeader::parse(&raw[..read])?;

        let found = file.len().map_err(CacheError::Storage)?;
        if found < header.file_len() {
            return Err(FormatError::Truncated {
                expected: header.file_len(),
                found,
            }
            .into());
        }
        file.seek(u64::from(header.pixel_offset))
            .map_err(CacheError::Storage)?;
        Ok(Self {
            file,
            header,
            rows_left: header.height,
        })
    }

    /// Fill `buffer` with as many whole rows as fit, returning the bytes used
    fn next_chunk(
        &mut self,
        buffer: &mut [u8; CHUNK_BUFFER_LEN],
    ) -> Result<Option<usize>, CacheError<F::Error>> {
        if self.rows_left == 0 {
            return Ok(None);
        }
        let stride = self.header.row_stride();
        let row_bytes = self.header.row_bytes();
        let rows = (CHUNK_BUFFER_LEN / stride).clamp(1, usize::from(self.rows_left));

        let wanted = rows * stride;
        let read = self
            .file
            .read_fill(&mut buffer[..wanted])
            .map_err(CacheError::Storage)?;
        if read < wanted {
            return Err(FormatError::Truncated {
                expected: wanted as u64,
                found: read as u64,
            }
            .into());
        }

        for row in 1..rows {
            buffer.copy_within(row * stride..row * stride + row_bytes, row * row_bytes);
        }
        let used = rows * row_bytes;
        bmp::to_device_order(&mut buffer[..used]);
        // rows <= rows_left
        self.rows_left -= rows as u16;
        Ok(Some(used))
    }
}

/// Pixel data of a validated artifact
struct ArtifactReader<F> {
    file: F,
    width: u16,
    height: u16,
    bytes_left: u64,
}

impl<F: StorageFile> ArtifactReader<F> {
    fn open(mut file: F) -> Result<Self, CacheError<F::Error>> {
        let mut raw = [0u8; CACHE_HEADER_LEN];
        let read = file.read_fill(&mut raw).map_err(CacheError::Storage)?;
        let found = file.len().map_err(CacheError::Storage)?;
        if read < CACHE_HEADER_LEN {
            return Err(FormatError::Truncated {
                expected: CACHE_HEADER_LEN as u64,
                found,
            }
            .into());
        }

        let width = u16::from_le_bytes([raw[0], raw[1]]);
        let height = u16::from_le_bytes([raw[2], raw[3]]);
        bmp::check_size(width, height)?;
        let pixel_bytes = u64::from(width) * u64::from(height) * 2;
        let expected = CACHE_HEADER_LEN as u64 + pixel_bytes;
        if found != expected {
            return Err(FormatError::SizeMismatch { expected, found }.into());
        }
        Ok(Self {
            file,
            width,
            height,
            bytes_left: pixel_bytes,
        })
    }

    fn next_chunk(
        &mut self,
        buffer: &mut [u8; CHUNK_BUFFER_LEN],
    ) -> Result<Option<usize>, CacheError<F::Error>> {
        if self.bytes_left == 0 {
            return Ok(None);
        }
        let wanted = self.bytes_left.min(CHUNK_BUFFER_LEN as u64) as usize;
        let read = self
            .file
            .read_fill(&mut buffer[..wanted])
            .map_err(CacheError::Storage)?;
        if read < wanted {
            return Err(FormatError::Truncated {
                expected: wanted as u64,
                found: read as u64,
            }
            .into());
        }
        self.bytes_left -= wanted as u64;
        Ok(Some(wanted))
    }
}

enum PixelSource<F> {
    Cached(ArtifactReader<F>),
    Direct(RowReader<F>),
}

impl<F: StorageFile> PixelSource<F> {
    fn size(&self) -> (u16, u16) {
        match self {
            Self::Cached(reader) => (reader.width, reader.height),
            Self::Direct(reader) => (reader.header.width, reader.header.height),
        }
    }

    fn next_chunk(
        &mut self,
        buffer: &mut [u8; CHUNK_BUFFER_LEN],
    ) -> Result<Option<usize>, CacheError<F::Error>> {
        match self {
            Self::Cached(reader) => reader.next_chunk(buffer),
            Self::Direct(reader) => reader.next_chunk(buffer),
        }
    }
}

/// Renders bitmaps from storage and maintains their cache artifacts
pub struct ImageCache<S> {
    storage: S,
    config: CacheConfig,
}

impl<S: Storage> ImageCache<S> {
    /// Wrap `storage`, creating the cache directory if it is missing
    pub fn new(mut storage: S, config: CacheConfig) -> CacheResult<Self, S> {
        storage
            .create_dir_all(&config.cache_dir)
            .map_err(CacheError::Storage)?;
        Ok(Self { storage, config })
    }

    /// Directory layout in use
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Access the underlying storage
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Release the storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Path of the source image `name`
    pub fn source_path(&self, name: &str) -> String {
        format!("{}/{name}", self.config.image_dir)
    }

    /// Path of the cache artifact for `name`
    pub fn cache_path(&self, name: &str) -> String {
        format!("{}/{name}{CACHE_EXTENSION}", self.config.cache_dir)
    }

    /// Whether an artifact exists for `name`
    pub fn is_cached(&mut self, name: &str) -> CacheResult<bool, S> {
        let path = self.cache_path(name);
        self.storage.exists(&path).map_err(CacheError::Storage)
    }

    /// Convert the source image `name` into a cache artifact
    ///
    /// An existing artifact is replaced. If conversion fails part way, the
    /// partial artifact is removed.
    pub fn build(&mut self, name: &str) -> CacheResult<(), S> {
        let mut rows = self.open_source(name)?;
        let path = self.cache_path(name);
        log::debug!("ili9341: caching {name} as {path}");

        let mut artifact = self.storage.create(&path).map_err(CacheError::Storage)?;
        let result = write_artifact(&mut artifact, &mut rows);
        if result.is_err() {
            drop(artifact);
            if let Err(err) = self.storage.remove(&path) {
                log::warn!("ili9341: could not remove partial artifact {path}: {err:?}");
            }
        }
        result
    }

    /// Render the image `name` with its top-left corner at `pos`
    ///
    /// Without a position the image is centred. With `use_cache`, the
    /// artifact is used when it exists; a missing artifact falls back to
    /// the source. The screen is filled with `background` first if given.
    /// Headers are validated before anything is drawn.
    ///
    /// # Errors
    ///
    /// `ImageError::NotFound` if the source is needed and missing,
    /// `ImageError::Format` for a malformed source or artifact.
    pub fn render<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        name: &str,
        pos: Option<(u16, u16)>,
        use_cache: bool,
        background: Option<Color>,
    ) -> Result<(), ImageError<I, S::Error>> {
        let mut source = self.open_pixels(name, use_cache)?;
        let (width, height) = source.size();
        let (x, y) = pos.unwrap_or_else(|| bmp::centered(width, height));
        let x1 = u32::from(x) + u32::from(width) - 1;
        let y1 = u32::from(y) + u32::from(height) - 1;
        if x1 >= u32::from(SCREEN_WIDTH) || y1 >= u32::from(SCREEN_HEIGHT) {
            return Err(ImageError::Display(Error::InvalidWindow {
                x0: x,
                y0: y,
                x1: x1.min(u32::from(u16::MAX)) as u16,
                y1: y1.min(u32::from(u16::MAX)) as u16,
            }));
        }

        if let Some(background) = background {
            display.fill_screen(background, 0)?;
        }

        display.ensure_orientation(Orientation::Image)?;
        let result = stream_pixels(display, &mut source, x, y, width, height);
        let restored = display.ensure_orientation(Orientation::Graphics);
        result?;
        restored?;
        Ok(())
    }

    /// Remove every cache artifact, returning how many were removed
    pub fn clear_cache(&mut self) -> CacheResult<usize, S> {
        let names = self
            .storage
            .list(&self.config.cache_dir)
            .map_err(CacheError::Storage)?;
        let mut removed = 0;
        for name in names.iter().filter(|name| name.ends_with(CACHE_EXTENSION)) {
            let path = format!("{}/{name}", self.config.cache_dir);
            self.storage.remove(&path).map_err(CacheError::Storage)?;
            removed += 1;
        }
        log::debug!("ili9341: removed {removed} cache artifacts");
        Ok(removed)
    }

    /// Render every `.bmp` in the image directory in name order
    ///
    /// Each image is centred. Returns how many were rendered.
    pub fn render_all<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        use_cache: bool,
        background: Option<Color>,
    ) -> Result<usize, ImageError<I, S::Error>> {
        let mut names: Vec<String> = self
            .storage
            .list(&self.config.image_dir)
            .map_err(ImageError::Storage)?
            .into_iter()
            .filter(|name| is_bitmap_name(name))
            .collect();
        names.sort();
        for name in &names {
            self.render(display, name, None, use_cache, background)?;
        }
        Ok(names.len())
    }

    fn open_source(&mut self, name: &str) -> CacheResult<RowReader<S::File>, S> {
        let path = self.source_path(name);
        match self.storage.open(&path).map_err(CacheError::Storage)? {
            Some(file) => RowReader::open(file),
            None => Err(CacheError::NotFound(path)),
        }
    }

    fn open_pixels(
        &mut self,
        name: &str,
        use_cache: bool,
    ) -> CacheResult<PixelSource<S::File>, S> {
        if use_cache {
            let path = self.cache_path(name);
            match self.storage.open(&path).map_err(CacheError::Storage)? {
                Some(file) => {
                    log::debug!("ili9341: rendering {name} from cache");
                    return ArtifactReader::open(file).map(PixelSource::Cached);
                }
                None => log::warn!("ili9341: no cache artifact for {name}, decoding source"),
            }
        }
        self.open_source(name).map(PixelSource::Direct)
    }
}

fn write_artifact<F: StorageFile>(
    artifact: &mut F,
    rows: &mut RowReader<F>,
) -> Result<(), CacheError<F::Error>> {
    let mut header = [0u8; CACHE_HEADER_LEN];
    header[..2].copy_from_slice(&rows.header.width.to_le_bytes());
    header[2..].copy_from_slice(&rows.header.height.to_le_bytes());
    artifact.write_all(&header).map_err(CacheError::Storage)?;

    let mut buffer = [0u8; CHUNK_BUFFER_LEN];
    while let Some(used) = rows.next_chunk(&mut buffer)? {
        artifact
            .write_all(&buffer[..used])
            .map_err(CacheError::Storage)?;
    }
    Ok(())
}

/// Stream an image into its window; the image orientation must be active
fn stream_pixels<I: DisplayInterface, F: StorageFile>(
    display: &mut Display<I>,
    source: &mut PixelSource<F>,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
) -> Result<(), ImageError<I, F::Error>> {
    // Rows are mirrored, so the first (bottom) row lands on the last
    // screen row of the image.
    let page = SCREEN_HEIGHT - y - height;
    display.set_window(x, page, x + width - 1, page + height - 1)?;

    let mut buffer = [0u8; CHUNK_BUFFER_LEN];
    while let Some(used) = source.next_chunk(&mut buffer)? {
        display.write_data(&buffer[..used])?;
    }
    Ok(())
}

fn is_bitmap_name(name: &str) -> bool {
    name.len() > SOURCE_EXTENSION.len()
        && name
            .get(name.len() - SOURCE_EXTENSION.len()..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}
