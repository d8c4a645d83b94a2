//! Archive build domain types.

use bytes::Bytes;
use url::Url;

use crate::ports::CoreError;

/// Message returned when the request does not carry a usable URL list.
pub const MISSING_IMAGES_MESSAGE: &str = "Please provide an array of image URLs";

/// An ordered, non-empty list of absolute http(s) URLs to pack into one archive.
///
/// Construction is the validation boundary: once an `ArchiveRequest` exists,
/// every element is a well-formed absolute URL and the list is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    urls: Vec<Url>,
}

impl ArchiveRequest {
    /// Validate raw URL strings into a request.
    ///
    /// Fails with [`CoreError::Validation`] when the list is empty or when an
    /// element is not an absolute `http`/`https` URL.
    pub fn new<I, S>(raw: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = raw
            .into_iter()
            .enumerate()
            .map(|(index, s)| {
                let s = s.as_ref();
                match Url::parse(s) {
                    Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
                    _ => Err(CoreError::Validation(format!(
                        "Invalid image URL at index {index}: {s}"
                    ))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if urls.is_empty() {
            return Err(CoreError::Validation(MISSING_IMAGES_MESSAGE.to_string()));
        }

        Ok(Self { urls })
    }

    /// URLs in input order.
    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_urls(self) -> Vec<Url> {
        self.urls
    }
}

/// Raw body plus sniffed extension, as returned by a fetcher.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub bytes: Bytes,
    /// Extension without the leading dot (`png`, `jpg`, ...).
    pub extension: String,
}

/// A successfully fetched resource tagged with its position in the request.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub bytes: Bytes,
    pub extension: String,
    pub source_index: usize,
}

impl FetchedResource {
    pub fn new(body: FetchedBody, source_index: usize) -> Self {
        Self {
            bytes: body.bytes,
            extension: body.extension,
            source_index,
        }
    }
}

/// One named payload destined for the archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub content: Bytes,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

/// Result of fetching one URL of a batch.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(FetchedResource),
    Failure {
        source_index: usize,
        cause: crate::ports::FetchError,
    },
}

impl FetchOutcome {
    pub const fn source_index(&self) -> usize {
        match self {
            Self::Success(resource) => resource.source_index,
            Self::Failure { source_index, .. } => *source_index,
        }
    }
}
