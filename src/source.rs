//! Shader source descriptions.
//!
//! A [`Sources`] value names the vertex and fragment source text of a
//! program, either inline or as files. File names are resolved against an
//! optional base directory, so a set of demos can share one shader folder:
//!
//! ```rust
//! use shade::source::{Source, Sources};
//!
//! let sources = Sources::files("quad.vert.glsl", "quad.frag.glsl")
//!     .with_base_dir("demos/shaders");
//! assert_eq!(
//!     sources.vertex.resolve(sources.base_dir.as_deref()),
//!     Some("demos/shaders/quad.vert.glsl".into()),
//! );
//! # let _ = Source::inline("void main() {}");
//! ```
//!
//! [`Sources`]: struct.Sources.html

use std::borrow::Cow;
use std::path;

use crate::error::{Error, Result};
use crate::shader::Stage;
use crate::util;

/// Where the text of one shader stage comes from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Source {
    /// Source text supplied directly.
    Inline(Cow<'static, str>),

    /// Source text read from a file.
    File(path::PathBuf),
}

impl Source {
    /// Inline source text.
    pub fn inline<T>(text: T) -> Self
        where T: Into<Cow<'static, str>>
    {
        Source::Inline(text.into())
    }

    /// Source text read from `path` at load time.
    pub fn file<P>(path: P) -> Self
        where P: Into<path::PathBuf>
    {
        Source::File(path.into())
    }

    /// Returns the path the source will be read from, if it is a file.
    ///
    /// Relative paths are joined onto `base`; absolute paths are returned
    /// unchanged.
    pub fn resolve(&self, base: Option<&path::Path>) -> Option<path::PathBuf> {
        match *self {
            Source::Inline(_) => None,
            Source::File(ref path) => Some(match base {
                Some(base) => base.join(path),
                None => path.clone(),
            }),
        }
    }

    /// Returns the source text, reading it from disk if necessary.
    pub fn load(&self, stage: Stage, base: Option<&path::Path>) -> Result<Cow<'_, str>> {
        match *self {
            Source::Inline(ref text) => Ok(Cow::Borrowed(&text[..])),
            Source::File(_) => {
                let path = self.resolve(base).unwrap_or_default();
                trace!("reading {} shader from {}", stage, path.display());
                match util::read_file_to_string(&path) {
                    Ok(text) => Ok(Cow::Owned(text)),
                    Err(source) => Err(Error::Read { stage, path, source }),
                }
            }
        }
    }
}

/// The vertex and fragment sources of a program.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Sources {
    /// Vertex stage source.
    pub vertex: Source,

    /// Fragment stage source.
    pub fragment: Source,

    /// Directory relative file sources are resolved against.
    pub base_dir: Option<path::PathBuf>,
}

impl Sources {
    /// Constructor.
    pub fn new(vertex: Source, fragment: Source) -> Self {
        Self {
            vertex,
            fragment,
            base_dir: None,
        }
    }

    /// Both stages given as inline text.
    pub fn inline<V, F>(vertex: V, fragment: F) -> Self
        where V: Into<Cow<'static, str>>, F: Into<Cow<'static, str>>
    {
        Self::new(Source::inline(vertex), Source::inline(fragment))
    }

    /// Both stages read from files.
    pub fn files<V, F>(vertex: V, fragment: F) -> Self
        where V: Into<path::PathBuf>, F: Into<path::PathBuf>
    {
        Self::new(Source::file(vertex), Source::file(fragment))
    }

    /// Resolve relative file sources against `dir`.
    pub fn with_base_dir<P>(mut self, dir: P) -> Self
        where P: Into<path::PathBuf>
    {
        self.base_dir = Some(dir.into());
        self
    }

    /// Returns the source of the given stage.
    pub fn get(&self, stage: Stage) -> &Source {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }

    /// Returns the source text of the given stage.
    pub fn load(&self, stage: Stage) -> Result<Cow<'_, str>> {
        self.get(stage).load(stage, self.base_dir.as_deref())
    }
}
