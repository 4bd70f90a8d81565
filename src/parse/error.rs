use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::animation::SplineError;
use crate::gfx::geometry::GeneratorError;

/// Errors raised while turning a scene file into a [`World`](crate::gfx::scene::World).
///
/// Parsing stops at the first error; no partial world is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("ran out of memory")]
    OutOfMemory,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("XML syntax error: {0}")]
    Syntax(#[from] roxmltree::Error),
    #[error("malformed number in attribute '{attribute}' of <{node}>")]
    MalformedNumber { node: String, attribute: String },

    #[error("no world node found")]
    NoWorldNode,
    #[error("no camera node found")]
    NoCameraNode,
    #[error("no root group node found")]
    NoGroupNode,

    #[error("no camera position node found")]
    NoCameraPosition,
    #[error("no camera lookAt node found")]
    NoCameraLookAt,
    #[error("no camera up node found")]
    NoCameraUp,
    #[error("no camera projection node found")]
    NoCameraProjection,

    #[error("unrecognized group child node <{0}>")]
    UnknownGroupChild(String),
    #[error("unrecognized transformation <{0}>")]
    UnknownTransform(String),

    #[error("no translate align attribute found")]
    NoTranslateAlign,
    #[error("unrecognized translate align value '{0}', expected True or False")]
    UnknownTranslateAlign(String),
    #[error("dynamic translate: {0}")]
    TranslatePoints(#[from] SplineError),

    #[error("no model file attribute")]
    NoModelFilename,
    #[error("model file '{0}' must end in either .3d or .obj")]
    AmbiguousModelExtension(String),
    #[error("model points to nonexistent file {0}")]
    NoModelFile(PathBuf),
    #[error("failed to load model {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: GeneratorError,
    },
    #[error("object loader failed on {path}: {source}")]
    ObjLoader {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
}
