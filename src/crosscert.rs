//! Creating certificate pair files.
//!
//! This module contains everything the `crosscert` tool does besides
//! parsing its arguments: working out which file is which, measuring the
//! certificates, and writing the encoded pair to the output file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};
use crate::encode::{IoTarget, Sink};
use crate::error::Error;
use crate::ident::Form;
use crate::pair::{CertificatePair, Content, PairLayout};


//------------ Request -------------------------------------------------------

/// A request to create a certificate pair file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    /// The file with the forward certificate.
    pub forward: Option<PathBuf>,

    /// The file with the reverse certificate.
    pub reverse: Option<PathBuf>,

    /// The file to write the certificate pair to.
    pub output: PathBuf,

    /// The form of the certificate tags.
    pub form: Form,

    /// Whether to report on the certificates processed.
    pub verbose: bool,
}

impl Request {
    /// The output file used if none is given.
    pub const DEFAULT_OUTPUT: &'static str = "crosscert.der";

    /// Creates a request with default settings for the given files.
    pub fn new(forward: Option<PathBuf>, reverse: Option<PathBuf>) -> Self {
        Request {
            forward,
            reverse,
            output: PathBuf::from(Self::DEFAULT_OUTPUT),
            form: Form::Constructed,
            verbose: false,
        }
    }

    /// Creates a request from explicit and positional file arguments.
    ///
    /// Positional files take the forward slot first and then the reverse
    /// slot, skipping slots already given explicitly. It is a usage error
    /// if there are more positional files than free slots.
    pub fn from_files(
        forward: Option<PathBuf>,
        reverse: Option<PathBuf>,
        files: impl IntoIterator<Item = PathBuf>,
    ) -> Result<Self, Error> {
        let mut res = Request::new(forward, reverse);
        for file in files {
            if res.forward.is_none() {
                res.forward = Some(file)
            }
            else if res.reverse.is_none() {
                res.reverse = Some(file)
            }
            else {
                return Err(Error::usage(format!(
                    "unexpected extra certificate file {}", file.display()
                )))
            }
        }
        Ok(res)
    }

    /// Checks that the request can be processed.
    ///
    /// This happens before any file is touched. Only the paths themselves
    /// are compared here. [`run`] also checks that the output file isn't
    /// one of the certificate files under a different name.
    pub fn validate(&self) -> Result<(), Error> {
        if self.forward.is_none() && self.reverse.is_none() {
            return Err(Error::usage("no certificate file specified"))
        }
        let output = Some(self.output.as_path());
        if self.forward.as_deref() == output
            || self.reverse.as_deref() == output
        {
            return Err(Error::usage(format!(
                "output file {} is also a certificate file",
                self.output.display()
            )))
        }
        Ok(())
    }

    /// Returns the most verbose log level wanted by the request.
    pub fn max_level(&self) -> Level {
        if self.verbose { Level::INFO } else { Level::WARN }
    }
}


//------------ Summary -------------------------------------------------------

/// What has been written for a request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    /// The forward certificate file and its size.
    pub forward: Option<(PathBuf, u64)>,

    /// The reverse certificate file and its size.
    pub reverse: Option<(PathBuf, u64)>,

    /// The layout of the written pair.
    pub layout: PairLayout,
}


//------------ run -----------------------------------------------------------

/// Processes a request.
///
/// On success, the output file contains the complete encoded pair. If
/// anything goes wrong once the output file has been created, it is
/// removed again.
pub fn run(request: &Request) -> Result<Summary, Error> {
    request.validate()?;
    let forward = request.forward.as_deref().map(Input::open).transpose()?;
    let reverse = request.reverse.as_deref().map(Input::open).transpose()?;

    for input in forward.iter().chain(reverse.iter()) {
        input.check_output(&request.output)?;
    }

    let summary_forward = forward.as_ref().map(Input::summary);
    let summary_reverse = reverse.as_ref().map(Input::summary);
    let pair = CertificatePair::new(
        forward.map(Input::into_content).transpose()?,
        reverse.map(Input::into_content).transpose()?,
    )?.with_form(request.form);

    let file = File::create(&request.output).map_err(|err| {
        Error::io(format!("cannot create {}", request.output.display()), err)
    })?;
    let layout = match write_output(pair, file, &request.output) {
        Ok(layout) => layout,
        Err(err) => {
            if let Err(remove_err) = fs::remove_file(&request.output) {
                warn!(
                    "cannot remove incomplete output {}: {}",
                    request.output.display(), remove_err
                );
            }
            return Err(err)
        }
    };

    if let Some((path, len)) = summary_forward.as_ref() {
        info!("forward certificate {}: size is {}", path.display(), len);
    }
    if let Some((path, len)) = summary_reverse.as_ref() {
        info!("reverse certificate {}: size is {}", path.display(), len);
    }
    info!("done.");
    Ok(Summary {
        forward: summary_forward,
        reverse: summary_reverse,
        layout,
    })
}

/// Writes the pair into the output file at `path`.
fn write_output(
    pair: CertificatePair<File>, file: File, path: &Path
) -> Result<PairLayout, Error> {
    let mut sink = Sink::new(IoTarget::new(BufWriter::new(file)));
    let layout = pair.encode(&mut sink)?;
    let file = sink.finish()?.into_writer().into_inner().map_err(|err| {
        Error::io(
            format!("cannot write {}", path.display()), err.into_error()
        )
    })?;
    file.sync_all().map_err(|err| {
        Error::io(format!("cannot write {}", path.display()), err)
    })?;
    debug!("wrote {} octets to {}", layout.encoded_len(), path.display());
    Ok(layout)
}


//------------ Input ---------------------------------------------------------

/// An opened and measured certificate file.
struct Input {
    path: PathBuf,
    len: u64,
    file: File,
}

impl Input {
    /// Opens a certificate file and determines its size.
    ///
    /// The size is determined by reading through the file, after which it
    /// is rewound for encoding.
    fn open(path: &Path) -> Result<Self, Error> {
        let mut file = File::open(path).map_err(|err| {
            Error::io(format!("cannot open {}", path.display()), err)
        })?;
        let len = io::copy(&mut file, &mut io::sink()).and_then(|len| {
            file.rewind()?;
            Ok(len)
        }).map_err(|err| {
            Error::io(format!("cannot read {}", path.display()), err)
        })?;
        debug!("{}: {} octets", path.display(), len);
        Ok(Input { path: path.into(), len, file })
    }

    /// Checks that the existing file at `output` isn’t this input.
    ///
    /// `File::create` would truncate the certificate otherwise. Both the
    /// canonical paths and, on Unix, the device and inode numbers are
    /// compared, so that aliases through `..`, symlinks, and hard links
    /// are caught.
    fn check_output(&self, output: &Path) -> Result<(), Error> {
        let output_meta = match fs::metadata(output) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(())
            }
            Err(err) => {
                return Err(Error::io(
                    format!("cannot access {}", output.display()), err
                ))
            }
        };
        if self.is_file(output, &output_meta) {
            return Err(Error::usage(format!(
                "output file {} is also the certificate file {}",
                output.display(), self.path.display()
            )))
        }
        Ok(())
    }

    fn is_file(&self, path: &Path, meta: &fs::Metadata) -> bool {
        if let (Ok(left), Ok(right)) = (
            fs::canonicalize(&self.path), fs::canonicalize(path)
        ) {
            if left == right {
                return true
            }
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;

            if let Ok(own) = self.file.metadata() {
                if own.dev() == meta.dev() && own.ino() == meta.ino() {
                    return true
                }
            }
        }
        #[cfg(not(unix))]
        let _ = meta;
        false
    }

    fn summary(&self) -> (PathBuf, u64) {
        (self.path.clone(), self.len)
    }

    fn into_content(self) -> Result<Content<File>, Error> {
        Content::new(self.len, self.file)
    }
}


//============ Tests =========================================================
