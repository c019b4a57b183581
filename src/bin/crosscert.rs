//! Creates an X.509 cross certificate pair.
//!
//! Takes a forward and/or a reverse certificate in DER and writes the
//! `CertificatePair` containing them to a file.
//!
//! Certificates can be given with `-f` and `-r` or as plain arguments, in
//! which case the first is the forward and the second the reverse
//! certificate. Exits with 2 on usage errors and 1 if creating the pair
//! fails.

use std::io;
use std::path::PathBuf;
use std::process;
use clap::{CommandFactory, Parser};
use certpair::{ErrorKind, Form};
use certpair::crosscert::{self, Request};


/// Creates an X.509 cross certificate pair from DER encoded certificates.
#[derive(Parser)]
#[command(name = "crosscert", version, about, long_about = None)]
struct Args {
    /// Only specify the forward certificate.
    #[arg(short, long, value_name = "FILE")]
    forward: Option<PathBuf>,

    /// Only specify the reverse certificate.
    #[arg(short, long, value_name = "FILE")]
    reverse: Option<PathBuf>,

    /// The output file name.
    #[arg(
        short, long = "out", value_name = "FILE",
        default_value = Request::DEFAULT_OUTPUT
    )]
    out: PathBuf,

    /// Use primitive instead of constructed tags for the certificates.
    #[arg(short, long)]
    primitive: bool,

    /// Report the certificates and their sizes.
    #[arg(short, long)]
    verbose: bool,

    /// The forward and then the reverse certificate.
    #[arg(value_name = "FILE", num_args = 0..=2)]
    files: Vec<PathBuf>,
}

impl Args {
    fn into_request(self) -> Result<Request, certpair::Error> {
        let mut request = Request::from_files(
            self.forward, self.reverse, self.files
        )?;
        request.output = self.out;
        request.verbose = self.verbose;
        if self.primitive {
            request.form = Form::Primitive;
        }
        request.validate()?;
        Ok(request)
    }
}

/// Returns the exit code for a failed run.
fn exit_code(err: &certpair::Error) -> i32 {
    match err.kind() {
        ErrorKind::Usage => 2,
        ErrorKind::Range | ErrorKind::Io | ErrorKind::Consistency => 1,
    }
}

fn main() {
    let request = match Args::parse().into_request() {
        Ok(request) => request,
        Err(err) => {
            Args::command().error(
                clap::error::ErrorKind::ArgumentConflict, err.message()
            ).exit()
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(request.max_level())
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = crosscert::run(&request) {
        eprintln!("crosscert: {}", err);
        process::exit(exit_code(&err));
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    fn request(args: &[&str]) -> Result<Request, certpair::Error> {
        let args = std::iter::once("crosscert").chain(args.iter().copied());
        Args::try_parse_from(args).unwrap().into_request()
    }

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn positional_files() {
        let req = request(&["fwd.der", "rev.der"]).unwrap();
        assert_eq!(req.forward, Some(PathBuf::from("fwd.der")));
        assert_eq!(req.reverse, Some(PathBuf::from("rev.der")));
        assert_eq!(req.output, PathBuf::from("crosscert.der"));
        assert_eq!(req.form, Form::Constructed);
        assert!(!req.verbose);
    }

    #[test]
    fn flags() {
        let req = request(
            &["-v", "-p", "-o", "pair.der", "-r", "rev.der"]
        ).unwrap();
        assert_eq!(req.forward, None);
        assert_eq!(req.reverse, Some(PathBuf::from("rev.der")));
        assert_eq!(req.output, PathBuf::from("pair.der"));
        assert_eq!(req.form, Form::Primitive);
        assert!(req.verbose);

        let req = request(&["-r", "rev.der", "fwd.der"]).unwrap();
        assert_eq!(req.forward, Some(PathBuf::from("fwd.der")));
    }

    #[test]
    fn usage_errors() {
        assert_eq!(request(&[]).unwrap_err().kind(), ErrorKind::Usage);
        assert_eq!(
            request(&["-f", "a.der", "-r", "b.der", "c.der"])
                .unwrap_err().kind(),
            ErrorKind::Usage
        );
        assert!(
            Args::try_parse_from(["crosscert", "a", "b", "c"]).is_err()
        );
        assert!(Args::try_parse_from(["crosscert", "-x"]).is_err());
    }

    #[test]
    fn exit_codes() {
        use certpair::Error;

        assert_eq!(exit_code(&Error::usage("no certificate file")), 2);
        assert_eq!(exit_code(&Error::range("length too large")), 1);
        assert_eq!(exit_code(&Error::consistency("short certificate")), 1);
        assert_eq!(
            exit_code(&Error::io(
                "cannot create pair.der",
                io::Error::new(io::ErrorKind::PermissionDenied, "denied")
            )),
            1
        );
    }
}
