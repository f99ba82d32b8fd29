use {
    crate::token::SourcePosition,
    miette::{Diagnostic, ErrReport},
    thiserror::Error,
};

/// Unrecoverable fault of the underlying character source.
///
/// End of input is not an error, it is reported as an `EndOfInput` token.
#[derive(Error, Diagnostic, Debug)]
pub enum ScanError {
    #[error("Could not read from input")]
    #[diagnostic(
        code(runelex::read),
        help("the input must be readable, valid UTF-8 text")
    )]
    Read(#[from] std::io::Error),
}

#[derive(Error, Diagnostic, Debug)]
pub enum RuntimeError {
    #[error("Usage: {0}")]
    #[diagnostic(code(runelex::usage))]
    Usage(ErrReport),
    #[error("Could not read from file {0}")]
    #[diagnostic(code(runelex::io))]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scan(#[from] ScanError),
    #[error("Illegal character `{character}` at {position}")]
    #[diagnostic(
        code(runelex::illegal),
        help("run without --strict to report illegal characters as tokens")
    )]
    IllegalCharacter {
        character: String,
        position: SourcePosition,
    },
}
