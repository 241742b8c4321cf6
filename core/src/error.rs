use thiserror::Error;

/// Feil som kan komme ut av kjernen.
///
/// Nett- og tilgangsfeil fra regnearket sendes videre uendret til kallende lag.
/// Korte rader og tall som ikke lar seg tolke er *ikke* feil her – de hoppes over
/// eller blir `None`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("kunne ikke lese konfig {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ugyldig konfig ved `{path}`: {message}")]
    ConfigParse { path: String, message: String },

    #[error("kunne ikke lese tilgangsnøkkel {path}: {source}")]
    Credentials {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("mangler tilgangsnøkkel (credentials_path eller TRAINLOG_ACCESS_TOKEN)")]
    MissingCredentials,

    #[error("ingen tilgang til regnearket (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("regnearket svarte HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("nettverksfeil mot regnearket: {0}")]
    Transport(String),

    #[error("kunne ikke tolke svar fra regnearket: {0}")]
    Decode(String),

    #[error("fant ikke fanen `{0}` i regnearket")]
    TabNotFound(String),

    #[error("ugyldig argument: {0}")]
    InvalidArgument(String),

    #[error("kunne ikke lage graf: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;
