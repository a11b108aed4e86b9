use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of an error that escapes a command. This is attached to the error as
/// context so that the user can tell whether to look at their configuration, their data file, or
/// the arguments they passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The data home or its `config.json` is missing, unreadable or invalid.
    Config,
    /// The CSV data file could not be read or parsed.
    Data,
    /// The arguments to a command were not usable.
    Request,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Tags the error of a `Result` with an `ErrorType` before it is returned from a public command.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(format!("{error_type} error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pub_result_adds_category() {
        let result: std::result::Result<(), Error> = Err(anyhow!("file not found"));
        let err = result.pub_result(ErrorType::Data).unwrap_err();
        assert_eq!(err.to_string(), "data error");
        assert_eq!(err.root_cause().to_string(), "file not found");
    }

    #[test]
    fn test_pub_result_passes_ok_through() {
        let result: std::result::Result<u8, std::io::Error> = Ok(7);
        assert_eq!(result.pub_result(ErrorType::Config).unwrap(), 7);
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::Request.to_string(), "request");
        assert_eq!("config".parse::<ErrorType>().unwrap(), ErrorType::Config);
    }
}
