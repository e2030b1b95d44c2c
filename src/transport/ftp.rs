//! Blocking FTP implementation of the [`Transport`] seam.
//!
//! One control connection, anonymous login, binary transfer type. The
//! session timeout is applied once at connect time and covers every
//! subsequent control and data exchange; there is no per-call override.

use std::io::Write;
use std::net::ToSocketAddrs;
use std::time::Duration;

use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream, Status};
use tracing::{debug, info, warn};

use super::{Transport, TransportError};

/// Anonymous credentials accepted by public standards archives.
const ANONYMOUS_USER: &str = "anonymous";
const ANONYMOUS_PASS: &str = "anonymous@";

/// FTP-backed transport over a single blocking control connection.
pub struct FtpTransport {
    stream: FtpStream,
}

impl FtpTransport {
    /// Connects to `host:port`, logs in anonymously and switches the
    /// session to binary transfer type.
    ///
    /// `timeout` bounds the connect attempt and all later reads on the
    /// control socket.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the host does not resolve, the
    /// connection cannot be established within the timeout, or the login
    /// handshake is rejected.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, TransportError> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(TransportError::Connection)?
            .next()
            .ok_or_else(|| TransportError::Protocol(format!("no address found for {host}:{port}")))?;

        debug!(%addr, ?timeout, "connecting to archive");
        let mut stream =
            FtpStream::connect_timeout(addr, timeout).map_err(|e| map_session_error(host, e))?;
        stream
            .get_ref()
            .set_read_timeout(Some(timeout))
            .map_err(TransportError::Connection)?;

        stream
            .login(ANONYMOUS_USER, ANONYMOUS_PASS)
            .map_err(|e| map_session_error(host, e))?;
        stream
            .transfer_type(FileType::Binary)
            .map_err(|e| map_session_error(host, e))?;

        info!(host, port, "connected and logged in");
        Ok(Self { stream })
    }

    /// Ends the session with a QUIT; best effort, failures are logged only.
    pub fn close(mut self) {
        match self.stream.quit() {
            Ok(()) => debug!("session closed"),
            Err(error) => warn!(error = %error, "error closing session"),
        }
    }
}

impl Transport for FtpTransport {
    fn change_dir(&mut self, path: &str) -> Result<(), TransportError> {
        self.stream.cwd(path).map_err(|e| map_path_error(path, e))
    }

    fn list_names(&mut self) -> Result<Vec<String>, TransportError> {
        self.stream
            .nlst(None)
            .map_err(|e| map_path_error("<current directory>", e))
    }

    fn retrieve_to(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let mut reader = self
            .stream
            .retr_as_stream(name)
            .map_err(|e| map_transfer_error(name, e))?;

        match std::io::copy(&mut reader, sink) {
            Ok(bytes) => {
                self.stream
                    .finalize_retr_stream(reader)
                    .map_err(|e| map_transfer_error(name, e))?;
                Ok(bytes)
            }
            Err(io_error) => {
                // The data connection is already broken; drain the control
                // channel reply if the server still sends one.
                if let Err(error) = self.stream.finalize_retr_stream(reader) {
                    debug!(error = %error, "finalize after failed transfer");
                }
                Err(TransportError::transfer(name, io_error.to_string()))
            }
        }
    }
}

/// Maps an FTP error on a navigation/listing call, separating 550-class
/// rejections (missing or forbidden path) from harder failures.
fn map_path_error(path: &str, error: FtpError) -> TransportError {
    match error {
        FtpError::UnexpectedResponse(response) if response.status == Status::FileUnavailable => {
            TransportError::path_unavailable(
                path,
                FtpError::UnexpectedResponse(response).to_string(),
            )
        }
        FtpError::ConnectionError(io_error) => TransportError::Connection(io_error),
        other => TransportError::Protocol(other.to_string()),
    }
}

/// Maps an FTP error on a RETR exchange.
fn map_transfer_error(name: &str, error: FtpError) -> TransportError {
    TransportError::transfer(name, error.to_string())
}

/// Maps an FTP error during session setup.
fn map_session_error(host: &str, error: FtpError) -> TransportError {
    match error {
        FtpError::ConnectionError(io_error) => TransportError::Connection(io_error),
        other => TransportError::Protocol(format!("{host}: {other}")),
    }
}
