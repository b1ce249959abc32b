//! One-shot socket client: connect, optionally write, close.
//!
//! Every failure mode is captured as a [`SendOutcome`] so attack loops can
//! tally results without per-call error handling. The connect itself goes
//! through `socket2::Socket::connect_timeout` — a plain
//! `UnixStream::connect` has no deadline and could park an attack loop on a
//! daemon whose accept queue is full.

use socket2::{Domain, SockAddr, Socket, Type};
use std::fmt;
use std::io::{self, ErrorKind, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

/// Result of a single connect/write/close attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Connected and (if a payload was given) wrote it fully.
    Success,
    /// Connect or write exceeded the deadline.
    Timeout,
    /// Nothing listening: socket file absent, or present but unattended.
    ConnectionRefused,
    /// Any other OS-level socket failure (permissions, broken pipe, ...).
    Other(ErrorKind),
}

impl SendOutcome {
    pub fn is_success(self) -> bool {
        self == SendOutcome::Success
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendOutcome::Success => write!(f, "ok"),
            SendOutcome::Timeout => write!(f, "timeout"),
            SendOutcome::ConnectionRefused => write!(f, "refused"),
            SendOutcome::Other(kind) => write!(f, "err:{kind:?}"),
        }
    }
}

impl From<io::Error> for SendOutcome {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => SendOutcome::Timeout,
            ErrorKind::ConnectionRefused | ErrorKind::NotFound => SendOutcome::ConnectionRefused,
            kind => SendOutcome::Other(kind),
        }
    }
}

/// Open a stream connection to `endpoint`, write `payload` if one is given,
/// and close. One attempt, no retries; retry policy belongs to the caller.
///
/// `timeout` bounds the connect and each write. The socket is closed on every
/// path, including timeout and error, when the stream drops.
pub fn connect_send_close(
    endpoint: &Path,
    payload: Option<&[u8]>,
    timeout: Duration,
) -> SendOutcome {
    debug_assert!(!timeout.is_zero(), "timeout must be positive");
    match try_send(endpoint, payload, timeout) {
        Ok(()) => SendOutcome::Success,
        Err(e) => SendOutcome::from(e),
    }
}

fn try_send(endpoint: &Path, payload: Option<&[u8]>, timeout: Duration) -> io::Result<()> {
    let socket = Socket::new(Domain::UNIX, Type::STREAM, None)?;
    let addr = SockAddr::unix(endpoint)?;
    socket.connect_timeout(&addr, timeout)?;
    socket.set_write_timeout(Some(timeout))?;

    let mut stream: UnixStream = std::os::fd::OwnedFd::from(socket).into();
    if let Some(bytes) = payload {
        if !bytes.is_empty() {
            // Best effort: the daemon must tolerate truncated reads anyway.
            stream.write_all(bytes)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::os::unix::net::UnixListener;
    use std::thread;

    fn fd_count() -> usize {
        std::fs::read_dir("/proc/self/fd").map(|rd| rd.count()).unwrap_or(0)
    }

    #[test]
    fn success_against_listener() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            conn.read_to_end(&mut buf).unwrap();
            buf
        });

        let out = connect_send_close(&path, Some(b"NEXT"), Duration::from_secs(1));
        assert_eq!(out, SendOutcome::Success);
        assert_eq!(server.join().unwrap(), b"NEXT");
    }

    #[test]
    fn empty_payload_is_connect_and_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let server = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            conn.read_to_end(&mut buf).unwrap();
            buf
        });

        let out = connect_send_close(&path, None, Duration::from_secs(1));
        assert_eq!(out, SendOutcome::Success);
        assert!(server.join().unwrap().is_empty());
    }

    #[test]
    fn absent_socket_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nobody-home.sock");
        let out = connect_send_close(&path, Some(b"NEXT"), Duration::from_millis(200));
        assert_eq!(out, SendOutcome::ConnectionRefused);
    }

    #[test]
    fn unread_write_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.sock");
        // Bind but never accept or read; a large write must hit the send
        // buffer limit and then the write deadline, never hang.
        let _listener = UnixListener::bind(&path).unwrap();
        let big = vec![0u8; 8 * 1024 * 1024];
        let out = connect_send_close(&path, Some(&big), Duration::from_millis(200));
        assert_eq!(out, SendOutcome::Timeout);
    }

    #[test]
    fn no_descriptor_leak() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nobody-home.sock");
        let before = fd_count();
        for _ in 0..32 {
            let _ = connect_send_close(&path, Some(b"NEXT"), Duration::from_millis(50));
        }
        assert!(fd_count() <= before, "socket descriptors leaked");
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(SendOutcome::Success.to_string(), "ok");
        assert_eq!(SendOutcome::Timeout.to_string(), "timeout");
        assert_eq!(SendOutcome::ConnectionRefused.to_string(), "refused");
        assert_eq!(
            SendOutcome::Other(ErrorKind::BrokenPipe).to_string(),
            "err:BrokenPipe"
        );
    }
}
