//! Line-oriented TCP relay for two-terminal play.
//!
//! Each frame is one newline-terminated UTF-8 line carrying the exact
//! command text a local player would have typed (`"e2e4"`, `"undo"`,
//! `"quit"`). There is no envelope, sequence number, or acknowledgment.
//! Either peer closing the connection, or failing to deliver a complete
//! line before disconnecting, ends the session. The engine never sees
//! this transport; it only receives locally constructed square pairs.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use tracing::info;

pub struct Relay {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Relay {
    /// Bind, wait for exactly one opponent, then drop the listener.
    pub fn host(port: u16) -> io::Result<Relay> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        info!(port, "waiting for opponent to connect");
        let (stream, peer) = listener.accept()?;
        info!(%peer, "opponent connected");
        Relay::from_stream(stream)
    }

    /// Connect to a hosting peer.
    pub fn join(host: &str, port: u16) -> io::Result<Relay> {
        let stream = TcpStream::connect((host, port))?;
        info!(host, port, "connected to host");
        Relay::from_stream(stream)
    }

    fn from_stream(stream: TcpStream) -> io::Result<Relay> {
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Relay {
            reader,
            writer: stream,
        })
    }

    /// Send one line, verbatim plus the terminator.
    pub fn send_line(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    /// Receive one line without its terminator. `None` means the session
    /// is over: the peer closed the connection, cleanly or mid-line.
    pub fn recv_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 || !line.ends_with('\n') {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}
