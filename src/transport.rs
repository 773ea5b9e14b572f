//! Line-oriented connection halves. Sessions only ever see these traits.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

pub trait LineSender: Send {
    fn send_line(&mut self, line: &str) -> io::Result<()>;
}

pub trait LineReceiver: Send {
    /// Next line without its terminator, `None` at end of stream.
    fn recv_line(&mut self) -> io::Result<Option<String>>;
}

pub struct TcpLineSender {
    writer: BufWriter<TcpStream>,
}

impl LineSender for TcpLineSender {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

// Closing the sender unblocks the reader on the other half.
impl Drop for TcpLineSender {
    fn drop(&mut self) {
        let _ = self.writer.flush();
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}

pub struct TcpLineReceiver {
    reader: BufReader<TcpStream>,
}

impl LineReceiver for TcpLineReceiver {
    // Bytes that are not UTF-8 become U+FFFD, so a garbled line is a protocol error, not a lost peer.
    fn recv_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 { return Ok(None); }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

pub fn split_tcp(stream: TcpStream) -> io::Result<(TcpLineSender, TcpLineReceiver)> {
    let read_half = stream.try_clone()?;
    Ok((TcpLineSender { writer: BufWriter::new(stream) }, TcpLineReceiver { reader: BufReader::new(read_half) }))
}

/// In-process endpoint backed by channels, used by tests and local play.
pub struct MemorySender(Sender<String>);
pub struct MemoryReceiver(Receiver<String>);

impl LineSender for MemorySender {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.0.send(line.to_string()).map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "peer closed"))
    }
}

impl LineReceiver for MemoryReceiver {
    fn recv_line(&mut self) -> io::Result<Option<String>> { Ok(self.0.recv().ok()) }
}

impl MemoryReceiver {
    /// Everything already delivered, without blocking.
    pub fn drain(&self) -> Vec<String> { self.0.try_iter().collect() }

    /// `None` on timeout or once the sending side is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<String> { self.0.recv_timeout(timeout).ok() }
}

/// One direction of an in-memory link.
pub fn memory_pipe() -> (MemorySender, MemoryReceiver) {
    let (tx, rx) = channel();
    (MemorySender(tx), MemoryReceiver(rx))
}
